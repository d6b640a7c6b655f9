//! Local cache/proxy gateway.
//!
//! The upload proxy keeps a copy of every metadata document it pinned and
//! serves it at `GET /metadata/{id}`. A hit here is authoritative - the
//! registry returns it without consulting any public gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::MetadataGateway;
use crate::errors::MetadataError;
use crate::models::ContentRef;

/// Per-attempt budget; the cache is local, so it answers fast or not at all.
const CACHE_PROXY_TIMEOUT: Duration = Duration::from_secs(2);

const GATEWAY_ID: &str = "cache-proxy";

/// Gateway over the upload proxy's metadata cache.
pub struct CacheProxyGateway {
    client: Client,
    base_url: String,
}

impl CacheProxyGateway {
    /// Create a gateway for the proxy at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(CACHE_PROXY_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl MetadataGateway for CacheProxyGateway {
    fn id(&self) -> &str {
        GATEWAY_ID
    }

    fn budget(&self) -> Duration {
        CACHE_PROXY_TIMEOUT
    }

    async fn fetch_metadata(&self, content: &ContentRef) -> Result<Value, MetadataError> {
        let url = format!("{}/metadata/{}", self.base_url, content.id());
        let response = self.client.get(&url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(MetadataError::NotCached {
                gateway: GATEWAY_ID.to_string(),
            }),
            status if !status.is_success() => Err(MetadataError::GatewayStatus {
                gateway: GATEWAY_ID.to_string(),
                status: status.as_u16(),
            }),
            _ => Ok(response.json::<Value>().await?),
        }
    }
}
