//! Public content-addressed gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::MetadataGateway;
use crate::errors::MetadataError;
use crate::models::ContentRef;

/// Per-attempt budget for public gateways.
const GATEWAY_TIMEOUT: Duration = Duration::from_secs(8);

/// Gateway over one public IPFS host.
pub struct IpfsGateway {
    client: Client,
    host: String,
}

impl IpfsGateway {
    pub fn new(host: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(GATEWAY_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            host: host.into(),
        }
    }

    /// The gateway host, for building image URLs on the same mirror.
    pub fn host(&self) -> &str {
        &self.host
    }
}

#[async_trait]
impl MetadataGateway for IpfsGateway {
    fn id(&self) -> &str {
        &self.host
    }

    fn budget(&self) -> Duration {
        GATEWAY_TIMEOUT
    }

    async fn fetch_metadata(&self, content: &ContentRef) -> Result<Value, MetadataError> {
        let url = content.gateway_url(&self.host);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::GatewayStatus {
                gateway: self.host.clone(),
                status: status.as_u16(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}
