//! Gateway abstractions and implementations.
//!
//! A gateway is one place a metadata document may be fetched from. The
//! registry orders gateways and gives each exactly one bounded attempt per
//! resolution; gateways themselves stay oblivious to the cascade.

mod cache_proxy;
mod ipfs;

pub use cache_proxy::CacheProxyGateway;
pub use ipfs::IpfsGateway;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::MetadataError;
use crate::models::ContentRef;

/// Public gateway hosts mirroring pinned content, in priority order.
pub const DEFAULT_GATEWAY_HOSTS: &[&str] = &["ipfs.io", "gateway.pinata.cloud", "cloudflare-ipfs.com"];

/// One source of metadata documents.
#[async_trait]
pub trait MetadataGateway: Send + Sync {
    /// Stable identifier for logs and failure accounting.
    fn id(&self) -> &str;

    /// Per-attempt time budget enforced by the registry.
    fn budget(&self) -> Duration;

    /// Fetch the metadata JSON document for a content identifier.
    async fn fetch_metadata(&self, content: &ContentRef) -> Result<Value, MetadataError>;
}
