//! Gateway registry for orchestrating metadata resolution.
//!
//! The registry walks its gateways in order, giving each exactly one
//! attempt bounded by the gateway's own budget. Any failure or timeout
//! advances the cascade; the first success wins. Exhausting the cascade is
//! a terminal value, not an error, so callers can degrade to a placeholder.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{debug, warn};
use tokio::time::timeout;

use crate::errors::RetryClass;
use crate::gateway::{CacheProxyGateway, IpfsGateway, MetadataGateway, DEFAULT_GATEWAY_HOSTS};
use crate::image::ImageSource;
use crate::models::{ContentRef, MetadataRecord, ResolutionOutcome};

/// Environment override for the cache proxy base URL.
const CACHE_PROXY_URL_VAR: &str = "MINTFOLIO_CACHE_PROXY_URL";

/// Environment override for the gateway host list (comma separated).
const GATEWAY_HOSTS_VAR: &str = "MINTFOLIO_IPFS_GATEWAYS";

/// Ordered cascade of metadata gateways.
pub struct GatewayRegistry {
    gateways: Vec<Arc<dyn MetadataGateway>>,
    /// Misses/timeouts per gateway, index-aligned with `gateways`. A
    /// logging signal only; failures never remove a gateway from the order.
    failures: Vec<AtomicU64>,
    image_hosts: Vec<String>,
}

impl GatewayRegistry {
    /// Create a registry over an explicit gateway order.
    ///
    /// `image_hosts` is the fixed priority list handed to [`ImageSource`];
    /// its first entry also serves as the host embedded image references
    /// are normalized against.
    pub fn new(gateways: Vec<Arc<dyn MetadataGateway>>, image_hosts: Vec<String>) -> Self {
        let failures = gateways.iter().map(|_| AtomicU64::new(0)).collect();
        Self {
            gateways,
            failures,
            image_hosts,
        }
    }

    /// Build the default cascade: cache proxy first (when configured),
    /// then the public gateway hosts in priority order.
    ///
    /// `MINTFOLIO_CACHE_PROXY_URL` and `MINTFOLIO_IPFS_GATEWAYS` override
    /// the proxy endpoint and host list.
    pub fn from_env() -> Self {
        let hosts: Vec<String> = match std::env::var(GATEWAY_HOSTS_VAR) {
            Ok(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(String::from)
                .collect(),
            Err(_) => DEFAULT_GATEWAY_HOSTS.iter().map(|h| h.to_string()).collect(),
        };

        let mut gateways: Vec<Arc<dyn MetadataGateway>> = Vec::new();
        if let Ok(base_url) = std::env::var(CACHE_PROXY_URL_VAR) {
            gateways.push(Arc::new(CacheProxyGateway::new(base_url)));
        }
        for host in &hosts {
            gateways.push(Arc::new(IpfsGateway::new(host.clone())));
        }

        Self::new(gateways, hosts)
    }

    fn primary_image_host(&self) -> &str {
        self.image_hosts
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_GATEWAY_HOSTS[0])
    }

    /// Failures recorded against a gateway since construction.
    pub fn failure_count(&self, gateway_id: &str) -> u64 {
        self.gateways
            .iter()
            .position(|g| g.id() == gateway_id)
            .map(|index| self.failures[index].load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Resolve a raw token URI into a canonical metadata record.
    ///
    /// Walks the cascade once: each gateway gets a single attempt within
    /// its own budget, a hit on an earlier gateway skips all later ones,
    /// and the embedded image reference of the winning record is
    /// canonicalized before it is returned. Idempotent for a warm cache.
    pub async fn resolve(&self, raw_uri: &str) -> ResolutionOutcome {
        let content = match ContentRef::parse(raw_uri) {
            Ok(content) => content,
            Err(e) => {
                warn!("metadata resolution skipped: {}", e);
                return ResolutionOutcome::Unavailable;
            }
        };

        for (index, gateway) in self.gateways.iter().enumerate() {
            let attempt = timeout(gateway.budget(), gateway.fetch_metadata(&content)).await;

            let value = match attempt {
                Err(_) => {
                    let misses = self.failures[index].fetch_add(1, Ordering::Relaxed) + 1;
                    debug!(
                        "gateway '{}' timed out for {} ({} failures)",
                        gateway.id(),
                        content,
                        misses
                    );
                    continue;
                }
                Ok(Err(e)) => match e.retry_class() {
                    RetryClass::Never => {
                        warn!("metadata resolution aborted for {}: {}", content, e);
                        return ResolutionOutcome::Unavailable;
                    }
                    RetryClass::NextGateway => {
                        let misses = self.failures[index].fetch_add(1, Ordering::Relaxed) + 1;
                        debug!(
                            "gateway '{}' missed {} ({} failures): {}",
                            gateway.id(),
                            content,
                            misses,
                            e
                        );
                        continue;
                    }
                },
                Ok(Ok(value)) => value,
            };

            match MetadataRecord::from_value(gateway.id(), value) {
                Ok(mut record) => {
                    record.normalize_refs(self.primary_image_host());
                    debug!("resolved {} via '{}'", content, gateway.id());
                    return ResolutionOutcome::Resolved(record);
                }
                Err(e) => {
                    self.failures[index].fetch_add(1, Ordering::Relaxed);
                    debug!("gateway '{}' served invalid record: {}", gateway.id(), e);
                    continue;
                }
            }
        }

        warn!("all gateways missed {}", content);
        ResolutionOutcome::Unavailable
    }

    /// Endpoint rotation for one image, over the registry's host list.
    pub fn image_source(&self, content: ContentRef) -> ImageSource {
        ImageSource::new(content, self.image_hosts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::errors::MetadataError;

    const CID: &str = "QmPK1s3pNYLi9ERiq3BDxKa4XosgWwFRQUydHUtz4YgpqB";

    enum MockBehavior {
        Serve(Value),
        Miss,
        Hang,
    }

    struct MockGateway {
        id: String,
        behavior: MockBehavior,
        calls: AtomicUsize,
    }

    impl MockGateway {
        fn new(id: &str, behavior: MockBehavior) -> Arc<Self> {
            Arc::new(Self {
                id: id.to_string(),
                behavior,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MetadataGateway for MockGateway {
        fn id(&self) -> &str {
            &self.id
        }

        fn budget(&self) -> Duration {
            Duration::from_millis(50)
        }

        async fn fetch_metadata(&self, _content: &ContentRef) -> Result<Value, MetadataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                MockBehavior::Serve(value) => Ok(value.clone()),
                MockBehavior::Miss => Err(MetadataError::NotCached {
                    gateway: self.id.clone(),
                }),
                MockBehavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    unreachable!("budget must cut the attempt short")
                }
            }
        }
    }

    fn record_json() -> Value {
        json!({
            "name": "Sunset #7",
            "description": "A test piece",
            "image": format!("ipfs://{}", CID),
            "attributes": [{ "trait_type": "Edition", "value": 7 }]
        })
    }

    fn registry(gateways: Vec<Arc<dyn MetadataGateway>>) -> GatewayRegistry {
        GatewayRegistry::new(gateways, vec!["ipfs.io".to_string(), "gateway.pinata.cloud".to_string()])
    }

    #[tokio::test]
    async fn test_first_hit_skips_later_gateways() {
        let cache = MockGateway::new("cache-proxy", MockBehavior::Serve(record_json()));
        let public = MockGateway::new("ipfs.io", MockBehavior::Serve(record_json()));

        let registry = registry(vec![cache.clone(), public.clone()]);
        let outcome = registry.resolve(&format!("ipfs://{}", CID)).await;

        assert!(outcome.is_resolved());
        assert_eq!(cache.calls(), 1);
        assert_eq!(public.calls(), 0);
    }

    #[tokio::test]
    async fn test_cascade_advances_past_timeouts_without_duplicates() {
        let first = MockGateway::new("g1", MockBehavior::Hang);
        let second = MockGateway::new("g2", MockBehavior::Hang);
        let third = MockGateway::new("g3", MockBehavior::Serve(record_json()));

        let registry = registry(vec![first.clone(), second.clone(), third.clone()]);
        let outcome = registry.resolve(&format!("ipfs://{}", CID)).await;

        let record = outcome.record().expect("third gateway serves the record");
        assert_eq!(record.name.as_deref(), Some("Sunset #7"));
        // Exactly one attempt per gateway, no re-visits after the initial try.
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
        assert_eq!(third.calls(), 1);
    }

    #[tokio::test]
    async fn test_exhausted_cascade_is_unavailable() {
        let first = MockGateway::new("g1", MockBehavior::Miss);
        let second = MockGateway::new("g2", MockBehavior::Miss);

        let registry = registry(vec![first, second]);
        let outcome = registry.resolve(&format!("ipfs://{}", CID)).await;

        assert_eq!(outcome, ResolutionOutcome::Unavailable);
    }

    #[tokio::test]
    async fn test_unrecognized_uri_is_unavailable_without_attempts() {
        let gateway = MockGateway::new("g1", MockBehavior::Serve(record_json()));

        let registry = registry(vec![gateway.clone()]);
        let outcome = registry.resolve("definitely not a content uri").await;

        assert_eq!(outcome, ResolutionOutcome::Unavailable);
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_resolve_is_idempotent_with_warm_cache() {
        let cache = MockGateway::new("cache-proxy", MockBehavior::Serve(record_json()));
        let registry = registry(vec![cache]);

        let uri = format!("ipfs://{}", CID);
        let first = registry.resolve(&uri).await;
        let second = registry.resolve(&uri).await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_resolved_record_has_fetchable_image() {
        let cache = MockGateway::new("cache-proxy", MockBehavior::Serve(record_json()));
        let registry = registry(vec![cache]);

        let outcome = registry.resolve(&format!("ipfs://{}", CID)).await;
        let record = outcome.record().unwrap();

        assert_eq!(
            record.image.as_deref(),
            Some(format!("https://ipfs.io/ipfs/{}", CID).as_str())
        );
        assert_eq!(record.image_ref.as_ref().map(|c| c.id()), Some(CID));
    }

    #[tokio::test]
    async fn test_failures_are_counted_per_gateway() {
        let first = MockGateway::new("g1", MockBehavior::Miss);
        let second = MockGateway::new("g2", MockBehavior::Serve(record_json()));

        let registry = registry(vec![first, second]);
        let uri = format!("ipfs://{}", CID);
        registry.resolve(&uri).await;
        registry.resolve(&uri).await;

        assert_eq!(registry.failure_count("g1"), 2);
        assert_eq!(registry.failure_count("g2"), 0);
        assert_eq!(registry.failure_count("nonexistent"), 0);
    }

    #[tokio::test]
    async fn test_invalid_record_advances_cascade() {
        let first = MockGateway::new("g1", MockBehavior::Serve(json!("not an object")));
        let second = MockGateway::new("g2", MockBehavior::Serve(record_json()));

        let registry = registry(vec![first.clone(), second.clone()]);
        let outcome = registry.resolve(&format!("ipfs://{}", CID)).await;

        assert!(outcome.is_resolved());
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
    }
}
