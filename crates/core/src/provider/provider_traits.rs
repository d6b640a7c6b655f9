//! Wallet provider seam traits.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::provider_errors::WalletRpcError;

/// The EIP-1193-shaped wallet surface.
///
/// Everything the core asks of a wallet - account listing, chain
/// switching, contract reads, transaction submission - goes through
/// `request`. Implementations bridge to an injected browser object or a
/// remote signing transport; tests substitute scripted mocks.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Perform one JSON-RPC request against the wallet.
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletRpcError>;
}

/// User-interactive remote pairing (QR-code based).
///
/// This is an explicit alternate path the caller chooses when no injection
/// exists; the locator never falls back to it on its own.
#[async_trait]
pub trait RemotePairing: Send + Sync {
    /// Run the pairing handshake and return the paired provider.
    async fn pair(&self, chain_id: u64) -> Result<Arc<dyn WalletProvider>, WalletRpcError>;
}

/// One wallet request under a time budget.
///
/// Every external call site is bounded; a wallet that never answers must
/// not stall session transitions or inventory listings.
pub async fn request_with_timeout(
    provider: &dyn WalletProvider,
    method: &str,
    params: Value,
    budget: Duration,
) -> Result<Value, WalletRpcError> {
    match tokio::time::timeout(budget, provider.request(method, params)).await {
        Ok(result) => result,
        Err(_) => Err(WalletRpcError::Timeout {
            method: method.to_string(),
        }),
    }
}
