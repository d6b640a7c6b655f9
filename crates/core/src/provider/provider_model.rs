//! Host environment and wallet event types.

use std::fmt;
use std::sync::Arc;

use alloy_primitives::Address;

use super::provider_errors::WalletRpcError;
use super::provider_traits::WalletProvider;

/// One wallet object the host page exposes.
///
/// `evm` is false for injections that claim the shared slot but speak a
/// different chain family (e.g. a Solana-only wallet).
#[derive(Clone)]
pub struct InjectedProvider {
    /// Wallet brand, for logs and UI ("MetaMask", "Trust Wallet", ...).
    pub label: String,
    pub evm: bool,
    pub provider: Arc<dyn WalletProvider>,
}

impl InjectedProvider {
    pub fn new(label: impl Into<String>, evm: bool, provider: Arc<dyn WalletProvider>) -> Self {
        Self {
            label: label.into(),
            evm,
            provider,
        }
    }
}

impl fmt::Debug for InjectedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectedProvider")
            .field("label", &self.label)
            .field("evm", &self.evm)
            .finish()
    }
}

/// Snapshot of the wallet injections visible to the page.
///
/// Built synchronously by the host adapter; locating a provider makes no
/// network calls.
#[derive(Clone, Debug, Default)]
pub struct HostEnvironment {
    injected: Vec<InjectedProvider>,
}

impl HostEnvironment {
    /// An environment with no wallet injection at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// An environment exposing the given injections, in announcement order.
    pub fn with_injected(injected: Vec<InjectedProvider>) -> Self {
        Self { injected }
    }

    pub fn injected(&self) -> &[InjectedProvider] {
        &self.injected
    }
}

/// Wallet-emitted notifications, delivered as inbound messages to the
/// session state machine. Host adapters translate the raw EIP-1193 event
/// payloads into these values.
#[derive(Clone, Debug, PartialEq)]
pub enum WalletEvent {
    AccountsChanged(Vec<Address>),
    ChainChanged(u64),
    Disconnected,
}

/// Parse a 0x-prefixed hex quantity as wallets emit for chain ids and
/// block numbers.
pub fn parse_hex_u64(raw: &str) -> Result<u64, WalletRpcError> {
    let digits = raw.trim().trim_start_matches("0x");
    u64::from_str_radix(digits, 16)
        .map_err(|_| WalletRpcError::Malformed(format!("hex quantity: {raw}")))
}
