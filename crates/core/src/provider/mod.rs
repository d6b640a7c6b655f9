//! Provider module - wallet injection discovery and the wallet RPC seam.

mod locator;
mod provider_errors;
mod provider_model;
mod provider_traits;

pub use locator::locate;
pub use provider_errors::{WalletRpcError, UNRECOGNIZED_CHAIN_CODE, USER_REJECTED_CODE};
pub use provider_model::{parse_hex_u64, HostEnvironment, InjectedProvider, WalletEvent};
pub use provider_traits::{request_with_timeout, RemotePairing, WalletProvider};
