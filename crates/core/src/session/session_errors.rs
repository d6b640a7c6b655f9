//! Session-level error type.

use thiserror::Error;

/// Failures surfaced to the caller for user-facing messaging.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The wallet user declined an interactive request. Callers decide
    /// whether to re-prompt; nothing retries this automatically.
    #[error("The wallet declined the request")]
    UserRejected,

    /// The host exposes no wallet injection at all. Remote pairing is the
    /// caller's explicit alternative.
    #[error("No wallet injection found in the host environment")]
    NoInjectedProvider,

    /// Injections exist, but none speaks the EVM provider interface.
    #[error("No EVM wallet provider among the injected wallets")]
    NoEvmProvider,

    /// The operation needs a connected session.
    #[error("No wallet session is connected")]
    NotConnected,

    /// The requested chain is not in the chain registry.
    #[error("Chain {0} is not in the chain registry")]
    ChainNotRegistered(u64),

    /// The wallet granted the connection but returned no accounts.
    #[error("Wallet returned no accounts")]
    NoAccounts,
}
