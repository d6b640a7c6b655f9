//! Core error types for the Mintfolio application.
//!
//! Module-specific errors live next to their modules and are composed here.
//! Recoverable per-item failures (one token's probe, one flavor's
//! enumeration) are absorbed where they occur and never reach this type.

use thiserror::Error;

use crate::contracts::ContractError;
use crate::provider::WalletRpcError;
use crate::session::SessionError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the wallet/inventory core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Contract error: {0}")]
    Contract(#[from] ContractError),

    #[error("Wallet RPC failed: {0}")]
    WalletRpc(#[from] WalletRpcError),

    /// The session fingerprint changed while a resolution was in flight.
    /// The caller must drop the result; current state is newer.
    #[error("Session changed while a resolution was in flight")]
    StaleSession,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// True when the failure is the wallet user declining an interactive
    /// request. Callers must not retry these automatically.
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Self::Session(SessionError::UserRejected))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
