//! Wallet RPC error type.

use thiserror::Error;

/// EIP-1193 error code for a user-declined interactive request.
pub const USER_REJECTED_CODE: i64 = 4001;

/// EIP-1193 error code for a chain the wallet has no entry for.
pub const UNRECOGNIZED_CHAIN_CODE: i64 = 4902;

/// Failures crossing the wallet provider boundary.
#[derive(Error, Debug, Clone)]
pub enum WalletRpcError {
    /// The wallet answered with a JSON-RPC error object.
    #[error("Wallet RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The request exceeded its time budget.
    #[error("Wallet request timed out: {method}")]
    Timeout { method: String },

    /// The transport to the wallet failed outright.
    #[error("Wallet transport failure: {0}")]
    Transport(String),

    /// The wallet answered with a shape the caller cannot use.
    #[error("Malformed wallet response: {0}")]
    Malformed(String),
}

impl WalletRpcError {
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        Self::Rpc {
            code,
            message: message.into(),
        }
    }

    /// The user declined the request. Never retried automatically.
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Self::Rpc { code, .. } if *code == USER_REJECTED_CODE)
    }

    /// The wallet does not know the requested chain; an add-chain request
    /// may register it.
    pub fn is_unrecognized_chain(&self) -> bool {
        matches!(self, Self::Rpc { code, .. } if *code == UNRECOGNIZED_CHAIN_CODE)
    }
}
