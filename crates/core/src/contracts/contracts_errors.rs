//! Contract-level error types.

use thiserror::Error;

use super::contracts_model::Flavor;
use crate::provider::WalletRpcError;

/// Failures deriving or using a contract handle.
#[derive(Error, Debug)]
pub enum ContractError {
    /// No deployed address is registered for this (chain, flavor) pair.
    #[error("No {flavor} contract deployed on chain {chain_id}")]
    UnsupportedChain { chain_id: u64, flavor: Flavor },

    /// The session is not connected.
    #[error("No connected session")]
    NoSession,

    /// The session changed since the handle was derived. Re-derive the
    /// handle; never reuse one across a chain or account switch.
    #[error("Handle for {flavor} is stale; the session changed since it was derived")]
    StaleHandle { flavor: Flavor },

    /// Soulbound tokens are bound to their owner.
    #[error("Soulbound tokens cannot be transferred")]
    SoulboundTransfer,

    /// The chain executed the transaction and reverted it.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    #[error(transparent)]
    Call(#[from] ContractCallError),
}

/// Failures of a single contract read.
#[derive(Error, Debug)]
pub enum ContractCallError {
    #[error("Wallet RPC failed: {0}")]
    Rpc(#[from] WalletRpcError),

    #[error("ABI decode failed: {0}")]
    Decode(String),
}
