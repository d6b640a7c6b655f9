//! Session event types.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Events emitted by the session state machine after observable
/// transitions.
///
/// Session changes are the sole trigger for invalidating contract handles
/// and re-running inventory resolution; hosts subscribe here instead of
/// polling wallet state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A session was established (connect or silent restore).
    Connected { account: Address, chain_id: u64 },

    /// The wallet re-bound the session to a different account.
    AccountChanged { account: Address },

    /// The active chain changed. `supported` is false when the id is
    /// absent from the chain registry; chain-specific features must be
    /// disabled until a supported chain returns.
    ChainChanged { chain_id: u64, supported: bool },

    /// The session ended (manual disconnect or wallet-emitted).
    Disconnected,
}
