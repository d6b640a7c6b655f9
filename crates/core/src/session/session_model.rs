//! Wallet session value types.

use alloy_primitives::Address;
use serde::Serialize;

/// Connection lifecycle of the wallet session.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Disconnected,
    Connecting,
    Connected,
    SwitchingChain,
    Error,
}

/// Why the last transition failed.
///
/// A declined interactive request is kept distinct from every other
/// failure; callers must never auto-retry a rejection.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionFailure {
    Rejected,
    Failed(String),
}

/// The single mutable aggregate for wallet connection state.
///
/// Mutated exclusively by the session state machine, either on caller
/// operations or on wallet-emitted events. Every observable mutation bumps
/// the epoch, which is what stale in-flight work is detected against.
#[derive(Clone, Debug, PartialEq)]
pub struct WalletSession {
    pub status: SessionStatus,
    pub account: Option<Address>,
    pub chain_id: Option<u64>,
    /// False while the bound chain is absent from the chain registry.
    pub chain_supported: bool,
    pub last_error: Option<SessionFailure>,
    epoch: u64,
}

impl WalletSession {
    pub fn disconnected() -> Self {
        Self {
            status: SessionStatus::Disconnected,
            account: None,
            chain_id: None,
            chain_supported: false,
            last_error: None,
            epoch: 0,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.status == SessionStatus::Connected
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Record an observable mutation.
    pub(crate) fn touch(&mut self) {
        self.epoch += 1;
    }

    /// Capture the identity of this session state for stale-result
    /// detection: in-flight work compares its captured fingerprint against
    /// the current one at completion time and discards on mismatch.
    pub fn fingerprint(&self) -> SessionFingerprint {
        SessionFingerprint {
            epoch: self.epoch,
            chain_id: self.chain_id,
            account: self.account,
        }
    }
}

impl Default for WalletSession {
    fn default() -> Self {
        Self::disconnected()
    }
}

/// Captured (epoch, chain, account) triple of a session state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SessionFingerprint {
    pub epoch: u64,
    pub chain_id: Option<u64>,
    pub account: Option<Address>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_is_disconnected() {
        let session = WalletSession::disconnected();
        assert_eq!(session.status, SessionStatus::Disconnected);
        assert!(session.account.is_none());
        assert!(session.chain_id.is_none());
        assert!(!session.is_connected());
    }

    #[test]
    fn test_touch_changes_fingerprint() {
        let mut session = WalletSession::disconnected();
        let before = session.fingerprint();
        session.touch();
        assert_ne!(before, session.fingerprint());
    }

    #[test]
    fn test_fingerprint_carries_bindings() {
        let mut session = WalletSession::disconnected();
        session.account = Some(Address::ZERO);
        session.chain_id = Some(137);
        let fp = session.fingerprint();
        assert_eq!(fp.chain_id, Some(137));
        assert_eq!(fp.account, Some(Address::ZERO));
    }
}
