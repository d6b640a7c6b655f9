//! Session module - the wallet session value and its state machine.

mod session_errors;
mod session_model;
mod session_service;

#[cfg(test)]
mod session_service_tests;

pub use session_errors::SessionError;
pub use session_model::{SessionFailure, SessionFingerprint, SessionStatus, WalletSession};
pub use session_service::SessionManager;
