//! Retry classification for gateway failures.

/// How the gateway registry should react to a failed fetch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Terminal failure - stop the cascade and report unavailable.
    Never,
    /// Advance to the next gateway in the cascade.
    NextGateway,
}
