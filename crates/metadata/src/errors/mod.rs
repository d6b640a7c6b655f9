//! Error types and retry classification for the metadata crate.
//!
//! This module provides:
//! - [`MetadataError`]: The main error enum for all metadata operations
//! - [`RetryClass`]: Classification for determining cascade behavior

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur while fetching or parsing token metadata.
///
/// Each variant is classified into a [`RetryClass`] via the
/// [`retry_class`](Self::retry_class) method, which determines how the
/// gateway registry should handle the error.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// The raw URI matched none of the accepted textual forms.
    /// This is a terminal error - no gateway can serve it.
    #[error("Unrecognized content URI: {0}")]
    UnrecognizedUri(String),

    /// The cache proxy has no entry for this identifier (HTTP 404).
    /// A miss, not a failure - the next gateway is tried.
    #[error("Not cached: {gateway}")]
    NotCached {
        /// The gateway that reported the miss
        gateway: String,
    },

    /// The gateway answered with a non-success status.
    #[error("Gateway status {status}: {gateway}")]
    GatewayStatus {
        /// The gateway that answered
        gateway: String,
        /// The HTTP status code returned
        status: u16,
    },

    /// The request to the gateway exceeded its per-attempt budget.
    #[error("Timeout: {gateway}")]
    Timeout {
        /// The gateway that timed out
        gateway: String,
    },

    /// The gateway served a document that is not a metadata record.
    /// Another gateway may hold an intact copy.
    #[error("Invalid record from {gateway}: {message}")]
    InvalidRecord {
        /// The gateway that served the document
        gateway: String,
        /// Description of the parse failure
        message: String,
    },

    /// A network error occurred while communicating with a gateway.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MetadataError {
    /// Returns the retry classification for this error.
    ///
    /// - [`RetryClass::Never`]: terminal, the cascade stops
    /// - [`RetryClass::NextGateway`]: advance to the next gateway in order
    pub fn retry_class(&self) -> RetryClass {
        match self {
            // Terminal - no gateway can resolve an unparseable identifier
            Self::UnrecognizedUri(_) => RetryClass::Never,

            // Per-gateway misses and failures - advance the cascade
            Self::NotCached { .. }
            | Self::GatewayStatus { .. }
            | Self::Timeout { .. }
            | Self::InvalidRecord { .. }
            | Self::Network(_) => RetryClass::NextGateway,
        }
    }
}
