//! Shared tuning constants.

use std::time::Duration;

/// Budget for wallet requests that wait on user interaction.
pub const INTERACTIVE_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Budget for non-interactive wallet RPC (reads, receipt polls).
pub const WALLET_CALL_TIMEOUT: Duration = Duration::from_secs(15);

/// Concurrent ownership probes during a fallback scan.
pub const SCAN_CONCURRENCY: usize = 8;

/// Scan window when a contract does not report its issued count.
pub const DEFAULT_SCAN_WINDOW: u64 = 100;

/// Hard ceiling on any scan window; contract-reported supply is untrusted.
pub const MAX_SCAN_WINDOW: u64 = 10_000;

/// Concurrent metadata resolutions per inventory listing.
pub const METADATA_CONCURRENCY: usize = 4;

/// Poll interval while waiting for a transaction receipt.
pub const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Total budget for receipt confirmation.
pub const RECEIPT_WAIT_TIMEOUT: Duration = Duration::from_secs(180);
