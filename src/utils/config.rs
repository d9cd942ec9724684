//! Configuration and constants for the CLI.

use std::time::Duration;

/// Default timeout for RPC requests
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Scans log a progress heartbeat every this many heights
pub const PROGRESS_LOG_INTERVAL: u64 = 10_000;

// Report file name prefixes. Reports are written as
// `<prefix>-<start>-<end>.csv` in the chosen output directory.
pub const PROPOSER_REPORT_PREFIX: &str = "proposer";
pub const PROPOSER_TX_REPORT_PREFIX: &str = "proposer-tx";
pub const VALIDATOR_REPORT_PREFIX: &str = "data";
