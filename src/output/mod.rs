//! Report writers for scan results.
//!
//! Three CSV tables per scan: per-height proposers, per-proposer totals,
//! and per-validator slot runs. Column order and presence are a contract
//! with downstream consumers.

pub mod csv;

// Re-export main functions
pub use csv::{
    write_proposer_report, write_proposer_totals_report, write_validator_runs_report, ReportPaths,
};
