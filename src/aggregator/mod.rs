//! Aggregation of per-height block facts into participation statistics.
//!
//! This module holds the two accumulators driven by the scan loop:
//! - Commit run-length aggregation (per-validator slot runs)
//! - Proposer activity totals

pub mod commits;
pub mod proposers;

// Re-export main types
pub use commits::{CommitAggregator, EmptySlotRecord, ValidatorRecord, ValidatorRun};
pub use proposers::{ProposerAggregator, ProposerRecord, ProposerTotals};
