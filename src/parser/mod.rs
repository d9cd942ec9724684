//! Normalization of raw block payloads.
//!
//! Both sources (local store, remote RPC) are reduced to the same
//! per-height shape before anything reaches the aggregators.

pub mod block;

// Re-export main types
pub use block::{commit_slots, summarize_rpc, summarize_stored, BlockSummary, SlotEntry, StoredBlock};
