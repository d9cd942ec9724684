//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur during RPC communication
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),

    #[error("Height {0} is not available on this node")]
    HeightNotAvailable(u64),
}

/// Errors that can occur while reading the local block store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Block store unavailable: {0}")]
    Backend(#[from] sled::Error),

    #[error("Failed to encode stored block: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Block {0} is not present in this store")]
    MissingBlock(u64),

    #[error("Block store has no blocks")]
    Empty,

    #[error("Malformed store entry: {0}")]
    Corrupt(String),
}

/// Errors that can occur while decoding a block payload into the
/// normalized per-height shape
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Decoded height {got} does not match requested height {expected}")]
    HeightMismatch { expected: u64, got: u64 },
}

/// Unified error for block sources; the aggregation loop does not care
/// which kind of source it is driving.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Caller errors rejected by the aggregators
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Heights must be processed in ascending order with no gaps: expected {expected}, got {got}")]
    OutOfOrderHeight { expected: u64, got: u64 },

    #[error("Proposer already recorded for height {0}")]
    DuplicateProposerHeight(u64),

    #[error("Empty proposer address at height {0}")]
    EmptyProposerAddress(u64),
}

/// Requested height range cannot be served by the source
#[derive(Error, Debug)]
pub enum RangeError {
    #[error("Start height {start} is after end height {end}")]
    StartAfterEnd { start: u64, end: u64 },

    #[error("{start} is not available on this data, available starting height: {lowest}")]
    StartBelowLowest { start: u64, lowest: u64 },

    #[error("{end} is not available, latest height: {latest}")]
    EndAboveLatest { end: u64, latest: u64 },

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Errors that can occur while writing CSV reports
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write report: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to encode CSV row: {0}")]
    CsvFailed(#[from] csv::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
