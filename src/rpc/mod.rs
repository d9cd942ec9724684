//! HTTP client and wire types for the CometBFT RPC interface.

pub mod client;
pub mod types;

// Re-export main types
pub use client::RpcClient;
pub use types::{
    Block, BlockHeader, BlockResponse, Commit, CommitSignature, ConsensusStateResponse,
    HeightVoteSet, JsonRpcError, JsonRpcResponse, RoundState, StatusResponse, SyncInfo,
};
