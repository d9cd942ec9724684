//! Types for JSON-RPC communication with a CometBFT node.
//!
//! Responses are reduced to the fields the scan needs; unknown fields are
//! ignored during deserialization. CometBFT encodes 64-bit integers as JSON
//! strings, which `u64_from_string` handles.

use serde::{Deserialize, Deserializer, Serialize};

/// JSON-RPC 2.0 response envelope used by the CometBFT HTTP endpoints
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct JsonRpcResponse<T> {
    pub jsonrpc: String,

    /// CometBFT answers GET queries with id -1
    #[serde(default)]
    pub id: serde_json::Value,

    #[serde(default)]
    pub result: Option<T>,

    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object
#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Deserialize a string-encoded integer ("1234" -> 1234)
pub fn u64_from_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    value.parse::<u64>().map_err(serde::de::Error::custom)
}

/// Result of the `/block?height=N` query
#[derive(Debug, Clone, Deserialize)]
pub struct BlockResponse {
    pub block: Block,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    #[serde(default)]
    pub data: BlockData,
    #[serde(default)]
    pub last_commit: Commit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockHeader {
    #[serde(default)]
    pub chain_id: String,

    #[serde(deserialize_with = "u64_from_string")]
    pub height: u64,

    pub proposer_address: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockData {
    /// Base64-encoded transactions; only the count matters here
    #[serde(default)]
    pub txs: Vec<String>,
}

/// A block commit: the ordered signature array for one height
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Commit {
    #[serde(default)]
    pub signatures: Vec<CommitSignature>,
}

/// One slot of a commit signature array.
///
/// An empty `validator_address` means no signature was recorded for this
/// slot at this height.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitSignature {
    #[serde(default)]
    pub block_id_flag: i64,

    #[serde(default)]
    pub validator_address: String,

    #[serde(default)]
    pub signature: Option<String>,
}

/// Result of the `/status` query
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub sync_info: SyncInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncInfo {
    /// Oldest height the node can serve; 0 when the field is absent
    /// (pre-0.34 nodes)
    #[serde(default, deserialize_with = "u64_from_string")]
    pub earliest_block_height: u64,

    #[serde(deserialize_with = "u64_from_string")]
    pub latest_block_height: u64,
}

/// Result of the `/consensus_state` query
#[derive(Debug, Clone, Deserialize)]
pub struct ConsensusStateResponse {
    pub round_state: RoundState,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoundState {
    #[serde(rename = "height/round/step", default)]
    pub height_round_step: String,

    #[serde(default)]
    pub height_vote_set: Vec<HeightVoteSet>,
}

/// Votes collected for one round
#[derive(Debug, Clone, Deserialize)]
pub struct HeightVoteSet {
    pub round: i64,

    #[serde(default)]
    pub prevotes: Vec<String>,

    #[serde(default)]
    pub prevotes_bit_array: String,

    #[serde(default)]
    pub precommits: Vec<String>,

    #[serde(default)]
    pub precommits_bit_array: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_response_decodes_string_height() {
        let raw = serde_json::json!({
            "block": {
                "header": {
                    "chain_id": "test-chain",
                    "height": "42",
                    "proposer_address": "AAAA1111"
                },
                "data": { "txs": ["dHgx", "dHgy"] },
                "last_commit": {
                    "signatures": [
                        { "block_id_flag": 2, "validator_address": "AAAA1111", "signature": "c2ln" },
                        { "block_id_flag": 1, "validator_address": "", "signature": null }
                    ]
                }
            }
        });

        let response: BlockResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.block.header.height, 42);
        assert_eq!(response.block.data.txs.len(), 2);
        assert_eq!(response.block.last_commit.signatures.len(), 2);
        assert!(response.block.last_commit.signatures[1].validator_address.is_empty());
    }

    #[test]
    fn test_sync_info_defaults_earliest_height() {
        let raw = serde_json::json!({ "latest_block_height": "100" });
        let info: SyncInfo = serde_json::from_value(raw).unwrap();
        assert_eq!(info.earliest_block_height, 0);
        assert_eq!(info.latest_block_height, 100);
    }

    #[test]
    fn test_bad_height_string_is_rejected() {
        let raw = serde_json::json!({ "latest_block_height": "not-a-number" });
        let result: Result<SyncInfo, _> = serde_json::from_value(raw);
        assert!(result.is_err());
    }
}
