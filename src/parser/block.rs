//! Per-height block facts and the decoders that produce them.

use crate::rpc::types::{BlockResponse, Commit};
use crate::utils::error::DecodeError;
use serde::{Deserialize, Serialize};

/// One position in a height's commit signature array.
///
/// The slot index is the entry's position in the array; it is not a stable
/// validator identity by itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotEntry {
    /// The validator at this slot signed the commit
    Signed { validator_address: String },

    /// No signature was recorded for this slot
    Absent,
}

impl SlotEntry {
    /// Convenience constructor for a signed slot
    pub fn signed(validator_address: impl Into<String>) -> Self {
        Self::Signed {
            validator_address: validator_address.into(),
        }
    }
}

/// Normalized per-height facts consumed by the aggregators, identical for
/// both source kinds.
#[derive(Debug, Clone)]
pub struct BlockSummary {
    pub height: u64,
    pub proposer_address: String,
    pub tx_count: usize,
    pub slots: Vec<SlotEntry>,
}

/// Block payload as persisted in the local store, one JSON document per
/// height.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredBlock {
    pub height: u64,
    pub proposer_address: String,
    #[serde(default)]
    pub tx_count: usize,
    /// The commit recorded for this height
    #[serde(default)]
    pub commit: Commit,
}

/// Decode a stored block into the normalized shape
///
/// # Errors
/// * `DecodeError::JsonError` - payload is not a valid `StoredBlock`
/// * `DecodeError::HeightMismatch` - entry was filed under the wrong height
pub fn summarize_stored(height: u64, raw: &[u8]) -> Result<BlockSummary, DecodeError> {
    let stored: StoredBlock = serde_json::from_slice(raw)?;

    if stored.height != height {
        return Err(DecodeError::HeightMismatch {
            expected: height,
            got: stored.height,
        });
    }

    Ok(BlockSummary {
        height,
        proposer_address: stored.proposer_address,
        tx_count: stored.tx_count,
        slots: commit_slots(&stored.commit),
    })
}

/// Reduce an RPC block response to the normalized shape.
///
/// The signature array comes from the block's `last_commit`, the commit
/// carried inside the block at `height`.
pub fn summarize_rpc(height: u64, response: &BlockResponse) -> Result<BlockSummary, DecodeError> {
    let header = &response.block.header;

    if header.height != height {
        return Err(DecodeError::HeightMismatch {
            expected: height,
            got: header.height,
        });
    }

    Ok(BlockSummary {
        height,
        proposer_address: header.proposer_address.clone(),
        tx_count: response.block.data.txs.len(),
        slots: commit_slots(&response.block.last_commit),
    })
}

/// Map a commit's signature array into slot entries; an empty validator
/// address marks the slot as carrying no signature.
pub fn commit_slots(commit: &Commit) -> Vec<SlotEntry> {
    commit
        .signatures
        .iter()
        .map(|signature| {
            if signature.validator_address.is_empty() {
                SlotEntry::Absent
            } else {
                SlotEntry::Signed {
                    validator_address: signature.validator_address.clone(),
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::types::CommitSignature;

    fn commit_with(addresses: &[&str]) -> Commit {
        Commit {
            signatures: addresses
                .iter()
                .map(|address| CommitSignature {
                    block_id_flag: if address.is_empty() { 1 } else { 2 },
                    validator_address: address.to_string(),
                    signature: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_commit_slots_marks_empty_addresses_absent() {
        let slots = commit_slots(&commit_with(&["V1", "", "V2"]));

        assert_eq!(
            slots,
            vec![
                SlotEntry::signed("V1"),
                SlotEntry::Absent,
                SlotEntry::signed("V2"),
            ]
        );
    }

    #[test]
    fn test_summarize_stored_round_trip() {
        let stored = StoredBlock {
            height: 7,
            proposer_address: "P1".to_string(),
            tx_count: 3,
            commit: commit_with(&["V1", "V2"]),
        };
        let raw = serde_json::to_vec(&stored).unwrap();

        let summary = summarize_stored(7, &raw).unwrap();

        assert_eq!(summary.height, 7);
        assert_eq!(summary.proposer_address, "P1");
        assert_eq!(summary.tx_count, 3);
        assert_eq!(summary.slots.len(), 2);
    }

    #[test]
    fn test_summarize_stored_rejects_height_mismatch() {
        let stored = StoredBlock {
            height: 8,
            proposer_address: "P1".to_string(),
            tx_count: 0,
            commit: Commit::default(),
        };
        let raw = serde_json::to_vec(&stored).unwrap();

        match summarize_stored(7, &raw) {
            Err(DecodeError::HeightMismatch { expected: 7, got: 8 }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_summarize_stored_rejects_garbage() {
        assert!(summarize_stored(1, b"not json").is_err());
    }
}
