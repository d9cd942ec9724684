//! Local block source backed by the `sled` embedded database.
//!
//! Layout: tree "blocks", key = height as big-endian u64 bytes, value =
//! one JSON-encoded `StoredBlock`. Big-endian keys keep sled's iteration
//! order equal to height order.

use crate::parser::block::{summarize_stored, BlockSummary, StoredBlock};
use crate::source::BlockSource;
use crate::utils::error::{SourceError, StoreError};
use log::debug;
use sled::{Db, Tree};
use std::path::Path;

const BLOCKS_TREE: &str = "blocks";

/// Block store rooted at a chain data directory
pub struct StoreSource {
    blocks: Tree,
    path: String,
    _db: Db,
}

impl StoreSource {
    /// Open the block store under `dir`
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = dir.as_ref().display().to_string();
        let db = sled::open(dir)?;
        let blocks = db.open_tree(BLOCKS_TREE)?;

        debug!("opened block store at {}", path);

        Ok(Self {
            blocks,
            path,
            _db: db,
        })
    }

    /// Persist one block under its height key
    pub fn put_block(&self, block: &StoredBlock) -> Result<(), StoreError> {
        let raw = serde_json::to_vec(block)?;
        self.blocks.insert(block.height.to_be_bytes(), raw)?;
        Ok(())
    }

    fn raw_block(&self, height: u64) -> Result<Option<sled::IVec>, StoreError> {
        Ok(self.blocks.get(height.to_be_bytes())?)
    }
}

impl BlockSource for StoreSource {
    fn describe(&self) -> String {
        format!("block store {}", self.path)
    }

    /// Linear scan from height 0 upward until the first present height.
    ///
    /// A one-time startup cost; tolerates sparse or pruned stores.
    fn lowest_height(&self) -> Result<u64, SourceError> {
        let latest = self.latest_height()?;

        for height in 0..=latest {
            if self.raw_block(height)?.is_some() {
                debug!("available starting height: {}", height);
                return Ok(height);
            }
        }

        Err(StoreError::Empty.into())
    }

    fn latest_height(&self) -> Result<u64, SourceError> {
        match self.blocks.last().map_err(StoreError::Backend)? {
            Some((key, _)) => Ok(decode_height_key(&key)?),
            None => Err(StoreError::Empty.into()),
        }
    }

    fn block_summary(&self, height: u64) -> Result<BlockSummary, SourceError> {
        let raw = self
            .raw_block(height)?
            .ok_or(StoreError::MissingBlock(height))?;

        Ok(summarize_stored(height, &raw)?)
    }
}

fn decode_height_key(key: &[u8]) -> Result<u64, StoreError> {
    let bytes: [u8; 8] = key
        .try_into()
        .map_err(|_| StoreError::Corrupt(format!("height key of {} bytes", key.len())))?;
    Ok(u64::from_be_bytes(bytes))
}
