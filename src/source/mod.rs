//! Block data sources and pre-flight range validation.
//!
//! Two concrete sources exist: the local block store and a remote CometBFT
//! RPC endpoint. Both normalize their payloads into `BlockSummary` before
//! anything reaches the aggregators, which stay agnostic to the source kind.

pub mod rpc;
pub mod store;

use crate::parser::block::BlockSummary;
use crate::utils::error::{RangeError, SourceError};
use log::info;

// Re-export the concrete sources
pub use rpc::RpcSource;
pub use store::StoreSource;

/// A source of per-height block facts
pub trait BlockSource {
    /// Human-readable locator for startup banners and diagnostics
    fn describe(&self) -> String;

    /// Lowest height this source can serve
    fn lowest_height(&self) -> Result<u64, SourceError>;

    /// Highest height this source can serve
    fn latest_height(&self) -> Result<u64, SourceError>;

    /// Load and normalize the block facts for `height`.
    ///
    /// A height inside the advertised range that cannot be served is an
    /// error, never a skip.
    fn block_summary(&self, height: u64) -> Result<BlockSummary, SourceError>;
}

/// Validated height range, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightRange {
    pub start: u64,
    pub end: u64,
}

impl HeightRange {
    /// Number of heights in the range
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Heights in ascending order
    pub fn heights(&self) -> std::ops::RangeInclusive<u64> {
        self.start..=self.end
    }
}

/// Check the requested range against what the source can serve.
///
/// Runs once before any aggregation work, so a bad range is a clean
/// diagnostic instead of a failure partway through a scan.
///
/// # Errors
/// * `RangeError::StartAfterEnd` - start > end
/// * `RangeError::StartBelowLowest` - start precedes the first available height
/// * `RangeError::EndAboveLatest` - end exceeds the latest available height
/// * `RangeError::Source` - the source could not report its bounds
pub fn validate_range(
    source: &dyn BlockSource,
    start: u64,
    end: u64,
) -> Result<HeightRange, RangeError> {
    if start > end {
        return Err(RangeError::StartAfterEnd { start, end });
    }

    let lowest = source.lowest_height()?;
    if start < lowest {
        return Err(RangeError::StartBelowLowest { start, lowest });
    }

    let latest = source.latest_height()?;
    info!("Latest Height: {}", latest);
    if end > latest {
        return Err(RangeError::EndAboveLatest { end, latest });
    }

    Ok(HeightRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source with fixed bounds and empty blocks
    struct FixedSource {
        lowest: u64,
        latest: u64,
    }

    impl BlockSource for FixedSource {
        fn describe(&self) -> String {
            "fixed".to_string()
        }

        fn lowest_height(&self) -> Result<u64, SourceError> {
            Ok(self.lowest)
        }

        fn latest_height(&self) -> Result<u64, SourceError> {
            Ok(self.latest)
        }

        fn block_summary(&self, height: u64) -> Result<BlockSummary, SourceError> {
            Ok(BlockSummary {
                height,
                proposer_address: "P1".to_string(),
                tx_count: 0,
                slots: Vec::new(),
            })
        }
    }

    #[test]
    fn test_height_range_len_is_inclusive() {
        let range = HeightRange { start: 100, end: 102 };
        assert_eq!(range.len(), 3);
        assert_eq!(range.heights().collect::<Vec<_>>(), vec![100, 101, 102]);
    }

    #[test]
    fn test_single_height_range() {
        let range = HeightRange { start: 7, end: 7 };
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn test_validate_range_accepts_servable_range() {
        let source = FixedSource { lowest: 10, latest: 100 };
        let range = validate_range(&source, 10, 100).unwrap();
        assert_eq!(range, HeightRange { start: 10, end: 100 });
    }

    #[test]
    fn test_validate_range_rejects_inverted_range() {
        let source = FixedSource { lowest: 10, latest: 100 };
        assert!(matches!(
            validate_range(&source, 50, 20),
            Err(RangeError::StartAfterEnd { start: 50, end: 20 })
        ));
    }

    #[test]
    fn test_validate_range_rejects_start_below_lowest() {
        let source = FixedSource { lowest: 10, latest: 100 };
        assert!(matches!(
            validate_range(&source, 5, 20),
            Err(RangeError::StartBelowLowest { start: 5, lowest: 10 })
        ));
    }

    #[test]
    fn test_validate_range_rejects_end_above_latest() {
        let source = FixedSource { lowest: 10, latest: 100 };
        assert!(matches!(
            validate_range(&source, 50, 101),
            Err(RangeError::EndAboveLatest { end: 101, latest: 100 })
        ));
    }
}
