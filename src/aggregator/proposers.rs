//! Proposer activity aggregation.
//!
//! Purely additive counters: per-height records kept verbatim for row-level
//! reporting, plus cumulative totals per proposer address. Unlike the commit
//! aggregator there is no ordering dependency between heights.

use crate::utils::error::AggregateError;
use std::collections::{BTreeMap, HashMap};

/// Verbatim record of one height's proposer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposerRecord {
    pub height: u64,
    pub proposer_address: String,
    pub tx_count: usize,
}

/// Cumulative totals for one proposer address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProposerTotals {
    /// Number of heights this address proposed
    pub proposing_count: u64,

    /// Transactions across all heights it proposed
    pub tx_count: u64,
}

/// Accumulates proposer activity over a scan
#[derive(Debug, Default)]
pub struct ProposerAggregator {
    by_height: BTreeMap<u64, ProposerRecord>,
    totals: HashMap<String, ProposerTotals>,
    sighting_order: Vec<String>,
}

impl ProposerAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one height's proposer and transaction count.
    ///
    /// # Errors
    /// * `AggregateError::EmptyProposerAddress` - the address is empty
    /// * `AggregateError::DuplicateProposerHeight` - the height was already
    ///   recorded; accepting it again would corrupt the totals
    pub fn observe(
        &mut self,
        height: u64,
        proposer_address: &str,
        tx_count: usize,
    ) -> Result<(), AggregateError> {
        if proposer_address.is_empty() {
            return Err(AggregateError::EmptyProposerAddress(height));
        }
        if self.by_height.contains_key(&height) {
            return Err(AggregateError::DuplicateProposerHeight(height));
        }

        self.by_height.insert(
            height,
            ProposerRecord {
                height,
                proposer_address: proposer_address.to_string(),
                tx_count,
            },
        );

        if !self.totals.contains_key(proposer_address) {
            self.sighting_order.push(proposer_address.to_string());
        }
        let totals = self.totals.entry(proposer_address.to_string()).or_default();
        totals.proposing_count += 1;
        totals.tx_count += tx_count as u64;

        Ok(())
    }

    /// Per-height records in ascending height order
    pub fn records(&self) -> impl Iterator<Item = &ProposerRecord> {
        self.by_height.values()
    }

    /// Per-proposer totals in first-sighting order
    pub fn totals(&self) -> impl Iterator<Item = (&str, &ProposerTotals)> {
        self.sighting_order
            .iter()
            .filter_map(|address| self.totals.get(address).map(|t| (address.as_str(), t)))
    }

    /// Look up the totals for one proposer address
    pub fn total_for(&self, address: &str) -> Option<&ProposerTotals> {
        self.totals.get(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_accumulate_across_heights() {
        // P1 proposes heights 10 (5 txs) and 12 (3 txs)
        let mut aggregator = ProposerAggregator::new();
        aggregator.observe(10, "P1", 5).unwrap();
        aggregator.observe(11, "P2", 7).unwrap();
        aggregator.observe(12, "P1", 3).unwrap();

        let totals = aggregator.total_for("P1").unwrap();
        assert_eq!(totals.proposing_count, 2);
        assert_eq!(totals.tx_count, 8);

        let totals = aggregator.total_for("P2").unwrap();
        assert_eq!(totals.proposing_count, 1);
        assert_eq!(totals.tx_count, 7);
    }

    #[test]
    fn test_records_keep_height_order() {
        // no ordering dependency on input
        let mut aggregator = ProposerAggregator::new();
        aggregator.observe(12, "P1", 3).unwrap();
        aggregator.observe(10, "P1", 5).unwrap();
        aggregator.observe(11, "P2", 7).unwrap();

        let heights: Vec<_> = aggregator.records().map(|r| r.height).collect();
        assert_eq!(heights, vec![10, 11, 12]);
    }

    #[test]
    fn test_totals_iterate_in_first_sighting_order() {
        let mut aggregator = ProposerAggregator::new();
        aggregator.observe(1, "P2", 0).unwrap();
        aggregator.observe(2, "P1", 0).unwrap();
        aggregator.observe(3, "P2", 0).unwrap();

        let order: Vec<_> = aggregator.totals().map(|(address, _)| address).collect();
        assert_eq!(order, vec!["P2", "P1"]);
    }

    #[test]
    fn test_empty_address_is_rejected() {
        let mut aggregator = ProposerAggregator::new();
        assert!(matches!(
            aggregator.observe(1, "", 0),
            Err(AggregateError::EmptyProposerAddress(1))
        ));
    }

    #[test]
    fn test_duplicate_height_is_rejected() {
        let mut aggregator = ProposerAggregator::new();
        aggregator.observe(5, "P1", 2).unwrap();

        assert!(matches!(
            aggregator.observe(5, "P1", 2),
            Err(AggregateError::DuplicateProposerHeight(5))
        ));

        // totals untouched by the rejected call
        assert_eq!(aggregator.total_for("P1").unwrap().proposing_count, 1);
        assert_eq!(aggregator.total_for("P1").unwrap().tx_count, 2);
    }
}
