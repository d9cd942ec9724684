//! Commit run-length aggregation.
//!
//! Given the commit signature arrays of consecutive heights, this module
//! reconstructs, per validator, the contiguous "slot runs": periods during
//! which a validator occupied a stable position in the signature array.
//! Signed heights are counted per run; slots with no signature are tracked
//! separately by slot index.

use crate::parser::block::SlotEntry;
use crate::utils::error::AggregateError;
use log::debug;
use std::collections::{BTreeMap, HashMap};

/// A maximal contiguous range of heights during which one validator
/// occupied the same slot index in the commit signature array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorRun {
    /// Position in the signature array
    pub slot: usize,

    /// First height of the run (inclusive)
    pub start_height: u64,

    /// Last height of the run (inclusive)
    pub end_height: u64,

    /// Number of heights at which the validator actually signed
    pub commit_count: u64,
}

impl ValidatorRun {
    fn opened(slot: usize, height: u64) -> Self {
        Self {
            slot,
            start_height: height,
            end_height: height,
            commit_count: 1,
        }
    }

    /// Inclusive height span of the run
    pub fn block_count(&self) -> u64 {
        self.end_height - self.start_height + 1
    }

    /// Shortfall between the run's span and its signature count.
    ///
    /// Can be positive even though every counted height carried a
    /// signature: a validator that disappears and later returns to the
    /// same slot index extends its old run across the gap.
    pub fn missed_commits(&self) -> u64 {
        self.block_count().saturating_sub(self.commit_count)
    }
}

/// Per-validator run history.
///
/// The run currently being extended is held in an explicit `active` field
/// rather than re-derived from the end of the run list on every height.
#[derive(Debug, Clone)]
pub struct ValidatorRecord {
    pub validator_address: String,
    closed: Vec<ValidatorRun>,
    active: ValidatorRun,
    slot_count: usize,
}

impl ValidatorRecord {
    fn new(validator_address: String, slot: usize, height: u64) -> Self {
        Self {
            validator_address,
            closed: Vec::new(),
            active: ValidatorRun::opened(slot, height),
            slot_count: 1,
        }
    }

    /// Number of runs so far, the active one included
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Runs in ascending start-height order, the active run last
    pub fn runs(&self) -> impl Iterator<Item = &ValidatorRun> {
        self.closed.iter().chain(std::iter::once(&self.active))
    }

    /// Fold one sighting into the run history.
    ///
    /// The decision compares slot indices only, never height contiguity: a
    /// validator reappearing at the slot of its active run extends that run
    /// even when heights were skipped in between.
    fn observe(&mut self, slot: usize, height: u64) {
        if slot == self.active.slot {
            self.active.end_height = height;
            self.active.commit_count += 1;
        } else {
            let next = ValidatorRun::opened(slot, height);
            self.closed.push(std::mem::replace(&mut self.active, next));
            self.slot_count += 1;
        }
    }
}

/// Heights at which one slot index carried no signature
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmptySlotRecord {
    pub heights: Vec<u64>,
}

/// The commit run-length aggregator.
///
/// **Contract**: `process` is called exactly once per height, in strictly
/// ascending order, for every height of the scanned range. Out-of-order,
/// gapped, or repeated calls are caller errors and are rejected instead of
/// silently producing wrong run boundaries.
///
/// All state is exclusively owned by the aggregator for the duration of one
/// scan; there is no I/O anywhere in this type.
#[derive(Debug, Default)]
pub struct CommitAggregator {
    validators: HashMap<String, ValidatorRecord>,
    sighting_order: Vec<String>,
    empty_slots: BTreeMap<usize, EmptySlotRecord>,
    next_height: Option<u64>,
}

impl CommitAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one height's commit signature array into the running state.
    ///
    /// # Arguments
    /// * `height` - the height being processed; must be the successor of
    ///   the previously processed height (any height is accepted first)
    /// * `slots` - the ordered signature array for that height
    ///
    /// # Errors
    /// * `AggregateError::OutOfOrderHeight` - `height` is not the expected
    ///   successor
    pub fn process(&mut self, height: u64, slots: &[SlotEntry]) -> Result<(), AggregateError> {
        if let Some(expected) = self.next_height {
            if height != expected {
                return Err(AggregateError::OutOfOrderHeight {
                    expected,
                    got: height,
                });
            }
        }
        self.next_height = Some(height + 1);

        for (slot, entry) in slots.iter().enumerate() {
            match entry {
                SlotEntry::Absent => {
                    self.empty_slots
                        .entry(slot)
                        .or_default()
                        .heights
                        .push(height);
                }
                SlotEntry::Signed { validator_address } => {
                    if let Some(record) = self.validators.get_mut(validator_address) {
                        record.observe(slot, height);
                    } else {
                        debug!("first sighting of {} at slot {}", validator_address, slot);
                        self.sighting_order.push(validator_address.clone());
                        self.validators.insert(
                            validator_address.clone(),
                            ValidatorRecord::new(validator_address.clone(), slot, height),
                        );
                    }
                }
            }
        }

        Ok(())
    }

    /// Validator records in first-sighting order
    pub fn validators(&self) -> impl Iterator<Item = &ValidatorRecord> {
        self.sighting_order
            .iter()
            .filter_map(|address| self.validators.get(address))
    }

    /// Look up one validator's record
    pub fn validator(&self, address: &str) -> Option<&ValidatorRecord> {
        self.validators.get(address)
    }

    /// Empty-slot records in ascending slot order
    pub fn empty_slots(&self) -> impl Iterator<Item = (usize, &EmptySlotRecord)> {
        self.empty_slots.iter().map(|(slot, record)| (*slot, record))
    }

    /// Look up the empty-signature record for one slot index
    pub fn empty_slot(&self, slot: usize) -> Option<&EmptySlotRecord> {
        self.empty_slots.get(&slot)
    }

    /// Last height folded in, if any
    pub fn last_height(&self) -> Option<u64> {
        self.next_height.map(|next| next - 1)
    }
}
