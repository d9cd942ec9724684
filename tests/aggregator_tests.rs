use commitscan::aggregator::{CommitAggregator, ProposerAggregator};
use commitscan::parser::SlotEntry;

fn signed(address: &str) -> SlotEntry {
    SlotEntry::signed(address)
}

#[test]
fn test_stable_slot_then_empty_signature() {
    let mut commits = CommitAggregator::new();
    commits.process(100, &[signed("V1")]).unwrap();
    commits.process(101, &[signed("V1")]).unwrap();
    commits.process(102, &[SlotEntry::Absent]).unwrap();

    let record = commits.validator("V1").unwrap();
    let runs: Vec<_> = record.runs().collect();

    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].slot, 0);
    assert_eq!(runs[0].start_height, 100);
    assert_eq!(runs[0].end_height, 101);
    assert_eq!(runs[0].commit_count, 2);
    assert_eq!(runs[0].block_count(), 2);
    assert_eq!(runs[0].missed_commits(), 0);

    assert_eq!(commits.empty_slot(0).unwrap().heights, vec![102]);
}

#[test]
fn test_slot_change_closes_the_run() {
    let mut commits = CommitAggregator::new();
    commits.process(200, &[signed("V1"), signed("V2")]).unwrap();
    commits.process(201, &[signed("V2"), signed("V1")]).unwrap();

    let record = commits.validator("V1").unwrap();
    let runs: Vec<_> = record.runs().collect();

    assert_eq!(record.slot_count(), 2);
    assert_eq!((runs[0].slot, runs[0].start_height, runs[0].end_height, runs[0].commit_count), (0, 200, 200, 1));
    assert_eq!((runs[1].slot, runs[1].start_height, runs[1].end_height, runs[1].commit_count), (1, 201, 201, 1));
}

#[test]
fn test_derived_metrics_over_a_mixed_sequence() {
    // V1 keeps slot 0 but misses height 3; V2 walks across slots.
    let mut commits = CommitAggregator::new();
    commits.process(1, &[signed("V1"), signed("V2")]).unwrap();
    commits.process(2, &[signed("V1"), signed("V2")]).unwrap();
    commits.process(3, &[signed("V2"), SlotEntry::Absent]).unwrap();
    commits.process(4, &[signed("V1"), signed("V2")]).unwrap();

    for record in commits.validators() {
        for run in record.runs() {
            assert_eq!(run.block_count(), run.end_height - run.start_height + 1);
            assert_eq!(run.missed_commits(), run.block_count() - run.commit_count);
        }
    }

    // V1's slot-0 run absorbed the height it was missing from
    let v1_runs: Vec<_> = commits.validator("V1").unwrap().runs().collect();
    assert_eq!(v1_runs.len(), 1);
    assert_eq!(v1_runs[0].block_count(), 4);
    assert_eq!(v1_runs[0].commit_count, 3);
    assert_eq!(v1_runs[0].missed_commits(), 1);
}

#[test]
fn test_proposer_totals() {
    let mut proposers = ProposerAggregator::new();
    proposers.observe(10, "P1", 5).unwrap();
    proposers.observe(11, "P2", 1).unwrap();
    proposers.observe(12, "P1", 3).unwrap();

    let totals = proposers.total_for("P1").unwrap();
    assert_eq!(totals.proposing_count, 2);
    assert_eq!(totals.tx_count, 8);
}
