//! CSV report writers.

use crate::aggregator::{CommitAggregator, ProposerAggregator};
use crate::source::HeightRange;
use crate::utils::config::{
    PROPOSER_REPORT_PREFIX, PROPOSER_TX_REPORT_PREFIX, VALIDATOR_REPORT_PREFIX,
};
use crate::utils::error::OutputError;
use csv::Writer;
use log::{debug, info};
use std::fs::File;
use std::path::{Path, PathBuf};

const PROPOSER_HEADER: [&str; 3] = ["Height", "Proposer Address", "TX Count"];

const PROPOSER_TX_HEADER: [&str; 3] = ["Proposer Address", "Proposing Count", "TX Count"];

const VALIDATOR_HEADER: [&str; 8] = [
    "Validator Address",
    "Slot Count",
    "Slot",
    "Start Height",
    "End Height",
    "Commit Count",
    "Block Count",
    "Missed Commit",
];

/// Output locations for the three reports of one scan
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub proposers: PathBuf,
    pub proposer_totals: PathBuf,
    pub validator_runs: PathBuf,
}

impl ReportPaths {
    /// Report files are named `<prefix>-<start>-<end>.csv` inside `out_dir`
    pub fn new(out_dir: &Path, range: HeightRange) -> Self {
        let named = |prefix: &str| {
            out_dir.join(format!("{}-{}-{}.csv", prefix, range.start, range.end))
        };

        Self {
            proposers: named(PROPOSER_REPORT_PREFIX),
            proposer_totals: named(PROPOSER_TX_REPORT_PREFIX),
            validator_runs: named(VALIDATOR_REPORT_PREFIX),
        }
    }
}

/// Write the per-height proposer report: one row per scanned height
pub fn write_proposer_report(
    proposers: &ProposerAggregator,
    path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let path = path.as_ref();
    let mut writer = open_writer(path)?;

    writer.write_record(PROPOSER_HEADER)?;
    for record in proposers.records() {
        writer.write_record(&[
            record.height.to_string(),
            record.proposer_address.clone(),
            record.tx_count.to_string(),
        ])?;
    }
    writer.flush()?;

    info!("Proposer report written to: {}", path.display());
    Ok(())
}

/// Write the cumulative proposer report: one row per proposer address
pub fn write_proposer_totals_report(
    proposers: &ProposerAggregator,
    path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let path = path.as_ref();
    let mut writer = open_writer(path)?;

    writer.write_record(PROPOSER_TX_HEADER)?;
    for (address, totals) in proposers.totals() {
        writer.write_record(&[
            address.to_string(),
            totals.proposing_count.to_string(),
            totals.tx_count.to_string(),
        ])?;
    }
    writer.flush()?;

    info!("Proposer totals report written to: {}", path.display());
    Ok(())
}

/// Write the validator run report: one row per (validator, run).
///
/// Block count and missed commits are derived here, at report time, from
/// the closed runs.
pub fn write_validator_runs_report(
    commits: &CommitAggregator,
    path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let path = path.as_ref();
    let mut writer = open_writer(path)?;

    writer.write_record(VALIDATOR_HEADER)?;
    for record in commits.validators() {
        for run in record.runs() {
            writer.write_record(&[
                record.validator_address.clone(),
                record.slot_count().to_string(),
                run.slot.to_string(),
                run.start_height.to_string(),
                run.end_height.to_string(),
                run.commit_count.to_string(),
                run.block_count().to_string(),
                run.missed_commits().to_string(),
            ])?;
        }
    }
    writer.flush()?;

    info!("Validator run report written to: {}", path.display());
    Ok(())
}

/// Validate the output path and open a CSV writer over it
fn open_writer(path: &Path) -> Result<Writer<File>, OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    // Create parent directories if needed
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    Ok(Writer::from_writer(file))
}
