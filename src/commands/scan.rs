//! Scan command implementation.
//!
//! The scan:
//! 1. Validates the requested height range against the source
//! 2. Walks the range in ascending height order, feeding both aggregators
//! 3. Writes the three CSV reports

use crate::aggregator::{CommitAggregator, ProposerAggregator};
use crate::output::{
    write_proposer_report, write_proposer_totals_report, write_validator_runs_report, ReportPaths,
};
use crate::source::{validate_range, BlockSource, HeightRange};
use crate::utils::config::PROGRESS_LOG_INTERVAL;
use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the scan command, shared by the store and rpc variants
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ScanArgs {
    /// First height to scan (inclusive)
    pub start_height: u64,

    /// Last height to scan (inclusive)
    pub end_height: u64,

    /// Directory receiving the CSV reports
    pub out_dir: PathBuf,

    /// Print a text summary to stdout
    pub print_summary: bool,
}

impl Default for ScanArgs {
    fn default() -> Self {
        Self {
            start_height: 0,
            end_height: 0,
            out_dir: PathBuf::from("."),
            print_summary: false,
        }
    }
}

/// Aggregated state of one completed scan
#[derive(Debug)]
pub struct ScanOutcome {
    pub range: HeightRange,
    pub commits: CommitAggregator,
    pub proposers: ProposerAggregator,
}

/// Execute a scan against any block source
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `source` - block source to read from (local store or remote RPC)
/// * `args` - scan arguments
///
/// # Errors
/// * range validation failures (reported before any aggregation work)
/// * source read or decode failures (the scan aborts; nothing is written)
/// * report write failures
pub fn execute_scan(source: &dyn BlockSource, args: &ScanArgs) -> Result<ScanOutcome> {
    let started = Instant::now();

    info!("Source: {}", source.describe());
    info!("Input Start Height: {}", args.start_height);
    info!("Input End Height: {}", args.end_height);

    // Step 1: Pre-flight range validation
    info!("Step 1/3: Validating requested range...");
    let range = validate_range(source, args.start_height, args.end_height)
        .context("Requested range cannot be served")?;

    // Step 2: Aggregate
    info!("Step 2/3: Scanning {} heights...", range.len());
    let (commits, proposers) = aggregate_range(source, range)?;

    // Step 3: Write reports
    info!("Step 3/3: Writing CSV reports...");
    let paths = ReportPaths::new(&args.out_dir, range);

    write_proposer_report(&proposers, &paths.proposers)
        .context("Failed to write proposer report")?;
    write_proposer_totals_report(&proposers, &paths.proposer_totals)
        .context("Failed to write proposer totals report")?;
    write_validator_runs_report(&commits, &paths.validator_runs)
        .context("Failed to write validator run report")?;

    let outcome = ScanOutcome {
        range,
        commits,
        proposers,
    };

    if args.print_summary {
        print_summary(&outcome);
    }

    info!("Scan completed in {:.2}s", started.elapsed().as_secs_f64());

    Ok(outcome)
}

/// Drive both aggregators over the validated range.
///
/// Heights are consumed strictly one at a time in ascending order. A height
/// the source cannot serve or decode aborts the scan; the records already
/// accumulated stay valid up to the last processed height.
fn aggregate_range(
    source: &dyn BlockSource,
    range: HeightRange,
) -> Result<(CommitAggregator, ProposerAggregator)> {
    let mut commits = CommitAggregator::new();
    let mut proposers = ProposerAggregator::new();

    for height in range.heights() {
        if height % PROGRESS_LOG_INTERVAL == 0 {
            info!("{} - {}", height, Utc::now().to_rfc3339());
        }

        let summary = source
            .block_summary(height)
            .with_context(|| format!("Failed to load block {}", height))?;

        debug!(
            "height {}: proposer {}, {} txs, {} slots",
            summary.height,
            summary.proposer_address,
            summary.tx_count,
            summary.slots.len()
        );

        proposers.observe(summary.height, &summary.proposer_address, summary.tx_count)?;
        commits.process(summary.height, &summary.slots)?;
    }

    Ok((commits, proposers))
}

/// Print a text summary of the scan to stdout
///
/// **Private** - internal helper for execute_scan
fn print_summary(outcome: &ScanOutcome) {
    let run_count: usize = outcome
        .commits
        .validators()
        .map(|record| record.slot_count())
        .sum();
    let empty_count: usize = outcome
        .commits
        .empty_slots()
        .map(|(_, record)| record.heights.len())
        .sum();

    println!("\n{}", "=".repeat(80));
    println!("SCAN SUMMARY");
    println!("{}", "=".repeat(80));
    println!("Heights:          {} - {}", outcome.range.start, outcome.range.end);
    println!("Blocks Scanned:   {}", outcome.range.len());
    println!("Validators:       {}", outcome.commits.validators().count());
    println!("Slot Runs:        {}", run_count);
    println!("Empty Signatures: {}", empty_count);
    println!("Proposers:        {}", outcome.proposers.totals().count());
    println!("{}", "=".repeat(80));
}

/// Validate an RPC endpoint URL before opening a connection
///
/// **Public** - can be called before constructing a remote source
pub fn validate_rpc_url(url: &str) -> Result<()> {
    if url.is_empty() {
        anyhow::bail!("RPC URL cannot be empty");
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("RPC URL must start with http:// or https://");
    }

    Ok(())
}
