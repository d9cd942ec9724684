//! Commitscan CLI
//!
//! Aggregates validator commit participation and block-proposer activity
//! over a height range, read from a local block store or a CometBFT RPC
//! endpoint, and writes the results as CSV reports.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use commitscan::commands::{execute_consensus, execute_scan, validate_rpc_url, ScanArgs};
use commitscan::source::{RpcSource, StoreSource};

/// Commitscan - validator commit and proposer statistics
#[derive(Parser, Debug)]
#[command(name = "commitscan")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan blocks from a local block store
    Store {
        /// Chain data directory containing the block store
        #[arg(short, long)]
        dir: PathBuf,

        /// First height to scan (inclusive)
        #[arg(short, long)]
        start: u64,

        /// Last height to scan (inclusive)
        #[arg(short, long)]
        end: u64,

        /// Directory for the CSV reports
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Print a text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Scan blocks served by a CometBFT RPC endpoint
    Rpc {
        /// RPC endpoint URL
        #[arg(short, long, default_value = "http://localhost:26657")]
        url: String,

        /// First height to scan (inclusive)
        #[arg(short, long)]
        start: u64,

        /// Last height to scan (inclusive)
        #[arg(short, long)]
        end: u64,

        /// Directory for the CSV reports
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Print a text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Tally prevotes from the node's live consensus state
    Consensus {
        /// RPC endpoint URL
        #[arg(short, long, default_value = "http://localhost:26657")]
        url: String,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Store {
            dir,
            start,
            end,
            out_dir,
            summary,
        } => {
            let source = StoreSource::open(&dir)?;
            let args = ScanArgs {
                start_height: start,
                end_height: end,
                out_dir,
                print_summary: summary,
            };
            execute_scan(&source, &args)?;
        }

        Commands::Rpc {
            url,
            start,
            end,
            out_dir,
            summary,
        } => {
            validate_rpc_url(&url)?;
            let source = RpcSource::new(url)?;
            let args = ScanArgs {
                start_height: start,
                end_height: end,
                out_dir,
                print_summary: summary,
            };
            execute_scan(&source, &args)?;
        }

        Commands::Consensus { url } => {
            validate_rpc_url(&url)?;
            execute_consensus(&url)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Commitscan v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Validator commit and proposer statistics for CometBFT block data.");
}
