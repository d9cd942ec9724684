//! Commitscan
//!
//! Validator commit and proposer statistics for CometBFT block data.
//!
//! The core of this crate is the commit run-length aggregator: given the
//! ordered stream of per-height commit signature arrays, it reconstructs
//! per-validator slot runs and counts actual versus expected signatures
//! within each run. Everything around it - block store, RPC client, CSV
//! reports, CLI - is glue feeding that engine.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install commitscan
//! commitscan --help
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod rpc;
pub mod source;
pub mod utils;
