//! Consensus prevote tally command.
//!
//! Fetches the node's live consensus state and tallies the prevotes of the
//! second-to-last round in the height vote set (the round currently being
//! decided), grouped per vote key.

use crate::rpc::types::RoundState;
use crate::rpc::RpcClient;
use anyhow::{bail, Context, Result};
use log::info;
use std::collections::BTreeMap;

/// Prevote counts for one consensus round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrevoteTally {
    pub round: i64,
    pub counts: BTreeMap<String, u64>,
}

/// Execute the consensus command against an RPC endpoint
///
/// **Public** - main entry point called from main.rs
pub fn execute_consensus(rpc_url: &str) -> Result<()> {
    info!("RPC URL: {}", rpc_url);

    let client = RpcClient::new(rpc_url).context("Failed to create RPC client")?;
    let state = client
        .consensus_state()
        .context("Failed to fetch consensus state")?;

    let tally = tally_prevotes(&state.round_state)?;

    println!("Round: {}", tally.round);
    for (key, count) in &tally.counts {
        println!("{} {}", key, count);
    }

    Ok(())
}

/// Tally prevotes for the second-to-last entry of the height vote set
pub fn tally_prevotes(round_state: &RoundState) -> Result<PrevoteTally> {
    let vote_sets = &round_state.height_vote_set;
    if vote_sets.len() < 2 {
        bail!("Consensus state has no vote set to tally");
    }

    let current = &vote_sets[vote_sets.len() - 2];

    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for vote in &current.prevotes {
        *counts.entry(prevote_key(vote).to_string()).or_insert(0) += 1;
    }

    Ok(PrevoteTally {
        round: current.round,
        counts,
    })
}

/// Group key for one prevote line.
///
/// `nil-Vote` stays its own bucket; a cast vote is keyed by the third
/// space-separated token of its vote line.
fn prevote_key(vote: &str) -> &str {
    if vote == "nil-Vote" {
        return vote;
    }
    vote.split(' ').nth(2).unwrap_or(vote)
}
