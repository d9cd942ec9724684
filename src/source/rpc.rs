//! Remote block source over the CometBFT RPC interface.

use crate::parser::block::{summarize_rpc, BlockSummary};
use crate::rpc::RpcClient;
use crate::source::BlockSource;
use crate::utils::error::SourceError;

/// Block source served by a remote node
pub struct RpcSource {
    client: RpcClient,
    url: String,
}

impl RpcSource {
    pub fn new(url: impl Into<String>) -> Result<Self, SourceError> {
        let url = url.into();
        let client = RpcClient::new(url.clone()).map_err(SourceError::Rpc)?;
        Ok(Self { client, url })
    }
}

impl BlockSource for RpcSource {
    fn describe(&self) -> String {
        format!("rpc {}", self.url)
    }

    /// The node's `/status` sync info reports its earliest servable height
    fn lowest_height(&self) -> Result<u64, SourceError> {
        Ok(self.client.status()?.sync_info.earliest_block_height)
    }

    fn latest_height(&self) -> Result<u64, SourceError> {
        Ok(self.client.status()?.sync_info.latest_block_height)
    }

    /// The signature array for `height` comes from the `last_commit` of the
    /// block at `height`.
    fn block_summary(&self, height: u64) -> Result<BlockSummary, SourceError> {
        let response = self.client.block(height)?;
        Ok(summarize_rpc(height, &response)?)
    }
}
