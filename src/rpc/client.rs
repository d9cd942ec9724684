//! HTTP client for the CometBFT RPC endpoint.
//!
//! All queries go over plain GET with query-string parameters, the way the
//! CometBFT HTTP interface expects them.

use super::types::{BlockResponse, ConsensusStateResponse, JsonRpcError, JsonRpcResponse, StatusResponse};
use crate::utils::config::DEFAULT_RPC_TIMEOUT;
use crate::utils::error::RpcError;
use log::debug;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

/// RPC client for fetching block and consensus data from a node
pub struct RpcClient {
    client: Client,
    base_url: String,
}

impl RpcClient {
    /// Create a new RPC client
    pub fn new(base_url: impl Into<String>) -> Result<Self, RpcError> {
        let client = Client::builder()
            .timeout(DEFAULT_RPC_TIMEOUT)
            .build()
            .map_err(RpcError::RequestFailed)?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url.into()),
        })
    }

    /// Fetch the block at `height`
    pub fn block(&self, height: u64) -> Result<BlockResponse, RpcError> {
        self.get_json(&format!("/block?height={}", height), Some(height))
    }

    /// Fetch the node's status (sync info with earliest and latest heights)
    pub fn status(&self) -> Result<StatusResponse, RpcError> {
        self.get_json("/status", None)
    }

    /// Fetch the node's current consensus round state
    pub fn consensus_state(&self) -> Result<ConsensusStateResponse, RpcError> {
        self.get_json("/consensus_state", None)
    }

    /// Issue one GET query and unwrap the JSON-RPC envelope
    fn get_json<T: DeserializeOwned>(
        &self,
        path_and_query: &str,
        height: Option<u64>,
    ) -> Result<T, RpcError> {
        let url = format!("{}{}", self.base_url, path_and_query);

        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(RpcError::RequestFailed)?;

        // Check HTTP status
        if !response.status().is_success() {
            return Err(RpcError::InvalidResponse(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().unwrap_or_default()
            )));
        }

        // Parse JSON-RPC response
        let rpc_response: JsonRpcResponse<T> = response
            .json()
            .map_err(RpcError::RequestFailed)?;

        // Handle JSON-RPC error
        if let Some(error) = rpc_response.error {
            return Err(map_rpc_error(error, height));
        }

        // Extract result
        rpc_response
            .result
            .ok_or_else(|| RpcError::InvalidResponse("Missing result field".to_string()))
    }
}

/// Normalize the endpoint URL (strip trailing slashes)
fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Map a JSON-RPC error to our error type.
///
/// CometBFT reports pruned or future heights through the error `data` field
/// ("height N is not available, ...").
fn map_rpc_error(error: JsonRpcError, height: Option<u64>) -> RpcError {
    let data = error
        .data
        .as_ref()
        .and_then(|d| d.as_str())
        .unwrap_or_default();

    if let Some(height) = height {
        if data.contains("is not available") || error.message.to_lowercase().contains("not found") {
            return RpcError::HeightNotAvailable(height);
        }
    }

    if data.is_empty() {
        RpcError::InvalidResponse(format!("{}: {}", error.code, error.message))
    } else {
        RpcError::InvalidResponse(format!("{}: {}: {}", error.code, error.message, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:26657".to_string()),
            "http://localhost:26657"
        );
        assert_eq!(
            normalize_base_url("http://localhost:26657/".to_string()),
            "http://localhost:26657"
        );
    }

    #[test]
    fn test_map_rpc_error_height_not_available() {
        let error = JsonRpcError {
            code: -32603,
            message: "Internal error".to_string(),
            data: Some(serde_json::json!(
                "height 5 is not available, lowest height is 100"
            )),
        };

        match map_rpc_error(error, Some(5)) {
            RpcError::HeightNotAvailable(5) => {}
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_map_rpc_error_generic() {
        let error = JsonRpcError {
            code: -32700,
            message: "Parse error".to_string(),
            data: None,
        };

        match map_rpc_error(error, None) {
            RpcError::InvalidResponse(msg) => assert!(msg.contains("-32700")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
