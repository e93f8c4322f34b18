//! JSON-RPC client for a local test node.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use shared_types::{parse_hex_u64, Address, Bytes, Hash};
use tracing::debug;

use crate::domain::error::{RpcError, RpcResult};
use crate::domain::types::{BlockTag, CallRequest, TransactionReceipt, TransactionRequest};
use crate::ports::NodeApi;

/// JSON-RPC request structure.
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a, T: Serialize> {
    jsonrpc: &'static str,
    method: &'a str,
    params: T,
    id: u64,
}

/// JSON-RPC response structure.
///
/// `result` is kept as a raw value: `null` is a legitimate answer for
/// `eth_getTransactionReceipt` on a pending transaction.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: serde_json::Value,
    error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// HTTP JSON-RPC adapter for [`NodeApi`].
pub struct RpcClient {
    http_client: reqwest::Client,
    rpc_url: String,
    request_id: AtomicU64,
}

impl RpcClient {
    /// Create a new RPC client with a 10 second request timeout.
    pub fn new(rpc_url: impl Into<String>) -> RpcResult<Self> {
        Self::with_timeout(rpc_url, Duration::from_secs(10))
    }

    /// Create a new RPC client with a custom request timeout.
    pub fn with_timeout(rpc_url: impl Into<String>, timeout: Duration) -> RpcResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RpcError::HttpClientCreation)?;

        Ok(Self {
            http_client,
            rpc_url: rpc_url.into(),
            request_id: AtomicU64::new(1),
        })
    }

    /// Endpoint this client talks to.
    pub fn url(&self) -> &str {
        &self.rpc_url
    }

    /// Make a JSON-RPC call.
    async fn call_method<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> RpcResult<R> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);

        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
        };

        debug!(method, id, "sending RPC request");

        let transport = |source| RpcError::Transport {
            method: method.to_string(),
            source,
        };

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        let rpc_response: JsonRpcResponse = response.json().await.map_err(transport)?;

        if let Some(error) = rpc_response.error {
            return Err(RpcError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        serde_json::from_value(rpc_response.result).map_err(|source| RpcError::Decode {
            method: method.to_string(),
            source,
        })
    }
}

#[async_trait]
impl NodeApi for RpcClient {
    async fn accounts(&self) -> RpcResult<Vec<Address>> {
        self.call_method("eth_accounts", Vec::<()>::new()).await
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> RpcResult<Hash> {
        self.call_method("eth_sendTransaction", [tx]).await
    }

    async fn transaction_receipt(&self, tx_hash: Hash) -> RpcResult<Option<TransactionReceipt>> {
        self.call_method("eth_getTransactionReceipt", [tx_hash]).await
    }

    async fn call(&self, call: CallRequest, block: BlockTag) -> RpcResult<Bytes> {
        self.call_method("eth_call", (call, block)).await
    }

    async fn block_number(&self) -> RpcResult<u64> {
        let result: String = self.call_method("eth_blockNumber", Vec::<()>::new()).await?;
        Ok(parse_hex_u64(&result)?)
    }

    async fn network_version(&self) -> RpcResult<String> {
        self.call_method("net_version", Vec::<()>::new()).await
    }
}
