//! # Driven Ports (SPI - Outbound)
//!
//! The single interface the harness depends on to reach a node.
//! [`crate::RpcClient`] implements it over HTTP; the test suite implements it
//! with an in-memory ledger.

use async_trait::async_trait;
use shared_types::{Address, Bytes, Hash};

use crate::domain::error::RpcResult;
use crate::domain::types::{BlockTag, CallRequest, TransactionReceipt, TransactionRequest};

/// Access to a blockchain node with unlocked accounts.
#[async_trait]
pub trait NodeApi: Send + Sync {
    /// Accounts the node can sign for.
    async fn accounts(&self) -> RpcResult<Vec<Address>>;

    /// Submit a transaction signed by the node.
    ///
    /// # Returns
    ///
    /// * `Hash` - Transaction hash; the transaction may not be mined yet
    async fn send_transaction(&self, tx: TransactionRequest) -> RpcResult<Hash>;

    /// Receipt for `tx_hash`, or `None` while the transaction is pending.
    async fn transaction_receipt(&self, tx_hash: Hash) -> RpcResult<Option<TransactionReceipt>>;

    /// Execute a read-only call and return the raw return data.
    async fn call(&self, call: CallRequest, block: BlockTag) -> RpcResult<Bytes>;

    /// Current block height.
    async fn block_number(&self) -> RpcResult<u64>;

    /// Network id as reported by `net_version`.
    async fn network_version(&self) -> RpcResult<String>;
}
