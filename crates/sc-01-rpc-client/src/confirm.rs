//! Confirmation waits: poll for a receipt until it appears or time runs out.

use std::time::Duration;

use shared_types::Hash;
use tokio::time::{sleep, timeout};
use tracing::{debug, trace};

use crate::domain::error::{RpcError, RpcResult};
use crate::domain::types::TransactionReceipt;
use crate::ports::NodeApi;

/// How long and how often to poll for a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Block until `tx_hash` has a receipt.
///
/// Errors from the node abort the wait immediately; only a missing receipt
/// is retried.
pub async fn wait_for_receipt<N>(
    node: &N,
    tx_hash: Hash,
    policy: ConfirmationPolicy,
) -> RpcResult<TransactionReceipt>
where
    N: NodeApi + ?Sized,
{
    match timeout(policy.timeout, poll_receipt(node, tx_hash, policy.poll_interval)).await {
        Ok(result) => result,
        Err(_) => Err(RpcError::ConfirmationTimeout {
            tx_hash,
            waited: policy.timeout,
        }),
    }
}

async fn poll_receipt<N>(
    node: &N,
    tx_hash: Hash,
    poll_interval: Duration,
) -> RpcResult<TransactionReceipt>
where
    N: NodeApi + ?Sized,
{
    loop {
        if let Some(receipt) = node.transaction_receipt(tx_hash).await? {
            debug!(?tx_hash, block = ?receipt.block_number, "transaction confirmed");
            return Ok(receipt);
        }
        trace!(?tx_hash, "receipt pending");
        sleep(poll_interval).await;
    }
}
