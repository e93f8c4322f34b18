//! Generic contract access: address + interface + node.

use std::fmt;
use std::sync::Arc;

use sc_01_rpc_client::{
    wait_for_receipt, BlockTag, CallRequest, ConfirmationPolicy, NodeApi, TransactionReceipt,
    TransactionRequest,
};
use sc_02_contract_abi::{Abi, Literal, Token};
use shared_types::{Address, Hash};
use tracing::debug;

use crate::errors::ContractError;
use crate::DEFAULT_GAS;

/// Sender identity and gas budget for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOptions {
    pub from: Address,
    pub gas: u64,
}

impl TxOptions {
    /// Send from `from` with the default gas budget.
    pub fn from(from: Address) -> Self {
        Self {
            from,
            gas: DEFAULT_GAS,
        }
    }

    pub fn with_gas(mut self, gas: u64) -> Self {
        self.gas = gas;
        self
    }
}

/// A submitted transaction that has not been confirmed yet.
pub struct PendingTransaction {
    hash: Hash,
    node: Arc<dyn NodeApi>,
}

impl PendingTransaction {
    pub(crate) fn new(hash: Hash, node: Arc<dyn NodeApi>) -> Self {
        Self { hash, node }
    }

    /// Transaction hash returned by the node.
    pub fn hash(&self) -> Hash {
        self.hash
    }

    /// Wait for the receipt; a failed status is an error.
    pub async fn confirm(self, policy: ConfirmationPolicy) -> Result<TransactionReceipt, ContractError> {
        let receipt = wait_for_receipt(self.node.as_ref(), self.hash, policy).await?;
        if !receipt.is_success() {
            return Err(ContractError::Reverted { tx_hash: self.hash });
        }
        Ok(receipt)
    }
}

impl fmt::Debug for PendingTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingTransaction")
            .field("hash", &self.hash)
            .finish()
    }
}

/// A deployed contract reached through a node.
#[derive(Clone)]
pub struct ContractHandle {
    address: Address,
    abi: Arc<Abi>,
    node: Arc<dyn NodeApi>,
}

impl ContractHandle {
    /// Proxy for the contract at `address`. No code check is performed.
    pub fn at(node: Arc<dyn NodeApi>, abi: Arc<Abi>, address: Address) -> Self {
        Self { address, abi, node }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn abi(&self) -> &Arc<Abi> {
        &self.abi
    }

    pub fn node(&self) -> &Arc<dyn NodeApi> {
        &self.node
    }

    /// Read-only call; returns the decoded outputs.
    pub async fn query(&self, function: &str, args: Vec<Literal>) -> Result<Vec<Token>, ContractError> {
        let f = self.abi.function(function)?;
        let data = f.encode_input(args)?;
        debug!(contract = ?self.address, function, "eth_call");

        let output = self
            .node
            .call(CallRequest::new(self.address, data), BlockTag::Latest)
            .await?;
        Ok(f.decode_output(output.as_slice())?)
    }

    /// Read-only call that must return at least `min_outputs` values.
    pub(crate) async fn query_at_least(
        &self,
        function: &str,
        args: Vec<Literal>,
        min_outputs: usize,
    ) -> Result<Vec<Token>, ContractError> {
        let tokens = self.query(function, args).await?;
        if tokens.len() < min_outputs {
            return Err(ContractError::ShortResult {
                function: function.to_string(),
                expected: min_outputs,
                actual: tokens.len(),
            });
        }
        Ok(tokens)
    }

    /// State-changing call; returns once the node has accepted the transaction.
    pub async fn submit(
        &self,
        function: &str,
        args: Vec<Literal>,
        opts: &TxOptions,
    ) -> Result<PendingTransaction, ContractError> {
        let data = self.abi.function(function)?.encode_input(args)?;
        let tx = TransactionRequest::invoke(opts.from, self.address, data).with_gas(opts.gas);

        let hash = self.node.send_transaction(tx).await?;
        debug!(contract = ?self.address, function, tx_hash = ?hash, "transaction submitted");
        Ok(PendingTransaction::new(hash, self.node.clone()))
    }
}

impl fmt::Debug for ContractHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractHandle")
            .field("address", &self.address)
            .finish()
    }
}
