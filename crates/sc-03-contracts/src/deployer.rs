//! Contract deployment.

use std::sync::Arc;

use sc_01_rpc_client::{ConfirmationPolicy, NodeApi, TransactionReceipt, TransactionRequest};
use sc_02_contract_abi::{ContractArtifact, Literal};
use shared_types::{Address, Hash};
use tracing::info;

use crate::errors::ContractError;
use crate::handle::{ContractHandle, PendingTransaction, TxOptions};

/// Outcome of a confirmed deployment.
#[derive(Debug, Clone)]
pub struct Deployment {
    pub address: Address,
    pub transaction_hash: Hash,
    pub receipt: TransactionReceipt,
}

/// Deploys artifacts and waits for their creation receipts.
#[derive(Clone)]
pub struct Deployer {
    node: Arc<dyn NodeApi>,
    policy: ConfirmationPolicy,
}

impl Deployer {
    pub fn new(node: Arc<dyn NodeApi>, policy: ConfirmationPolicy) -> Self {
        Self { node, policy }
    }

    /// Submit the creation transaction without waiting.
    pub async fn submit(
        &self,
        artifact: &ContractArtifact,
        args: Vec<Literal>,
        opts: &TxOptions,
    ) -> Result<PendingTransaction, ContractError> {
        let init_code = artifact.deployment_data(args)?;
        let tx = TransactionRequest::deploy(opts.from, init_code).with_gas(opts.gas);
        let hash = self.node.send_transaction(tx).await?;
        Ok(PendingTransaction::new(hash, self.node.clone()))
    }

    /// Deploy and block until the contract address is known.
    pub async fn deploy(
        &self,
        artifact: &ContractArtifact,
        args: Vec<Literal>,
        opts: &TxOptions,
    ) -> Result<Deployment, ContractError> {
        let pending = self.submit(artifact, args, opts).await?;
        let tx_hash = pending.hash();
        let receipt = pending.confirm(self.policy).await?;

        let address = receipt
            .contract_address
            .ok_or(ContractError::MissingContractAddress { tx_hash })?;

        info!(
            contract = %artifact.contract_name,
            address = ?address,
            tx_hash = ?tx_hash,
            "contract deployed"
        );

        Ok(Deployment {
            address,
            transaction_hash: tx_hash,
            receipt,
        })
    }

    /// Deploy and return a generic handle to the new contract.
    pub async fn deploy_handle(
        &self,
        artifact: &ContractArtifact,
        args: Vec<Literal>,
        opts: &TxOptions,
    ) -> Result<(ContractHandle, Deployment), ContractError> {
        let deployment = self.deploy(artifact, args, opts).await?;
        let handle = ContractHandle::at(
            self.node.clone(),
            Arc::new(artifact.abi.clone()),
            deployment.address,
        );
        Ok((handle, deployment))
    }
}
