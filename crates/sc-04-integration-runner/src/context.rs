//! State carried from one phase to the next.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use sc_01_rpc_client::{ConfirmationPolicy, NodeApi};
use sc_02_contract_abi::{Abi, ArtifactError, ContractArtifact};
use sc_03_contracts::{ContractHandle, Database, Deployer, Product, ProductFactory, TxOptions};
use shared_types::Address;
use tracing::info;

use crate::config::{ArtifactsConfig, HarnessConfig};
use crate::errors::{PhaseError, SetupError};

/// The three compiled contracts the suite works with.
#[derive(Debug, Clone)]
pub struct ContractSet {
    pub database: ContractArtifact,
    pub product_factory: ContractArtifact,
    /// Interface only; products are deployed by the factory
    pub product: Arc<Abi>,
}

impl ContractSet {
    pub fn load(config: &ArtifactsConfig) -> Result<Self, ArtifactError> {
        Self::load_from(&config.dir, config)
    }

    pub fn load_from(dir: &Path, names: &ArtifactsConfig) -> Result<Self, ArtifactError> {
        let database = ContractArtifact::load_named(dir, &names.database)?;
        let product_factory = ContractArtifact::load_named(dir, &names.product_factory)?;
        let product = ContractArtifact::load_named(dir, &names.product)?;

        for artifact in [&database, &product_factory] {
            if !artifact.is_deployable() {
                return Err(ArtifactError::NotDeployable(artifact.contract_name.clone()));
            }
        }

        Ok(Self {
            database,
            product_factory,
            product: Arc::new(product.abi),
        })
    }
}

/// Node access, sender identity and the handles produced so far.
pub struct SuiteContext {
    pub node: Arc<dyn NodeApi>,
    pub contracts: ContractSet,
    pub policy: ConfirmationPolicy,
    pub tx: TxOptions,
    pub database: Option<Database>,
    pub factory: Option<ProductFactory>,
    /// Product addresses created by this run, keyed by `Database.items` index
    pub products: BTreeMap<u64, Address>,
}

impl SuiteContext {
    /// Resolve the sender from `eth_accounts` and build an empty context.
    pub async fn connect(
        node: Arc<dyn NodeApi>,
        contracts: ContractSet,
        config: &HarnessConfig,
    ) -> Result<Self, SetupError> {
        let accounts = node.accounts().await?;
        let index = config.transactions.sender_index;
        let sender = *accounts.get(index).ok_or(SetupError::NoAccount {
            index,
            available: accounts.len(),
        })?;

        info!(sender = ?sender, accounts = accounts.len(), "sender resolved");

        Ok(Self {
            node,
            contracts,
            policy: config.confirmation_policy(),
            tx: TxOptions::from(sender).with_gas(config.transactions.gas),
            database: None,
            factory: None,
            products: BTreeMap::new(),
        })
    }

    pub fn sender(&self) -> Address {
        self.tx.from
    }

    pub fn deployer(&self) -> Deployer {
        Deployer::new(self.node.clone(), self.policy)
    }

    pub fn database(&self) -> Result<&Database, PhaseError> {
        self.database.as_ref().ok_or(PhaseError::MissingHandle("Database"))
    }

    pub fn factory(&self) -> Result<&ProductFactory, PhaseError> {
        self.factory
            .as_ref()
            .ok_or(PhaseError::MissingHandle("ProductFactory"))
    }

    /// Product proxy at `address`.
    pub fn product_at(&self, address: Address) -> Product {
        Product::new(ContractHandle::at(
            self.node.clone(),
            self.contracts.product.clone(),
            address,
        ))
    }
}
