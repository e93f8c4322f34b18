//! Factory that deploys `Product` contracts and registers them in a database.

use sc_02_contract_abi::Literal;
use shared_types::Address;

use crate::errors::ContractError;
use crate::handle::{ContractHandle, PendingTransaction, TxOptions};

/// Creation metadata for a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub id: u64,
    pub name: String,
    pub additional_information: String,
    /// Unix milliseconds
    pub timestamp: u64,
    pub price: u64,
    pub lon: i64,
    pub lat: i64,
}

impl NewProduct {
    /// Arguments in `createProduct` order, registering into `database`.
    pub fn to_args(&self, database: Address) -> Vec<Literal> {
        vec![
            self.id.into(),
            self.name.as_str().into(),
            self.additional_information.as_str().into(),
            self.timestamp.into(),
            self.price.into(),
            self.lon.into(),
            self.lat.into(),
            database.into(),
        ]
    }
}

/// Proxy for a deployed `ProductFactory` contract.
#[derive(Debug, Clone)]
pub struct ProductFactory {
    handle: ContractHandle,
}

impl ProductFactory {
    pub fn new(handle: ContractHandle) -> Self {
        Self { handle }
    }

    pub fn address(&self) -> Address {
        self.handle.address()
    }

    /// `createProduct(...)`; the new product is appended to `database.items`.
    pub async fn create_product(
        &self,
        product: &NewProduct,
        database: Address,
        opts: &TxOptions,
    ) -> Result<PendingTransaction, ContractError> {
        self.handle
            .submit("createProduct", product.to_args(database), opts)
            .await
    }
}

impl From<ContractHandle> for ProductFactory {
    fn from(handle: ContractHandle) -> Self {
        Self::new(handle)
    }
}
