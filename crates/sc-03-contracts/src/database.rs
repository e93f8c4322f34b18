//! The on-chain registry of handlers and products.

use sc_02_contract_abi::Literal;
use shared_types::Address;

use crate::errors::ContractError;
use crate::handle::{ContractHandle, PendingTransaction, TxOptions};

/// Metadata stored for a registered handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerRecord {
    pub name: String,
    pub additional_information: String,
}

/// Proxy for a deployed `Database` contract.
#[derive(Debug, Clone)]
pub struct Database {
    handle: ContractHandle,
}

impl Database {
    pub fn new(handle: ContractHandle) -> Self {
        Self { handle }
    }

    pub fn address(&self) -> Address {
        self.handle.address()
    }

    pub fn handle(&self) -> &ContractHandle {
        &self.handle
    }

    /// `addHandler(handler, name, additionalInformation)`.
    pub async fn add_handler(
        &self,
        handler: Address,
        name: &str,
        additional_information: &str,
        opts: &TxOptions,
    ) -> Result<PendingTransaction, ContractError> {
        self.handle
            .submit(
                "addHandler",
                vec![handler.into(), name.into(), additional_information.into()],
                opts,
            )
            .await
    }

    /// `addressToHandler(handler)`: first field is the name.
    pub async fn address_to_handler(&self, handler: Address) -> Result<HandlerRecord, ContractError> {
        let mut fields = self
            .handle
            .query_at_least("addressToHandler", vec![handler.into()], 2)
            .await?;
        let additional_information = fields.remove(1).into_string()?;
        let name = fields.remove(0).into_string()?;

        Ok(HandlerRecord {
            name,
            additional_information,
        })
    }

    /// `items(index)`: address of the index-th registered product.
    pub async fn items(&self, index: u64) -> Result<Address, ContractError> {
        let value = self
            .handle
            .query_at_least("items", vec![Literal::from(index)], 1)
            .await?
            .remove(0);
        Ok(value.into_address()?)
    }
}

impl From<ContractHandle> for Database {
    fn from(handle: ContractHandle) -> Self {
        Self::new(handle)
    }
}
