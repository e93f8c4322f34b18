//! A tracked item: immutable creation metadata plus an append-only action log.

use sc_02_contract_abi::{decode_text, Literal, Token};
use shared_types::Address;

use crate::errors::ContractError;
use crate::handle::ContractHandle;

/// One entry of a product's action log.
///
/// Only the handler and description positions are interpreted; the remaining
/// fields are kept as returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    pub handler: Address,
    /// Raw `bytes32` description
    pub description: Vec<u8>,
    pub extra: Vec<Token>,
}

impl ActionRecord {
    /// Description as text with padding and punctuation removed.
    pub fn description_text(&self) -> String {
        decode_text(&self.description)
    }
}

/// Read-only proxy for a deployed `Product` contract.
#[derive(Debug, Clone)]
pub struct Product {
    handle: ContractHandle,
}

impl Product {
    pub fn new(handle: ContractHandle) -> Self {
        Self { handle }
    }

    pub fn address(&self) -> Address {
        self.handle.address()
    }

    /// Raw `name()` bytes.
    pub async fn name(&self) -> Result<Vec<u8>, ContractError> {
        let value = self.handle.query_at_least("name", vec![], 1).await?.remove(0);
        Ok(value.into_bytes()?)
    }

    /// `name()` as text with padding and punctuation removed.
    pub async fn name_text(&self) -> Result<String, ContractError> {
        Ok(decode_text(&self.name().await?))
    }

    /// `DATABASE_CONTRACT()`: the database this product was registered in.
    pub async fn database_contract(&self) -> Result<Address, ContractError> {
        let value = self
            .handle
            .query_at_least("DATABASE_CONTRACT", vec![], 1)
            .await?
            .remove(0);
        Ok(value.into_address()?)
    }

    /// `actions(index)`.
    pub async fn actions(&self, index: u64) -> Result<ActionRecord, ContractError> {
        let mut fields = self
            .handle
            .query_at_least("actions", vec![Literal::from(index)], 2)
            .await?;
        let extra = fields.split_off(2);
        let description = fields.remove(1).into_bytes()?;
        let handler = fields.remove(0).into_address()?;

        Ok(ActionRecord {
            handler,
            description,
            extra,
        })
    }
}

impl From<ContractHandle> for Product {
    fn from(handle: ContractHandle) -> Self {
        Self::new(handle)
    }
}
