//! # In-Memory Ledger
//!
//! An automining node that executes the `Database`, `ProductFactory` and
//! `Product` contracts natively. Calldata is decoded and return data encoded
//! with the same ABI codec the harness uses, so every byte the harness
//! produces goes through a real round trip.
//!
//! Faults can be injected to exercise the runner's failure paths.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use parking_lot::Mutex;
use sc_01_rpc_client::{
    BlockTag, CallRequest, NodeApi, RpcError, RpcResult, TransactionReceipt, TransactionRequest,
};
use sc_02_contract_abi::{ArtifactError, ContractArtifact, Function, Token};
use shared_types::{keccak256, Address, Bytes, Hash, U256};
use tracing::debug;

/// Description recorded as the first action of every product.
pub const CREATION_DESCRIPTION: &str = "Product creation";

/// One entry of a product's action log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerAction {
    pub handler: Address,
    pub description: [u8; 32],
    pub lon: U256,
    pub lat: U256,
    pub timestamp: U256,
    pub block_number: u64,
}

/// Product storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerProduct {
    pub id: U256,
    pub name: [u8; 32],
    pub additional_information: [u8; 32],
    pub price: U256,
    pub database: Address,
    pub actions: Vec<LedgerAction>,
}

#[derive(Debug, Clone)]
enum Contract {
    Database {
        handlers: HashMap<Address, (String, String)>,
        items: Vec<Address>,
    },
    ProductFactory,
    Product(LedgerProduct),
}

/// Injected faults.
#[derive(Debug, Clone, Default)]
pub struct Faults {
    /// Transactions from this index on (0-based) never get a receipt.
    pub withhold_receipts_from: Option<usize>,
    /// Store a different name for the product with this id.
    pub renamed_products: HashMap<u64, String>,
    /// Creating a product overwrites the names of all existing ones.
    pub shared_name_slot: bool,
    /// Record this description as every product's first action.
    pub creation_description: Option<String>,
    /// Products report this address as their database.
    pub foreign_database: Option<Address>,
    /// Store this name for every registered handler.
    pub handler_name: Option<String>,
}

struct LedgerState {
    accounts: Vec<Address>,
    block_number: u64,
    created: u64,
    transactions: Vec<TransactionRequest>,
    receipts: HashMap<Hash, TransactionReceipt>,
    contracts: HashMap<Address, Contract>,
    faults: Faults,
}

/// Automining in-memory node.
pub struct LedgerNode {
    database: ContractArtifact,
    factory: ContractArtifact,
    product: ContractArtifact,
    state: Mutex<LedgerState>,
}

fn bytes32(value: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let len = value.len().min(32);
    out[..len].copy_from_slice(&value[..len]);
    out
}

fn revert(message: impl Into<String>) -> RpcError {
    RpcError::Rpc {
        code: -32000,
        message: format!("VM Exception while processing transaction: {}", message.into()),
    }
}

impl LedgerNode {
    /// Ledger that recognizes the artifacts in `dir` by their bytecode.
    pub fn from_artifacts(dir: &Path) -> Result<Self, ArtifactError> {
        Ok(Self {
            database: ContractArtifact::load_named(dir, "Database")?,
            factory: ContractArtifact::load_named(dir, "ProductFactory")?,
            product: ContractArtifact::load_named(dir, "Product")?,
            state: Mutex::new(LedgerState {
                accounts: (1..=3).map(|i| Address::repeat_byte(0xa0 + i)).collect(),
                block_number: 0,
                created: 0,
                transactions: Vec::new(),
                receipts: HashMap::new(),
                contracts: HashMap::new(),
                faults: Faults::default(),
            }),
        })
    }

    pub fn with_faults(self, faults: Faults) -> Self {
        self.state.lock().faults = faults;
        self
    }

    pub fn with_accounts(self, accounts: Vec<Address>) -> Self {
        self.state.lock().accounts = accounts;
        self
    }

    /// Every transaction submitted so far.
    pub fn transactions(&self) -> Vec<TransactionRequest> {
        self.state.lock().transactions.clone()
    }

    pub fn handler(&self, database: Address, handler: Address) -> Option<(String, String)> {
        match self.state.lock().contracts.get(&database) {
            Some(Contract::Database { handlers, .. }) => handlers.get(&handler).cloned(),
            _ => None,
        }
    }

    pub fn items(&self, database: Address) -> Vec<Address> {
        match self.state.lock().contracts.get(&database) {
            Some(Contract::Database { items, .. }) => items.clone(),
            _ => Vec::new(),
        }
    }

    pub fn product(&self, address: Address) -> Option<LedgerProduct> {
        match self.state.lock().contracts.get(&address) {
            Some(Contract::Product(product)) => Some(product.clone()),
            _ => None,
        }
    }

    fn next_address(state: &mut LedgerState) -> Address {
        state.created += 1;
        Address::from_low_u64_be(0xc0_0000 + state.created)
    }

    fn function_for<'a>(artifact: &'a ContractArtifact, data: &[u8]) -> RpcResult<&'a Function> {
        artifact
            .abi
            .function_by_selector(data)
            .ok_or_else(|| revert("unknown function selector"))
    }

    fn artifact_for(&self, contract: &Contract) -> &ContractArtifact {
        match contract {
            Contract::Database { .. } => &self.database,
            Contract::ProductFactory => &self.factory,
            Contract::Product(_) => &self.product,
        }
    }

    /// Execute `tx`; returns the created contract, if any.
    fn execute(&self, state: &mut LedgerState, tx: &TransactionRequest) -> RpcResult<Option<Address>> {
        let data = tx.data.as_ref().map(Bytes::as_slice).unwrap_or_default();

        let Some(to) = tx.to else {
            let contract = if data.starts_with(self.database.bytecode.as_slice()) {
                Contract::Database {
                    handlers: HashMap::new(),
                    items: Vec::new(),
                }
            } else if data.starts_with(self.factory.bytecode.as_slice()) {
                Contract::ProductFactory
            } else {
                return Err(revert("unrecognized init code"));
            };
            let address = Self::next_address(state);
            state.contracts.insert(address, contract);
            return Ok(Some(address));
        };

        let contract = state
            .contracts
            .get(&to)
            .cloned()
            .ok_or_else(|| revert("call to non-contract"))?;
        let function = Self::function_for(self.artifact_for(&contract), data)?;
        let args = function.decode_input(data).map_err(|e| revert(e.to_string()))?;

        match (contract, function.name.as_str()) {
            (Contract::Database { .. }, "addHandler") => {
                let mut args = args.into_iter();
                let handler = next_address_arg(&mut args)?;
                let name = next_string_arg(&mut args)?;
                let info = next_string_arg(&mut args)?;
                let name = state.faults.handler_name.clone().unwrap_or(name);
                if let Some(Contract::Database { handlers, .. }) = state.contracts.get_mut(&to) {
                    handlers.insert(handler, (name, info));
                }
                Ok(None)
            }
            (Contract::ProductFactory, "createProduct") => {
                self.create_product(state, tx.from, args).map(|_| None)
            }
            (_, name) => Err(revert(format!("{} is not a transaction", name))),
        }
    }

    fn create_product(&self, state: &mut LedgerState, sender: Address, args: Vec<Token>) -> RpcResult<Address> {
        let [id, name, info, timestamp, price, lon, lat, database]: [Token; 8] = args
            .try_into()
            .map_err(|_| revert("createProduct expects 8 arguments"))?;

        let id = id.into_uint().map_err(|e| revert(e.to_string()))?;
        let mut name = bytes32(&name.into_bytes().map_err(|e| revert(e.to_string()))?);
        let database = database.into_address().map_err(|e| revert(e.to_string()))?;

        if !matches!(state.contracts.get(&database), Some(Contract::Database { .. })) {
            return Err(revert("database is not a Database contract"));
        }

        if let Some(renamed) = state.faults.renamed_products.get(&id.low_u64()) {
            name = bytes32(renamed.as_bytes());
        }
        if state.faults.shared_name_slot {
            for contract in state.contracts.values_mut() {
                if let Contract::Product(existing) = contract {
                    existing.name = name;
                }
            }
        }

        let description = state
            .faults
            .creation_description
            .as_deref()
            .unwrap_or(CREATION_DESCRIPTION);
        let recorded_database = state.faults.foreign_database.unwrap_or(database);

        let as_word = |token: Token| match token {
            Token::Int(v) | Token::Uint(v) => Ok(v),
            other => Err(revert(format!("expected integer, got {:?}", other))),
        };

        let product = LedgerProduct {
            id,
            name,
            additional_information: bytes32(&info.into_bytes().map_err(|e| revert(e.to_string()))?),
            price: as_word(price)?,
            database: recorded_database,
            actions: vec![LedgerAction {
                handler: sender,
                description: bytes32(description.as_bytes()),
                lon: as_word(lon)?,
                lat: as_word(lat)?,
                timestamp: as_word(timestamp)?,
                block_number: state.block_number,
            }],
        };

        let address = Self::next_address(state);
        state.contracts.insert(address, Contract::Product(product));
        if let Some(Contract::Database { items, .. }) = state.contracts.get_mut(&database) {
            items.push(address);
        }
        Ok(address)
    }

    fn read(&self, state: &LedgerState, call: &CallRequest) -> RpcResult<Vec<u8>> {
        let Some(contract) = state.contracts.get(&call.to) else {
            // no code at the address: empty return data
            return Ok(Vec::new());
        };
        let data = call.data.as_slice();
        let function = Self::function_for(self.artifact_for(contract), data)?;
        let mut args = function
            .decode_input(data)
            .map_err(|e| revert(e.to_string()))?
            .into_iter();

        let outputs = match (contract, function.name.as_str()) {
            (Contract::Database { handlers, .. }, "addressToHandler") => {
                let handler = next_address_arg(&mut args)?;
                let (name, info) = handlers.get(&handler).cloned().unwrap_or_default();
                vec![Token::String(name), Token::String(info)]
            }
            (Contract::Database { items, .. }, "items") => {
                let index = next_index_arg(&mut args)?;
                let address = items.get(index).ok_or_else(|| revert("invalid opcode"))?;
                vec![Token::Address(*address)]
            }
            (Contract::Product(product), "name") => vec![Token::FixedBytes(product.name.to_vec())],
            (Contract::Product(product), "DATABASE_CONTRACT") => vec![Token::Address(product.database)],
            (Contract::Product(product), "actions") => {
                let index = next_index_arg(&mut args)?;
                let action = product.actions.get(index).ok_or_else(|| revert("invalid opcode"))?;
                vec![
                    Token::Address(action.handler),
                    Token::FixedBytes(action.description.to_vec()),
                    Token::Int(action.lon),
                    Token::Int(action.lat),
                    Token::Uint(action.timestamp),
                    Token::Uint(U256::from(action.block_number)),
                ]
            }
            (_, name) => return Err(revert(format!("{} is not readable here", name))),
        };
        Ok(function.encode_output(&outputs))
    }
}

fn next_address_arg(args: &mut impl Iterator<Item = Token>) -> RpcResult<Address> {
    args.next()
        .ok_or_else(|| revert("missing argument"))?
        .into_address()
        .map_err(|e| revert(e.to_string()))
}

fn next_string_arg(args: &mut impl Iterator<Item = Token>) -> RpcResult<String> {
    args.next()
        .ok_or_else(|| revert("missing argument"))?
        .into_string()
        .map_err(|e| revert(e.to_string()))
}

fn next_index_arg(args: &mut impl Iterator<Item = Token>) -> RpcResult<usize> {
    let value = args
        .next()
        .ok_or_else(|| revert("missing argument"))?
        .into_uint()
        .map_err(|e| revert(e.to_string()))?;
    usize::try_from(value.low_u64()).map_err(|_| revert("index out of range"))
}

#[async_trait]
impl NodeApi for LedgerNode {
    async fn accounts(&self) -> RpcResult<Vec<Address>> {
        Ok(self.state.lock().accounts.clone())
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> RpcResult<Hash> {
        let mut state = self.state.lock();
        let index = state.transactions.len();
        state.transactions.push(tx.clone());
        let tx_hash = Hash::from(keccak256((index as u64 + 1).to_be_bytes()));

        state.block_number += 1;
        let outcome = self.execute(&mut state, &tx);
        debug!(tx_hash = ?tx_hash, ok = outcome.is_ok(), "ledger executed transaction");

        let withheld = state
            .faults
            .withhold_receipts_from
            .is_some_and(|from| index >= from);
        if !withheld {
            let (contract_address, status) = match outcome {
                Ok(created) => (created, U256::one()),
                Err(_) => (None, U256::zero()),
            };
            let receipt = TransactionReceipt {
                transaction_hash: tx_hash,
                block_number: Some(U256::from(state.block_number)),
                contract_address,
                gas_used: Some(U256::from(21_000)),
                status: Some(status),
            };
            state.receipts.insert(tx_hash, receipt);
        }
        Ok(tx_hash)
    }

    async fn transaction_receipt(&self, tx_hash: Hash) -> RpcResult<Option<TransactionReceipt>> {
        Ok(self.state.lock().receipts.get(&tx_hash).cloned())
    }

    async fn call(&self, call: CallRequest, _block: BlockTag) -> RpcResult<Bytes> {
        let state = self.state.lock();
        self.read(&state, &call).map(Bytes)
    }

    async fn block_number(&self) -> RpcResult<u64> {
        Ok(self.state.lock().block_number)
    }

    async fn network_version(&self) -> RpcResult<String> {
        Ok("5777".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::fixtures_dir;

    fn deploy(node: &LedgerNode, artifact: &ContractArtifact) -> Address {
        let mut state = node.state.lock();
        let tx = TransactionRequest::deploy(Address::repeat_byte(0xa1), artifact.bytecode.clone());
        node.execute(&mut state, &tx).unwrap().unwrap()
    }

    #[test]
    fn test_deploy_recognizes_artifacts() {
        let node = LedgerNode::from_artifacts(&fixtures_dir()).unwrap();
        let database = deploy(&node, &node.database.clone());
        let factory = deploy(&node, &node.factory.clone());

        assert_ne!(database, factory);
        assert!(node.items(database).is_empty());
        assert!(node.product(factory).is_none());
    }

    #[test]
    fn test_unknown_init_code_reverts() {
        let node = LedgerNode::from_artifacts(&fixtures_dir()).unwrap();
        let mut state = node.state.lock();
        let tx = TransactionRequest::deploy(Address::repeat_byte(0xa1), Bytes(vec![0xde, 0xad]));
        assert!(node.execute(&mut state, &tx).is_err());
    }

    #[tokio::test]
    async fn test_withheld_receipt() {
        let node = LedgerNode::from_artifacts(&fixtures_dir())
            .unwrap()
            .with_faults(Faults {
                withhold_receipts_from: Some(0),
                ..Faults::default()
            });
        let tx = TransactionRequest::deploy(Address::repeat_byte(0xa1), node.database.bytecode.clone());
        let hash = node.send_transaction(tx).await.unwrap();
        assert!(node.transaction_receipt(hash).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_call_without_code_returns_empty() {
        let node = LedgerNode::from_artifacts(&fixtures_dir()).unwrap();
        let out = node
            .call(
                CallRequest::new(Address::repeat_byte(0x77), Bytes(vec![1, 2, 3, 4])),
                BlockTag::Latest,
            )
            .await
            .unwrap();
        assert!(out.is_empty());
    }
}
