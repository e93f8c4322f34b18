//! Transaction, call and receipt objects in JSON-RPC wire shape.

use serde::{Deserialize, Serialize, Serializer};
use shared_types::{Address, Bytes, Hash, U256};

/// Transaction object for `eth_sendTransaction`.
///
/// `to == None` deploys `data` as init code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Unlocked sender account
    pub from: Address,
    /// Target contract (None for contract creation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    /// Gas limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<U256>,
    /// Gas price (legacy)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,
    /// Value to transfer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    /// Call data or init code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
}

impl TransactionRequest {
    /// Contract creation from `from` carrying `init_code`.
    pub fn deploy(from: Address, init_code: Bytes) -> Self {
        Self {
            from,
            data: Some(init_code),
            ..Default::default()
        }
    }

    /// Message call from `from` to `to` with `data`.
    pub fn invoke(from: Address, to: Address, data: Bytes) -> Self {
        Self {
            from,
            to: Some(to),
            data: Some(data),
            ..Default::default()
        }
    }

    /// Set the gas limit.
    pub fn with_gas(mut self, gas: u64) -> Self {
        self.gas = Some(U256::from(gas));
        self
    }

    /// True when this request deploys a contract.
    pub fn is_deployment(&self) -> bool {
        self.to.is_none()
    }
}

/// Call object for `eth_call`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    /// Caller (optional for reads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    /// Contract being queried
    pub to: Address,
    /// Encoded call data
    pub data: Bytes,
}

impl CallRequest {
    pub fn new(to: Address, data: Bytes) -> Self {
        Self {
            from: None,
            to,
            data,
        }
    }
}

/// Receipt returned by `eth_getTransactionReceipt` once a transaction is mined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: Hash,
    #[serde(default)]
    pub block_number: Option<U256>,
    /// Address of the created contract, for deployments
    #[serde(default)]
    pub contract_address: Option<Address>,
    #[serde(default)]
    pub gas_used: Option<U256>,
    /// `0x1` success, `0x0` failure; absent on pre-Byzantium nodes
    #[serde(default)]
    pub status: Option<U256>,
}

impl TransactionReceipt {
    /// Whether execution succeeded. Nodes without a status field count as success.
    pub fn is_success(&self) -> bool {
        self.status.map_or(true, |s| !s.is_zero())
    }
}

/// Block tags for JSON-RPC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockTag {
    #[default]
    Latest,
    Earliest,
    Pending,
}

impl BlockTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockTag::Latest => "latest",
            BlockTag::Earliest => "earliest",
            BlockTag::Pending => "pending",
        }
    }
}

impl Serialize for BlockTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
