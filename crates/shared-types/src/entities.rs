//! # Core Primitives
//!
//! All types follow Ethereum JSON-RPC conventions with hex string serialization.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::HexError;

// Re-export primitive types for convenience
pub use primitive_types::{H160 as Address, H256 as Hash, U256};

/// Byte string with `0x` hex serialization (call data, return data, bytecode).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn new() -> Self {
        Bytes(Vec::new())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Render as a `0x`-prefixed lowercase hex string.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(v: Vec<u8>) -> Self {
        Bytes(v)
    }
}

impl From<&[u8]> for Bytes {
    fn from(v: &[u8]) -> Self {
        Bytes(v.to_vec())
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Bytes {
    type Err = HexError;

    /// Accepts `0x`-prefixed or bare hex. An empty string (or bare `0x`) is empty bytes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = strip_hex_prefix(s.trim());
        hex::decode(s)
            .map(Bytes)
            .map_err(|e| HexError::InvalidHex(e.to_string()))
    }
}

impl Serialize for Bytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Bytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Bytes::from_str(&s).map_err(|_| de::Error::custom("invalid hex bytes"))
    }
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Parse a hex quantity (`"0x1a"`) into a u64.
pub fn parse_hex_u64(s: &str) -> Result<u64, HexError> {
    let digits = strip_hex_prefix(s);
    if digits.is_empty() {
        return Err(HexError::InvalidHex(s.to_string()));
    }
    u64::from_str_radix(digits, 16).map_err(|_| HexError::Overflow(s.to_string()))
}

/// Parse a 20-byte address from hex, with or without prefix.
pub fn parse_address(s: &str) -> Result<Address, HexError> {
    let raw = hex::decode(strip_hex_prefix(s.trim()))
        .map_err(|e| HexError::InvalidHex(e.to_string()))?;
    if raw.len() != 20 {
        return Err(HexError::InvalidLength {
            expected: 20,
            actual: raw.len(),
        });
    }
    Ok(Address::from_slice(&raw))
}
