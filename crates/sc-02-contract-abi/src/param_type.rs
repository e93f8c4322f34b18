//! Solidity parameter types.

use std::fmt;

use crate::abi::Param;
use crate::errors::AbiError;

/// A Solidity ABI type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    Address,
    Bool,
    /// `uintN`, N in bits
    Uint(usize),
    /// `intN`, N in bits
    Int(usize),
    /// `bytesN`, N in bytes (1..=32)
    FixedBytes(usize),
    Bytes,
    String,
    /// `T[]`
    Array(Box<ParamType>),
    /// `T[k]`
    FixedArray(Box<ParamType>, usize),
    /// `(T1,T2,...)`
    Tuple(Vec<ParamType>),
}

impl ParamType {
    /// Parse an elementary or array type string (`uint256`, `bytes32[]`, ...).
    ///
    /// Tuples need their components and go through [`ParamType::from_param`].
    pub fn parse(s: &str) -> Result<Self, AbiError> {
        let unknown = || AbiError::UnknownType(s.to_string());

        if let Some(inner) = s.strip_suffix("[]") {
            return Ok(ParamType::Array(Box::new(Self::parse(inner)?)));
        }
        if let Some(body) = s.strip_suffix(']') {
            let open = body.rfind('[').ok_or_else(unknown)?;
            let len: usize = body[open + 1..].parse().map_err(|_| unknown())?;
            let inner = Self::parse(&body[..open])?;
            return Ok(ParamType::FixedArray(Box::new(inner), len));
        }

        match s {
            "address" => return Ok(ParamType::Address),
            "bool" => return Ok(ParamType::Bool),
            "string" => return Ok(ParamType::String),
            "bytes" => return Ok(ParamType::Bytes),
            "uint" => return Ok(ParamType::Uint(256)),
            "int" => return Ok(ParamType::Int(256)),
            _ => {}
        }

        if let Some(bits) = s.strip_prefix("uint") {
            let bits = parse_bits(bits).ok_or_else(unknown)?;
            return Ok(ParamType::Uint(bits));
        }
        if let Some(bits) = s.strip_prefix("int") {
            let bits = parse_bits(bits).ok_or_else(unknown)?;
            return Ok(ParamType::Int(bits));
        }
        if let Some(len) = s.strip_prefix("bytes") {
            let len: usize = len.parse().map_err(|_| unknown())?;
            if (1..=32).contains(&len) {
                return Ok(ParamType::FixedBytes(len));
            }
        }

        Err(unknown())
    }

    /// Resolve a JSON ABI parameter, expanding `tuple` components.
    pub fn from_param(param: &Param) -> Result<Self, AbiError> {
        let Some(suffix) = param.kind.strip_prefix("tuple") else {
            return Self::parse(&param.kind);
        };

        let components = param
            .components
            .iter()
            .map(Self::from_param)
            .collect::<Result<Vec<_>, _>>()?;
        let mut ty = ParamType::Tuple(components);

        // Array suffixes apply left to right: tuple[2][] is an array of tuple[2].
        let mut rest = suffix;
        while !rest.is_empty() {
            let unknown = || AbiError::UnknownType(param.kind.clone());
            let body = rest.strip_prefix('[').ok_or_else(unknown)?;
            let close = body.find(']').ok_or_else(unknown)?;
            let dims = &body[..close];
            ty = if dims.is_empty() {
                ParamType::Array(Box::new(ty))
            } else {
                let len = dims.parse().map_err(|_| unknown())?;
                ParamType::FixedArray(Box::new(ty), len)
            };
            rest = &body[close + 1..];
        }
        Ok(ty)
    }

    /// Dynamic types are encoded out-of-line behind an offset.
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
            ParamType::FixedArray(inner, _) => inner.is_dynamic(),
            ParamType::Tuple(items) => items.iter().any(ParamType::is_dynamic),
            _ => false,
        }
    }

    /// Encoded size of a static type in bytes.
    pub(crate) fn static_size(&self) -> usize {
        match self {
            ParamType::FixedArray(inner, len) => inner.static_size() * len,
            ParamType::Tuple(items) => items.iter().map(ParamType::static_size).sum(),
            _ => 32,
        }
    }
}

fn parse_bits(s: &str) -> Option<usize> {
    let bits: usize = s.parse().ok()?;
    (bits > 0 && bits <= 256 && bits % 8 == 0).then_some(bits)
}

impl fmt::Display for ParamType {
    /// Canonical form used in function signatures.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => f.write_str("address"),
            ParamType::Bool => f.write_str("bool"),
            ParamType::Uint(bits) => write!(f, "uint{}", bits),
            ParamType::Int(bits) => write!(f, "int{}", bits),
            ParamType::FixedBytes(len) => write!(f, "bytes{}", len),
            ParamType::Bytes => f.write_str("bytes"),
            ParamType::String => f.write_str("string"),
            ParamType::Array(inner) => write!(f, "{}[]", inner),
            ParamType::FixedArray(inner, len) => write!(f, "{}[{}]", inner, len),
            ParamType::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}
