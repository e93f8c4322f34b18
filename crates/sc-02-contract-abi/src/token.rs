//! Decoded ABI values and argument coercion.

use primitive_types::U256;
use shared_types::{parse_address, Address};

use crate::errors::AbiError;
use crate::param_type::ParamType;

/// A typed ABI value.
///
/// `Int` holds the two's complement bit pattern; use [`Token::to_i128`] to
/// read it back as a signed number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Address(Address),
    /// Exactly N bytes for `bytesN`
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    Int(U256),
    Uint(U256),
    Bool(bool),
    String(String),
    FixedArray(Vec<Token>),
    Array(Vec<Token>),
    Tuple(Vec<Token>),
}

impl Token {
    fn kind(&self) -> &'static str {
        match self {
            Token::Address(_) => "address",
            Token::FixedBytes(_) => "fixed bytes",
            Token::Bytes(_) => "bytes",
            Token::Int(_) => "int",
            Token::Uint(_) => "uint",
            Token::Bool(_) => "bool",
            Token::String(_) => "string",
            Token::FixedArray(_) => "fixed array",
            Token::Array(_) => "array",
            Token::Tuple(_) => "tuple",
        }
    }

    fn unexpected(&self, expected: &str) -> AbiError {
        AbiError::UnexpectedToken {
            expected: expected.to_string(),
            actual: self.kind().to_string(),
        }
    }

    pub fn into_address(self) -> Result<Address, AbiError> {
        match self {
            Token::Address(a) => Ok(a),
            other => Err(other.unexpected("address")),
        }
    }

    pub fn into_string(self) -> Result<String, AbiError> {
        match self {
            Token::String(s) => Ok(s),
            other => Err(other.unexpected("string")),
        }
    }

    /// Raw bytes of a `bytes` or `bytesN` value.
    pub fn into_bytes(self) -> Result<Vec<u8>, AbiError> {
        match self {
            Token::Bytes(b) | Token::FixedBytes(b) => Ok(b),
            other => Err(other.unexpected("bytes")),
        }
    }

    pub fn into_uint(self) -> Result<U256, AbiError> {
        match self {
            Token::Uint(v) => Ok(v),
            other => Err(other.unexpected("uint")),
        }
    }

    /// Signed value of an `Int` (or small `Uint`), if it fits in i128.
    pub fn to_i128(&self) -> Option<i128> {
        match self {
            Token::Int(raw) => {
                if raw.bit(255) {
                    // negative: magnitude is !raw + 1
                    let magnitude = (!*raw).overflowing_add(U256::one()).0;
                    if magnitude.bits() > 127 {
                        return (magnitude == U256::one() << 127).then_some(i128::MIN);
                    }
                    Some(-(magnitude.as_u128() as i128))
                } else if raw.bits() <= 127 {
                    Some(raw.as_u128() as i128)
                } else {
                    None
                }
            }
            Token::Uint(raw) if raw.bits() <= 127 => Some(raw.as_u128() as i128),
            _ => None,
        }
    }
}

/// An untyped call argument, coerced to the ABI parameter type at encode time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Int(i128),
    Text(String),
    Address(Address),
    Bool(bool),
    Bytes(Vec<u8>),
    List(Vec<Literal>),
}

impl From<i32> for Literal {
    fn from(v: i32) -> Self {
        Literal::Int(v.into())
    }
}

impl From<i64> for Literal {
    fn from(v: i64) -> Self {
        Literal::Int(v.into())
    }
}

impl From<u64> for Literal {
    fn from(v: u64) -> Self {
        Literal::Int(v.into())
    }
}

impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Literal::Text(v.to_string())
    }
}

impl From<String> for Literal {
    fn from(v: String) -> Self {
        Literal::Text(v)
    }
}

impl From<Address> for Literal {
    fn from(v: Address) -> Self {
        Literal::Address(v)
    }
}

impl From<bool> for Literal {
    fn from(v: bool) -> Self {
        Literal::Bool(v)
    }
}

impl From<Vec<u8>> for Literal {
    fn from(v: Vec<u8>) -> Self {
        Literal::Bytes(v)
    }
}

impl Literal {
    /// Coerce into a token of type `ty`.
    pub fn into_token(self, ty: &ParamType) -> Result<Token, AbiError> {
        let invalid = |reason: String| AbiError::InvalidArgument {
            param_type: ty.to_string(),
            reason,
        };

        match (ty, self) {
            (ParamType::Address, Literal::Address(a)) => Ok(Token::Address(a)),
            (ParamType::Address, Literal::Text(s)) => parse_address(&s)
                .map(Token::Address)
                .map_err(|e| invalid(e.to_string())),

            (ParamType::Bool, Literal::Bool(b)) => Ok(Token::Bool(b)),
            (ParamType::Bool, Literal::Int(0)) => Ok(Token::Bool(false)),
            (ParamType::Bool, Literal::Int(1)) => Ok(Token::Bool(true)),

            (ParamType::Uint(bits), Literal::Int(v)) => {
                if v < 0 {
                    return Err(invalid(format!("negative value {} for unsigned type", v)));
                }
                let value = U256::from(v as u128);
                check_unsigned_width(value, *bits).map_err(invalid)?;
                Ok(Token::Uint(value))
            }
            (ParamType::Uint(bits), Literal::Text(s)) => {
                let value = parse_numeric_text(&s).map_err(invalid)?;
                check_unsigned_width(value, *bits).map_err(invalid)?;
                Ok(Token::Uint(value))
            }

            (ParamType::Int(bits), Literal::Int(v)) => {
                if *bits < 128 {
                    let bound = 1i128 << (bits - 1);
                    if v < -bound || v >= bound {
                        return Err(invalid(format!("{} out of range for int{}", v, bits)));
                    }
                }
                Ok(Token::Int(twos_complement(v)))
            }
            (ParamType::Int(_), Literal::Text(s)) => {
                let v: i128 = s
                    .trim()
                    .parse()
                    .map_err(|_| invalid(format!("not an integer: {:?}", s)))?;
                Literal::Int(v).into_token(ty)
            }

            (ParamType::FixedBytes(len), literal @ (Literal::Text(_) | Literal::Bytes(_))) => {
                let mut raw = literal_bytes(literal);
                if raw.len() > *len {
                    return Err(invalid(format!("{} bytes exceed bytes{}", raw.len(), len)));
                }
                raw.resize(*len, 0);
                Ok(Token::FixedBytes(raw))
            }
            (ParamType::Bytes, literal @ (Literal::Text(_) | Literal::Bytes(_))) => {
                Ok(Token::Bytes(literal_bytes(literal)))
            }

            (ParamType::String, Literal::Text(s)) => Ok(Token::String(s)),
            (ParamType::String, Literal::Bytes(b)) => String::from_utf8(b)
                .map(Token::String)
                .map_err(|_| AbiError::InvalidUtf8),

            (ParamType::Array(inner), Literal::List(items)) => items
                .into_iter()
                .map(|item| item.into_token(inner))
                .collect::<Result<Vec<_>, _>>()
                .map(Token::Array),
            (ParamType::FixedArray(inner, len), Literal::List(items)) => {
                if items.len() != *len {
                    return Err(invalid(format!("expected {} elements, got {}", len, items.len())));
                }
                items
                    .into_iter()
                    .map(|item| item.into_token(inner))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Token::FixedArray)
            }
            (ParamType::Tuple(types), Literal::List(items)) => {
                if items.len() != types.len() {
                    return Err(invalid(format!(
                        "expected {} components, got {}",
                        types.len(),
                        items.len()
                    )));
                }
                items
                    .into_iter()
                    .zip(types)
                    .map(|(item, ty)| item.into_token(ty))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Token::Tuple)
            }

            (_, literal) => Err(invalid(format!("cannot coerce {:?}", literal))),
        }
    }
}

/// Text that looks like `0x`-hex is taken as hex, anything else as UTF-8.
fn literal_bytes(literal: Literal) -> Vec<u8> {
    match literal {
        Literal::Bytes(b) => b,
        Literal::Text(s) => s
            .strip_prefix("0x")
            .filter(|h| h.len() % 2 == 0)
            .and_then(|h| hex::decode(h).ok())
            .unwrap_or_else(|| s.into_bytes()),
        _ => Vec::new(),
    }
}

fn parse_numeric_text(s: &str) -> Result<U256, String> {
    let s = s.trim();
    match s.strip_prefix("0x") {
        Some(hex) => U256::from_str_radix(hex, 16).map_err(|_| format!("not a hex number: {:?}", s)),
        None => U256::from_dec_str(s).map_err(|_| format!("not a number: {:?}", s)),
    }
}

fn check_unsigned_width(value: U256, bits: usize) -> Result<(), String> {
    if value.bits() > bits {
        return Err(format!("{} does not fit in uint{}", value, bits));
    }
    Ok(())
}

fn twos_complement(v: i128) -> U256 {
    if v >= 0 {
        U256::from(v as u128)
    } else {
        // -(v) - 1 never overflows, even for i128::MIN
        !U256::from((-(v + 1)) as u128)
    }
}
