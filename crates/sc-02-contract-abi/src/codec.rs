//! Head/tail ABI encoding.
//!
//! Static values sit inline in the head; dynamic values are appended to the
//! tail and referenced from the head by a byte offset relative to the start
//! of the enclosing tuple.

use primitive_types::U256;
use shared_types::Address;

use crate::errors::AbiError;
use crate::param_type::ParamType;
use crate::token::Token;

const WORD: usize = 32;

/// Encode a sequence of tokens as a tuple.
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let head_len: usize = tokens.iter().map(head_size).sum();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        if is_dynamic(token) {
            head.extend_from_slice(&uint_word(U256::from(head_len + tail.len())));
            tail.extend(encode_token(token));
        } else {
            head.extend(encode_token(token));
        }
    }

    head.extend(tail);
    head
}

/// Decode `data` as a tuple of `types`.
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, AbiError> {
    let mut tokens = Vec::with_capacity(types.len());
    let mut offset = 0;
    for ty in types {
        let (token, consumed) = decode_at(ty, data, offset)?;
        tokens.push(token);
        offset += consumed;
    }
    Ok(tokens)
}

fn is_dynamic(token: &Token) -> bool {
    match token {
        Token::Bytes(_) | Token::String(_) | Token::Array(_) => true,
        Token::FixedArray(items) | Token::Tuple(items) => items.iter().any(is_dynamic),
        _ => false,
    }
}

fn head_size(token: &Token) -> usize {
    if is_dynamic(token) {
        return WORD;
    }
    match token {
        Token::FixedArray(items) | Token::Tuple(items) => items.iter().map(head_size).sum(),
        _ => WORD,
    }
}

fn encode_token(token: &Token) -> Vec<u8> {
    match token {
        Token::Address(a) => {
            let mut word = [0u8; WORD];
            word[12..].copy_from_slice(a.as_bytes());
            word.to_vec()
        }
        Token::Uint(v) | Token::Int(v) => uint_word(*v).to_vec(),
        Token::Bool(b) => uint_word(U256::from(u8::from(*b))).to_vec(),
        Token::FixedBytes(b) => pad_right(b),
        Token::Bytes(b) => encode_dynamic_bytes(b),
        Token::String(s) => encode_dynamic_bytes(s.as_bytes()),
        Token::Array(items) => {
            let mut out = uint_word(U256::from(items.len())).to_vec();
            out.extend(encode(items));
            out
        }
        Token::FixedArray(items) | Token::Tuple(items) => encode(items),
    }
}

fn encode_dynamic_bytes(b: &[u8]) -> Vec<u8> {
    let mut out = uint_word(U256::from(b.len())).to_vec();
    out.extend(pad_right(b));
    out
}

fn pad_right(b: &[u8]) -> Vec<u8> {
    let mut out = b.to_vec();
    out.resize(b.len().div_ceil(WORD) * WORD, 0);
    out
}

fn uint_word(v: U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    v.to_big_endian(&mut word);
    word
}

fn word_at(data: &[u8], offset: usize) -> Result<&[u8], AbiError> {
    slice_at(data, offset, WORD)
}

fn slice_at(data: &[u8], offset: usize, len: usize) -> Result<&[u8], AbiError> {
    let end = offset.checked_add(len).ok_or(AbiError::InsufficientData {
        needed: usize::MAX,
        available: data.len(),
    })?;
    data.get(offset..end).ok_or(AbiError::InsufficientData {
        needed: end,
        available: data.len(),
    })
}

fn usize_at(data: &[u8], offset: usize) -> Result<usize, AbiError> {
    let v = U256::from_big_endian(word_at(data, offset)?);
    if v.bits() > 32 {
        return Err(AbiError::InsufficientData {
            needed: usize::MAX,
            available: data.len(),
        });
    }
    Ok(v.as_usize())
}

/// Decode the value whose head starts at `offset`; returns the token and the
/// number of head bytes it occupied.
fn decode_at(ty: &ParamType, data: &[u8], offset: usize) -> Result<(Token, usize), AbiError> {
    if ty.is_dynamic() {
        let tail_offset = usize_at(data, offset)?;
        let tail = data.get(tail_offset..).ok_or(AbiError::InsufficientData {
            needed: tail_offset,
            available: data.len(),
        })?;
        return Ok((decode_tail(ty, tail)?, WORD));
    }
    Ok((decode_static(ty, data, offset)?, ty.static_size()))
}

fn decode_tail(ty: &ParamType, data: &[u8]) -> Result<Token, AbiError> {
    match ty {
        ParamType::Bytes => Ok(Token::Bytes(dynamic_bytes(data)?.to_vec())),
        ParamType::String => String::from_utf8(dynamic_bytes(data)?.to_vec())
            .map(Token::String)
            .map_err(|_| AbiError::InvalidUtf8),
        ParamType::Array(inner) => {
            let len = usize_at(data, 0)?;
            let needed = len
                .checked_mul(head_size_of(inner))
                .and_then(|n| n.checked_add(WORD))
                .unwrap_or(usize::MAX);
            if needed > data.len() {
                return Err(AbiError::InsufficientData {
                    needed,
                    available: data.len(),
                });
            }
            let types = vec![inner.as_ref().clone(); len];
            decode(&types, &data[WORD..]).map(Token::Array)
        }
        ParamType::FixedArray(inner, len) => {
            let types = vec![inner.as_ref().clone(); *len];
            decode(&types, data).map(Token::FixedArray)
        }
        ParamType::Tuple(types) => decode(types, data).map(Token::Tuple),
        static_ty => decode_static(static_ty, data, 0),
    }
}

/// Head bytes one value of `ty` occupies inside an enclosing tuple.
fn head_size_of(ty: &ParamType) -> usize {
    if ty.is_dynamic() {
        WORD
    } else {
        ty.static_size()
    }
}

fn dynamic_bytes(data: &[u8]) -> Result<&[u8], AbiError> {
    let len = usize_at(data, 0)?;
    slice_at(data, WORD, len)
}

fn decode_static(ty: &ParamType, data: &[u8], offset: usize) -> Result<Token, AbiError> {
    match ty {
        ParamType::Address => {
            let word = word_at(data, offset)?;
            Ok(Token::Address(Address::from_slice(&word[12..])))
        }
        ParamType::Uint(_) => Ok(Token::Uint(U256::from_big_endian(word_at(data, offset)?))),
        ParamType::Int(_) => Ok(Token::Int(U256::from_big_endian(word_at(data, offset)?))),
        ParamType::Bool => {
            let word = word_at(data, offset)?;
            Ok(Token::Bool(word.iter().any(|b| *b != 0)))
        }
        ParamType::FixedBytes(len) => {
            let word = word_at(data, offset)?;
            Ok(Token::FixedBytes(word[..*len].to_vec()))
        }
        ParamType::FixedArray(inner, len) => {
            let size = inner.static_size();
            (0..*len)
                .map(|i| decode_static(inner, data, offset + i * size))
                .collect::<Result<Vec<_>, _>>()
                .map(Token::FixedArray)
        }
        ParamType::Tuple(types) => {
            let mut cursor = offset;
            let mut items = Vec::with_capacity(types.len());
            for item_ty in types {
                items.push(decode_static(item_ty, data, cursor)?);
                cursor += item_ty.static_size();
            }
            Ok(Token::Tuple(items))
        }
        dynamic => Err(AbiError::UnknownType(format!("{} is not static", dynamic))),
    }
}
