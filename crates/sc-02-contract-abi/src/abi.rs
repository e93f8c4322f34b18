//! JSON ABI model: functions, constructor and selectors.

use serde::{Deserialize, Serialize};
use shared_types::{keccak256, Bytes};

use crate::codec;
use crate::errors::AbiError;
use crate::param_type::ParamType;
use crate::token::{Literal, Token};

/// A single parameter as it appears in the JSON ABI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Param>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub indexed: bool,
}

/// One entry of a contract's JSON ABI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AbiEntry {
    Function(Function),
    Constructor(Constructor),
    Event(Event),
    Fallback {},
    Receive {},
    Error(Event),
}

/// A contract function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Function {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<Param>,
    #[serde(default)]
    pub outputs: Vec<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_mutability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<bool>,
}

/// The contract constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constructor {
    #[serde(default)]
    pub inputs: Vec<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_mutability: Option<String>,
}

/// Events and custom errors: only the shape is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<Param>,
    #[serde(default)]
    pub anonymous: bool,
}

fn param_types(params: &[Param]) -> Result<Vec<ParamType>, AbiError> {
    params.iter().map(ParamType::from_param).collect()
}

fn coerce(
    context: &str,
    types: &[ParamType],
    args: Vec<Literal>,
) -> Result<Vec<Token>, AbiError> {
    if args.len() != types.len() {
        return Err(AbiError::ArgumentCount {
            function: context.to_string(),
            expected: types.len(),
            actual: args.len(),
        });
    }
    args.into_iter()
        .zip(types)
        .map(|(arg, ty)| arg.into_token(ty))
        .collect()
}

impl Function {
    /// Canonical signature, e.g. `addHandler(address,string,string)`.
    pub fn signature(&self) -> Result<String, AbiError> {
        let types = param_types(&self.inputs)?;
        let list: Vec<String> = types.iter().map(ToString::to_string).collect();
        Ok(format!("{}({})", self.name, list.join(",")))
    }

    /// First four bytes of keccak256 of the signature.
    pub fn selector(&self) -> Result<[u8; 4], AbiError> {
        let hash = keccak256(self.signature()?);
        Ok([hash[0], hash[1], hash[2], hash[3]])
    }

    /// True for view/pure (or legacy `constant`) functions.
    pub fn is_read_only(&self) -> bool {
        matches!(self.state_mutability.as_deref(), Some("view" | "pure"))
            || self.constant == Some(true)
    }

    /// Selector followed by the coerced, encoded arguments.
    pub fn encode_input(&self, args: Vec<Literal>) -> Result<Bytes, AbiError> {
        let types = param_types(&self.inputs)?;
        let tokens = coerce(&self.name, &types, args)?;
        let mut data = self.selector()?.to_vec();
        data.extend(codec::encode(&tokens));
        Ok(Bytes(data))
    }

    /// Decode call data produced by [`Function::encode_input`].
    pub fn decode_input(&self, data: &[u8]) -> Result<Vec<Token>, AbiError> {
        let selector = self.selector()?;
        let actual = data.get(..4).ok_or(AbiError::InsufficientData {
            needed: 4,
            available: data.len(),
        })?;
        if actual != selector {
            return Err(AbiError::SelectorMismatch {
                expected: hex::encode(selector),
                actual: hex::encode(actual),
            });
        }
        codec::decode(&param_types(&self.inputs)?, &data[4..])
    }

    /// Encode return values (used by node doubles).
    pub fn encode_output(&self, tokens: &[Token]) -> Vec<u8> {
        codec::encode(tokens)
    }

    /// Decode return data into the declared outputs.
    pub fn decode_output(&self, data: &[u8]) -> Result<Vec<Token>, AbiError> {
        codec::decode(&param_types(&self.outputs)?, data)
    }
}

impl Constructor {
    /// Encode constructor arguments (appended to the init code).
    pub fn encode_args(&self, args: Vec<Literal>) -> Result<Vec<u8>, AbiError> {
        let types = param_types(&self.inputs)?;
        let tokens = coerce("constructor", &types, args)?;
        Ok(codec::encode(&tokens))
    }
}

/// A contract interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Abi {
    pub entries: Vec<AbiEntry>,
}

impl Abi {
    /// Parse a JSON ABI array.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.entries.iter().filter_map(|entry| match entry {
            AbiEntry::Function(f) => Some(f),
            _ => None,
        })
    }

    /// First function called `name`.
    pub fn function(&self, name: &str) -> Result<&Function, AbiError> {
        self.functions()
            .find(|f| f.name == name)
            .ok_or_else(|| AbiError::FunctionNotFound(name.to_string()))
    }

    /// Function matching the first four bytes of `data`.
    pub fn function_by_selector(&self, data: &[u8]) -> Option<&Function> {
        let selector = data.get(..4)?;
        self.functions()
            .find(|f| f.selector().map(|s| s == selector).unwrap_or(false))
    }

    /// Declared constructor, or the implicit zero-argument one.
    pub fn constructor(&self) -> Constructor {
        self.entries
            .iter()
            .find_map(|entry| match entry {
                AbiEntry::Constructor(c) => Some(c.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }
}
