//! # Error Types
//!
//! Errors for ABI encoding/decoding and artifact loading.

use shared_types::HexError;
use thiserror::Error;

/// Errors raised while encoding or decoding ABI data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// Type string is not a supported Solidity type.
    #[error("unknown ABI type: {0}")]
    UnknownType(String),

    /// No function with this name in the interface.
    #[error("function not found: {0}")]
    FunctionNotFound(String),

    /// Wrong number of arguments for a call.
    #[error("{function} expects {expected} arguments, got {actual}")]
    ArgumentCount {
        function: String,
        expected: usize,
        actual: usize,
    },

    /// Argument cannot be coerced to the parameter type.
    #[error("invalid argument for {param_type}: {reason}")]
    InvalidArgument { param_type: String, reason: String },

    /// Return data ended before the value it should contain.
    #[error("insufficient data: need {needed} bytes, have {available}")]
    InsufficientData { needed: usize, available: usize },

    /// A `string` value was not valid UTF-8.
    #[error("invalid utf-8 in string value")]
    InvalidUtf8,

    /// Call data does not start with the function's selector.
    #[error("selector mismatch: expected 0x{expected}, got 0x{actual}")]
    SelectorMismatch { expected: String, actual: String },

    /// Decoded token has a different kind than requested.
    #[error("unexpected token: expected {expected}, got {actual}")]
    UnexpectedToken { expected: String, actual: String },
}

/// Errors raised while loading compiled artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// File could not be read.
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File is not a valid artifact descriptor.
    #[error("failed to parse artifact {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Bytecode field is not hex (e.g. unlinked library placeholders).
    #[error("invalid bytecode in {contract}: {source}")]
    Bytecode {
        contract: String,
        #[source]
        source: HexError,
    },

    /// Constructor arguments do not match the constructor inputs.
    #[error("invalid constructor arguments for {contract}: {source}")]
    Constructor {
        contract: String,
        #[source]
        source: AbiError,
    },

    /// Interface-only artifact used for deployment.
    #[error("contract {0} has no deployable bytecode")]
    NotDeployable(String),
}
