//! Node access errors.
//!
//! JSON-RPC error objects keep their code and message so callers can report
//! exactly what the node said.

use std::time::Duration;

use shared_types::{Hash, HexError};
use thiserror::Error;

/// Errors surfaced by [`crate::NodeApi`] implementations.
#[derive(Debug, Error)]
pub enum RpcError {
    /// HTTP client could not be built.
    #[error("Failed to create HTTP client: {0}")]
    HttpClientCreation(#[source] reqwest::Error),

    /// Request never reached the node or the response could not be read.
    #[error("Transport error calling {method}: {source}")]
    Transport {
        method: String,
        #[source]
        source: reqwest::Error,
    },

    /// Node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Result payload had an unexpected shape.
    #[error("Failed to decode {method} result: {source}")]
    Decode {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    /// Hex quantity in a result could not be parsed.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(#[from] HexError),

    /// No receipt appeared within the confirmation window.
    #[error("Transaction {tx_hash:?} not confirmed after {waited:?}")]
    ConfirmationTimeout { tx_hash: Hash, waited: Duration },
}

/// Result alias for node access.
pub type RpcResult<T> = Result<T, RpcError>;
