//! # Error Types
//!
//! Parse errors for hex-encoded primitives.

use thiserror::Error;

/// Errors produced while parsing hex strings into primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    /// Input was not valid hex.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Input decoded to the wrong number of bytes.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Quantity does not fit the target integer.
    #[error("Quantity overflow: {0}")]
    Overflow(String),
}
