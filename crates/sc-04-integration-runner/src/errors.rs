//! # Error Types
//!
//! Two failure surfaces: [`SetupError`] stops the harness before any phase
//! runs, [`PhaseError`] aborts the current phase and halts the series.
//! Read-back mismatches are not errors; they are recorded as failed checks.

use std::path::PathBuf;

use sc_01_rpc_client::RpcError;
use sc_02_contract_abi::ArtifactError;
use sc_03_contracts::ContractError;
use thiserror::Error;

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Errors raised before the first phase starts.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("node unavailable: {0}")]
    Node(#[from] RpcError),

    #[error("artifact unavailable: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("sender account {index} requested but the node has {available} accounts")]
    NoAccount { index: usize, available: usize },
}

/// Errors that abort a phase.
#[derive(Debug, Error)]
pub enum PhaseError {
    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// A handle an earlier phase should have produced is absent.
    #[error("{0} has not been deployed")]
    MissingHandle(&'static str),
}
