//! # Error Types

use sc_01_rpc_client::RpcError;
use sc_02_contract_abi::{AbiError, ArtifactError};
use shared_types::Hash;
use thiserror::Error;

/// Errors from contract deployment and proxy calls.
#[derive(Debug, Error)]
pub enum ContractError {
    /// Node access failed.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// Arguments or return data did not fit the interface.
    #[error(transparent)]
    Abi(#[from] AbiError),

    /// Artifact could not be turned into init code.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// Deployment receipt carried no contract address.
    #[error("deployment {tx_hash:?} produced no contract address")]
    MissingContractAddress { tx_hash: Hash },

    /// Transaction was mined but execution failed.
    #[error("transaction {tx_hash:?} reverted")]
    Reverted { tx_hash: Hash },

    /// Read returned fewer values than the proxy needs.
    #[error("{function} returned {actual} values, expected at least {expected}")]
    ShortResult {
        function: String,
        expected: usize,
        actual: usize,
    },
}
