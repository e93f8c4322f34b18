//! Compiled contract descriptors.
//!
//! Artifacts are the JSON files a Truffle build writes to `build/contracts/`:
//! `contractName`, `abi` and `bytecode` are read, everything else is ignored.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use shared_types::Bytes;

use crate::abi::Abi;
use crate::errors::ArtifactError;
use crate::token::Literal;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    #[serde(default)]
    contract_name: Option<String>,
    abi: Abi,
    #[serde(default)]
    bytecode: Option<String>,
}

/// Interface definition plus creation bytecode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractArtifact {
    pub contract_name: String,
    pub abi: Abi,
    /// Empty for interface-only artifacts
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Load an artifact file.
    ///
    /// The contract name falls back to the file stem when the descriptor has
    /// none.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: display.clone(),
            source,
        })?;

        let fallback_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self::parse(&content, &fallback_name).map_err(|e| match e {
            ArtifactError::Parse { source, .. } => ArtifactError::Parse {
                path: display,
                source,
            },
            other => other,
        })
    }

    /// Load `<dir>/<name>.json`.
    pub fn load_named<P: AsRef<Path>>(dir: P, name: &str) -> Result<Self, ArtifactError> {
        Self::load(dir.as_ref().join(format!("{}.json", name)))
    }

    /// Parse descriptor JSON.
    pub fn parse(json: &str, fallback_name: &str) -> Result<Self, ArtifactError> {
        let raw: RawArtifact = serde_json::from_str(json).map_err(|source| ArtifactError::Parse {
            path: fallback_name.to_string(),
            source,
        })?;

        let contract_name = raw
            .contract_name
            .unwrap_or_else(|| fallback_name.to_string());

        let bytecode = match raw.bytecode.as_deref() {
            None | Some("") | Some("0x") => Bytes::new(),
            Some(hex) => Bytes::from_str(hex).map_err(|source| ArtifactError::Bytecode {
                contract: contract_name.clone(),
                source,
            })?,
        };

        Ok(Self {
            contract_name,
            abi: raw.abi,
            bytecode,
        })
    }

    /// Whether the artifact can be deployed.
    pub fn is_deployable(&self) -> bool {
        !self.bytecode.is_empty()
    }

    /// Init code: bytecode followed by the encoded constructor arguments.
    pub fn deployment_data(&self, args: Vec<Literal>) -> Result<Bytes, ArtifactError> {
        if !self.is_deployable() {
            return Err(ArtifactError::NotDeployable(self.contract_name.clone()));
        }
        let encoded = self
            .abi
            .constructor()
            .encode_args(args)
            .map_err(|source| ArtifactError::Constructor {
                contract: self.contract_name.clone(),
                source,
            })?;

        let mut data = self.bytecode.as_slice().to_vec();
        data.extend(encoded);
        Ok(Bytes(data))
    }
}
