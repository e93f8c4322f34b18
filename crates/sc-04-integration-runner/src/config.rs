//! Harness configuration.
//!
//! Sources, later ones winning: built-in defaults, an optional TOML file,
//! `SC_*` environment variables, command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sc_01_rpc_client::{ConfirmationPolicy, DEFAULT_RPC_URL};
use sc_03_contracts::DEFAULT_GAS;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::scenario::CoordinateEncoding;

/// Main harness configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Node connection
    pub node: NodeConfig,
    /// Compiled contract artifacts
    pub artifacts: ArtifactsConfig,
    /// Sender and gas for every transaction
    pub transactions: TransactionConfig,
    /// Receipt polling
    pub confirmation: ConfirmationConfig,
    /// Submitted values
    pub scenario: ScenarioConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// JSON-RPC endpoint
    pub rpc_url: String,
    /// Per-request HTTP timeout
    pub request_timeout_secs: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            request_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Directory holding `<ContractName>.json` files
    pub dir: PathBuf,
    pub database: String,
    pub product_factory: String,
    pub product: String,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("build/contracts"),
            database: "Database".to_string(),
            product_factory: "ProductFactory".to_string(),
            product: "Product".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionConfig {
    pub gas: u64,
    /// Index into `eth_accounts` of the sending account
    pub sender_index: usize,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            gas: DEFAULT_GAS,
            sender_index: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    pub poll_interval_ms: u64,
    /// Give up on a transaction after this long
    pub timeout_secs: u64,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub coordinate_encoding: CoordinateEncoding,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl HarnessConfig {
    /// Defaults or `path`, then environment overrides.
    ///
    /// Not validated: callers layer their own overrides on top and call
    /// [`HarnessConfig::validate`] last.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `SC_*` overrides from the process environment.
    ///
    /// - `SC_RPC_URL`: node endpoint
    /// - `SC_ARTIFACTS_DIR`: artifact directory
    /// - `SC_LOG_LEVEL`: log filter
    /// - `SC_JSON_LOGS`: `true`/`1` for JSON output
    /// - `SC_COORDINATE_ENCODING`: `legacy-xor` or `scaled`
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SC_RPC_URL") {
            self.node.rpc_url = url;
        }
        if let Some(dir) = lookup("SC_ARTIFACTS_DIR") {
            self.artifacts.dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup("SC_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = lookup("SC_JSON_LOGS") {
            self.logging.json = json.eq_ignore_ascii_case("true") || json == "1";
        }
        if let Some(encoding) = lookup("SC_COORDINATE_ENCODING") {
            self.scenario.coordinate_encoding = encoding.parse()?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.node.rpc_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "node.rpc_url",
                reason: format!("'{}' is not an http(s) URL", url),
            });
        }

        if self.node.request_timeout_secs == 0 {
            return Err(invalid("node.request_timeout_secs", "cannot be 0"));
        }

        for (field, name) in [
            ("artifacts.database", &self.artifacts.database),
            ("artifacts.product_factory", &self.artifacts.product_factory),
            ("artifacts.product", &self.artifacts.product),
        ] {
            if name.trim().is_empty() {
                return Err(invalid(field, "contract name cannot be empty"));
            }
        }

        if self.transactions.gas == 0 {
            return Err(invalid("transactions.gas", "cannot be 0"));
        }

        if self.confirmation.poll_interval_ms == 0 {
            return Err(invalid("confirmation.poll_interval_ms", "cannot be 0"));
        }

        if self.confirmation.timeout_secs == 0 {
            return Err(invalid("confirmation.timeout_secs", "cannot be 0"));
        }

        if self.logging.level.trim().is_empty() {
            return Err(invalid("logging.level", "cannot be empty"));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.node.request_timeout_secs)
    }

    pub fn confirmation_policy(&self) -> ConfirmationPolicy {
        ConfirmationPolicy {
            poll_interval: Duration::from_millis(self.confirmation.poll_interval_ms),
            timeout: Duration::from_secs(self.confirmation.timeout_secs),
        }
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
}
