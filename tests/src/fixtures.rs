//! Shared fixtures: artifact directory and a fast-confirming configuration.

use std::path::PathBuf;
use std::sync::Arc;

use sc_04_integration_runner::HarnessConfig;

use crate::ledger::{Faults, LedgerNode};

/// Compiled-artifact fixtures shipped with this crate.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/contracts")
}

/// Default configuration pointed at the fixtures, polling fast with a short
/// confirmation timeout.
pub fn harness_config() -> HarnessConfig {
    let mut config = HarnessConfig::default();
    config.artifacts.dir = fixtures_dir();
    config.confirmation.poll_interval_ms = 5;
    config.confirmation.timeout_secs = 1;
    config
}

pub fn ledger() -> Arc<LedgerNode> {
    faulty_ledger(Faults::default())
}

pub fn faulty_ledger(faults: Faults) -> Arc<LedgerNode> {
    match LedgerNode::from_artifacts(&fixtures_dir()) {
        Ok(node) => Arc::new(node.with_faults(faults)),
        Err(e) => panic!("fixture artifacts unreadable: {}", e),
    }
}
