//! # SC-04 Integration Runner
//!
//! Drives the supply-chain contracts through a fixed, ordered suite against a
//! node and reports every check.
//!
//! ## Phases
//!
//! 1. Deploy `Database`
//! 2. Deploy `ProductFactory`
//! 3. Register the sender as a handler
//! 4. Create "Test Product 1"
//! 5. Create "Test Product 2" and re-verify the first product
//!
//! A phase whose transaction is never confirmed aborts the series; the
//! remaining phases are reported as skipped. Read-back mismatches are
//! reported with expected and actual values and do not stop the series.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod context;
pub mod errors;
pub mod logging;
pub mod phases;
pub mod report;
pub mod runner;
pub mod scenario;

use std::sync::Arc;

use sc_01_rpc_client::{NodeApi, RpcClient};
use tracing::info;

pub use config::HarnessConfig;
pub use context::{ContractSet, SuiteContext};
pub use errors::{ConfigError, PhaseError, SetupError};
pub use logging::{init_logging, LoggingError};
pub use phases::product_suite;
pub use report::{CheckOutcome, CheckResult, PhaseReport, PhaseStatus, SuiteReport, SuiteSummary};
pub use runner::{Checks, Phase, SequentialRunner};
pub use scenario::{CoordinateEncoding, Scenario};

/// Connect to the configured node and run the product suite.
pub async fn run_suite(config: &HarnessConfig) -> Result<SuiteReport, SetupError> {
    let client = RpcClient::with_timeout(&config.node.rpc_url, config.request_timeout())?;
    let network = client.network_version().await?;
    info!(rpc_url = %config.node.rpc_url, network = %network, "connected to node");

    run_suite_with(Arc::new(client), config).await
}

/// Run the product suite against an existing node connection.
pub async fn run_suite_with(
    node: Arc<dyn NodeApi>,
    config: &HarnessConfig,
) -> Result<SuiteReport, SetupError> {
    let contracts = ContractSet::load(&config.artifacts)?;
    let mut ctx = SuiteContext::connect(node, contracts, config).await?;

    let scenario = Scenario::new(config.scenario.coordinate_encoding);
    let report = product_suite(&scenario).run(&mut ctx).await;
    Ok(report)
}
