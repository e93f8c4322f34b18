//! sc-harness: runs the supply-chain contract suite against a node.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use sc_04_integration_runner::{init_logging, run_suite, CoordinateEncoding, HarnessConfig};

/// Deploy the supply-chain contracts and verify product creation
#[derive(Parser, Debug)]
#[command(name = "sc-harness")]
#[command(about = "Sequential integration suite for the supply-chain contracts")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON-RPC endpoint of the node
    #[arg(long)]
    rpc_url: Option<String>,

    /// Directory holding compiled contract artifacts
    #[arg(long)]
    artifacts_dir: Option<PathBuf>,

    /// legacy-xor or scaled
    #[arg(long)]
    coordinate_encoding: Option<CoordinateEncoding>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Print the final report as JSON instead of text
    #[arg(long)]
    json_report: bool,
}

impl Args {
    fn apply(&self, config: &mut HarnessConfig) {
        if let Some(url) = &self.rpc_url {
            config.node.rpc_url = url.clone();
        }
        if let Some(dir) = &self.artifacts_dir {
            config.artifacts.dir = dir.clone();
        }
        if let Some(encoding) = self.coordinate_encoding {
            config.scenario.coordinate_encoding = encoding;
        }
        if self.json_logs {
            config.logging.json = true;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let mut config =
        HarnessConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    args.apply(&mut config);
    config.validate().context("invalid configuration")?;

    init_logging(&config.logging).context("failed to initialize logging")?;

    let report = run_suite(&config)
        .await
        .with_context(|| format!("suite could not start against {}", config.node.rpc_url))?;

    if args.json_report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
