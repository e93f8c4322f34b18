//! # Live Node
//!
//! The suite against a real development node. Requires a node on
//! `SC_RPC_URL` (default `http://localhost:8545`) with unlocked accounts and
//! compiled artifacts in `SC_ARTIFACTS_DIR` (default `build/contracts`).

#[cfg(test)]
mod tests {
    use sc_04_integration_runner::{run_suite, HarnessConfig};

    #[tokio::test]
    #[ignore = "requires a running node and compiled contracts"]
    async fn test_product_suite_on_live_node() {
        let config = HarnessConfig::load(None).unwrap();
        config.validate().unwrap();
        let report = run_suite(&config).await.unwrap();
        assert!(report.is_success(), "{}", report);
    }
}
