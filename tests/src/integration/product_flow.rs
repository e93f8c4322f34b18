//! # Product Flow
//!
//! The full suite against the in-memory ledger, followed by direct
//! inspection of ledger state to confirm what the harness actually submitted.

#[cfg(test)]
mod tests {
    use shared_types::{Address, U256};

    use sc_02_contract_abi::decode_text;
    use sc_04_integration_runner::scenario::now_millis;
    use sc_04_integration_runner::{run_suite_with, CoordinateEncoding, PhaseStatus};

    use crate::fixtures::{harness_config, ledger};
    use crate::ledger::CREATION_DESCRIPTION;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn sender() -> Address {
        Address::repeat_byte(0xa1)
    }

    // =============================================================================
    // SUITE OUTCOME
    // =============================================================================

    #[tokio::test]
    async fn test_full_suite_passes() {
        let node = ledger();
        let report = run_suite_with(node, &harness_config()).await.unwrap();

        assert!(report.is_success(), "{}", report);
        let names: Vec<&str> = report.phases.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Deploy Database Contract",
                "Deploy ProductFactory Contract",
                "Add Handler to Database",
                "Create a product successfully",
                "Create an other product successfully",
            ]
        );
        assert!(report.phases.iter().all(|p| p.status == PhaseStatus::Passed));

        let summary = report.summary();
        assert_eq!(summary.checks_failed, 0);
        // 1 + 1 + 2 + 4 + (4 + 2 re-checks of the first product)
        assert_eq!(summary.checks_passed, 14);
    }

    #[tokio::test]
    async fn test_second_phase_rechecks_first_product() {
        let report = run_suite_with(ledger(), &harness_config()).await.unwrap();
        let second = report.phase("Create an other product successfully").unwrap();

        assert!(second
            .checks
            .iter()
            .any(|c| c.name == "Test Product 1: product name should be retrievable" && c.is_passed()));
    }

    // =============================================================================
    // LEDGER STATE
    // =============================================================================

    #[tokio::test]
    async fn test_handler_and_products_recorded() {
        let node = ledger();
        let report = run_suite_with(node.clone(), &harness_config()).await.unwrap();
        assert!(report.is_success());

        // first contract created by the ledger is the database
        let database = Address::from_low_u64_be(0xc0_0001);
        assert_eq!(
            node.handler(database, sender()),
            Some((
                "Demo Handler".to_string(),
                "This is an unreal Handler for demo purposes".to_string()
            ))
        );

        let items = node.items(database);
        assert_eq!(items.len(), 2);

        let first = node.product(items[0]).unwrap();
        assert_eq!(first.id, U256::from(1));
        assert_eq!(first.price, U256::from(1));
        assert_eq!(first.database, database);
        assert_eq!(decode_text(&first.name), "Test Product 1");
        assert_eq!(decode_text(&first.additional_information), "Additional Information");
        assert_eq!(decode_text(&first.actions[0].description), CREATION_DESCRIPTION);
        assert_eq!(first.actions[0].handler, sender());

        let second = node.product(items[1]).unwrap();
        assert_eq!(second.id, U256::from(2));
        assert_eq!(second.price, U256::from(2));
        assert_eq!(decode_text(&second.name), "Test Product 2");
    }

    #[tokio::test]
    async fn test_transactions_use_sender_and_gas() {
        let node = ledger();
        run_suite_with(node.clone(), &harness_config()).await.unwrap();

        let txs = node.transactions();
        assert_eq!(txs.len(), 5);
        assert!(txs[0].is_deployment());
        assert!(txs[1].is_deployment());
        for tx in &txs {
            assert_eq!(tx.from, sender());
            assert_eq!(tx.gas, Some(U256::from(4_700_000)));
        }
    }

    #[tokio::test]
    async fn test_configured_sender_index() {
        let node = ledger();
        let mut config = harness_config();
        config.transactions.sender_index = 1;

        let report = run_suite_with(node.clone(), &config).await.unwrap();
        assert!(report.is_success(), "{}", report);

        let second_account = Address::repeat_byte(0xa2);
        assert!(node.transactions().iter().all(|tx| tx.from == second_account));
        assert!(node
            .handler(Address::from_low_u64_be(0xc0_0001), second_account)
            .is_some());
    }

    // =============================================================================
    // SUBMITTED VALUES
    // =============================================================================

    #[tokio::test]
    async fn test_legacy_coordinates_submitted() {
        let node = ledger();
        run_suite_with(node.clone(), &harness_config()).await.unwrap();

        let items = node.items(Address::from_low_u64_be(0xc0_0001));
        let action = &node.product(items[0]).unwrap().actions[0];
        assert_eq!(action.lon, U256::from(389));
        // -741 in two's complement
        assert_eq!(action.lat, !U256::from(740));
    }

    #[tokio::test]
    async fn test_scaled_coordinates_submitted() {
        let node = ledger();
        let mut config = harness_config();
        config.scenario.coordinate_encoding = CoordinateEncoding::Scaled;

        let report = run_suite_with(node.clone(), &config).await.unwrap();
        assert!(report.is_success());

        let items = node.items(Address::from_low_u64_be(0xc0_0001));
        let action = &node.product(items[1]).unwrap().actions[0];
        assert_eq!(action.lon, U256::from(399_525_830_000u64));
        assert_eq!(action.lat, !U256::from(751_652_219_999u64));
    }

    #[tokio::test]
    async fn test_timestamps_are_current_millis() {
        let node = ledger();
        let before = now_millis();
        run_suite_with(node.clone(), &harness_config()).await.unwrap();
        let after = now_millis();

        for item in node.items(Address::from_low_u64_be(0xc0_0001)) {
            let ts = node.product(item).unwrap().actions[0].timestamp.low_u64();
            assert!(ts >= before && ts <= after, "{} not in [{}, {}]", ts, before, after);
        }
    }
}
