//! The product suite: deploy, register a handler, create two products.

use async_trait::async_trait;
use sc_02_contract_abi::ContractArtifact;
use sc_03_contracts::{Database, NewProduct, Product, ProductFactory};
use tracing::info;

use crate::context::SuiteContext;
use crate::errors::PhaseError;
use crate::runner::{Checks, Phase, SequentialRunner};
use crate::scenario::{now_millis, Coordinates, ProductSpec, Scenario, COMPLETION_NOTE, CREATION_ACTION};

/// Which deployable artifact a [`DeployContract`] phase uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployTarget {
    Database,
    ProductFactory,
}

/// Deploy a contract and keep its handle for later phases.
#[derive(Debug, Clone)]
pub struct DeployContract {
    name: String,
    target: DeployTarget,
}

impl DeployContract {
    pub fn database() -> Self {
        Self {
            name: "Deploy Database Contract".to_string(),
            target: DeployTarget::Database,
        }
    }

    pub fn product_factory() -> Self {
        Self {
            name: "Deploy ProductFactory Contract".to_string(),
            target: DeployTarget::ProductFactory,
        }
    }

    fn artifact<'a>(&self, ctx: &'a SuiteContext) -> &'a ContractArtifact {
        match self.target {
            DeployTarget::Database => &ctx.contracts.database,
            DeployTarget::ProductFactory => &ctx.contracts.product_factory,
        }
    }
}

#[async_trait]
impl Phase for DeployContract {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: &mut SuiteContext, checks: &mut Checks) -> Result<(), PhaseError> {
        let (handle, deployment) = ctx
            .deployer()
            .deploy_handle(self.artifact(ctx), vec![], &ctx.tx)
            .await?;

        checks.expect_defined(
            "contract address should not be undefined",
            !deployment.address.is_zero(),
        );

        match self.target {
            DeployTarget::Database => ctx.database = Some(Database::from(handle)),
            DeployTarget::ProductFactory => ctx.factory = Some(ProductFactory::from(handle)),
        }
        Ok(())
    }
}

/// Register the sender as a handler and read it back.
#[derive(Debug, Clone)]
pub struct AddHandler {
    handler_name: String,
    handler_info: String,
}

impl AddHandler {
    pub fn new(handler_name: impl Into<String>, handler_info: impl Into<String>) -> Self {
        Self {
            handler_name: handler_name.into(),
            handler_info: handler_info.into(),
        }
    }
}

#[async_trait]
impl Phase for AddHandler {
    fn name(&self) -> &str {
        "Add Handler to Database"
    }

    async fn run(&self, ctx: &mut SuiteContext, checks: &mut Checks) -> Result<(), PhaseError> {
        let database = ctx.database()?;
        let sender = ctx.sender();

        let pending = database
            .add_handler(sender, &self.handler_name, &self.handler_info, &ctx.tx)
            .await?;
        let tx_hash = pending.hash();
        pending.confirm(ctx.policy).await?;

        checks.expect_defined("transaction hash should not be undefined", !tx_hash.is_zero());

        let record = database.address_to_handler(sender).await;
        checks.expect_read(
            "handler must appear in the database",
            self.handler_name.clone(),
            record.map(|r| r.name),
        );
        Ok(())
    }
}

/// Create a product through the factory and verify it, plus every product
/// created before it.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    name: String,
    product: ProductSpec,
    additional_information: String,
    coordinates: Coordinates,
    /// Position in `Database.items`
    index: u64,
    /// Earlier products re-read after this one is created
    earlier: Vec<(u64, ProductSpec)>,
}

impl CreateProduct {
    pub fn new(
        name: impl Into<String>,
        product: ProductSpec,
        additional_information: impl Into<String>,
        coordinates: Coordinates,
        index: u64,
    ) -> Self {
        Self {
            name: name.into(),
            product,
            additional_information: additional_information.into(),
            coordinates,
            index,
            earlier: Vec::new(),
        }
    }

    pub fn with_earlier(mut self, earlier: Vec<(u64, ProductSpec)>) -> Self {
        self.earlier = earlier;
        self
    }

    fn new_product(&self) -> NewProduct {
        NewProduct {
            id: self.product.id,
            name: self.product.name.clone(),
            additional_information: self.additional_information.clone(),
            timestamp: now_millis(),
            price: self.product.price,
            lon: self.coordinates.lon,
            lat: self.coordinates.lat,
        }
    }
}

#[async_trait]
impl Phase for CreateProduct {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: &mut SuiteContext, checks: &mut Checks) -> Result<(), PhaseError> {
        let database = ctx.database()?.clone();
        let factory = ctx.factory()?;

        let pending = factory
            .create_product(&self.new_product(), database.address(), &ctx.tx)
            .await?;
        let tx_hash = pending.hash();
        pending.confirm(ctx.policy).await?;

        checks.expect_defined("transaction hash should not be undefined", !tx_hash.is_zero());

        let address = match database.items(self.index).await {
            Ok(address) => address,
            Err(e) => {
                // nothing further can be read without the product address
                checks.fail(
                    "contract must appear in the database",
                    format!("items({}) to be readable", self.index),
                    format!("error: {}", e),
                );
                return Ok(());
            }
        };
        info!(product = %self.product.name, address = ?address, "product created");
        ctx.products.insert(self.index, address);

        let product = ctx.product_at(address);
        checks.expect_read(
            "contract must appear in the database",
            database.address(),
            product.database_contract().await,
        );
        verify_product(&product, checks, "", &self.product).await;

        for (index, earlier) in &self.earlier {
            let prefix = format!("{}: ", earlier.name);
            let address = match ctx.products.get(index) {
                Some(address) => *address,
                // the earlier phase could not read its address; try once more
                None => match database.items(*index).await {
                    Ok(address) => address,
                    Err(e) => {
                        fail_unreadable(checks, &prefix, earlier, &e.to_string());
                        continue;
                    }
                },
            };
            verify_product(&ctx.product_at(address), checks, &prefix, earlier).await;
        }
        Ok(())
    }
}

fn first_action_check(prefix: &str) -> String {
    format!("{}first action should be \"{}\"", prefix, CREATION_ACTION)
}

fn stored_name_check(prefix: &str) -> String {
    format!("{}product name should be retrievable", prefix)
}

fn fail_unreadable(checks: &mut Checks, prefix: &str, expected: &ProductSpec, error: &str) {
    let actual = format!("error: {}", error);
    checks.fail(
        &first_action_check(prefix),
        format!("{:?}", CREATION_ACTION),
        actual.clone(),
    );
    checks.fail(&stored_name_check(prefix), format!("{:?}", expected.name), actual);
}

/// First action and stored name of `product`.
async fn verify_product(product: &Product, checks: &mut Checks, prefix: &str, expected: &ProductSpec) {
    let first_action = first_action_check(prefix);
    let stored_name = stored_name_check(prefix);

    checks.expect_read(
        &first_action,
        CREATION_ACTION.to_string(),
        product.actions(0).await.map(|a| a.description_text()),
    );
    checks.expect_read(&stored_name, expected.name.clone(), product.name_text().await);
}

/// The five phases in order, closing with the completion note.
pub fn product_suite(scenario: &Scenario) -> SequentialRunner {
    let mut runner = SequentialRunner::new()
        .with_phase(DeployContract::database())
        .with_phase(DeployContract::product_factory())
        .with_phase(AddHandler::new(&scenario.handler_name, &scenario.handler_info));

    let mut created = Vec::new();
    for (index, product) in scenario.products.iter().enumerate() {
        let index = index as u64;
        let name = if index == 0 {
            "Create a product successfully".to_string()
        } else {
            "Create an other product successfully".to_string()
        };
        runner = runner.with_phase(
            CreateProduct::new(
                name,
                product.clone(),
                &scenario.additional_information,
                scenario.coordinates,
                index,
            )
            .with_earlier(created.clone()),
        );
        created.push((index, product.clone()));
    }

    runner.with_closing_note(COMPLETION_NOTE)
}
