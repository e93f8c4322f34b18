//! # SC-03 Contracts - Typed Proxies
//!
//! Thin, typed access to the three contracts under test. Every proxy is a
//! [`ContractHandle`] (address + interface + node) with named methods on top.
//!
//! | Proxy | Writes | Reads |
//! |-------|--------|-------|
//! | [`Database`] | `addHandler` | `addressToHandler`, `items` |
//! | [`ProductFactory`] | `createProduct` | - |
//! | [`Product`] | - | `name`, `DATABASE_CONTRACT`, `actions` |
//!
//! Writes return a [`PendingTransaction`]; nothing is considered done until
//! [`PendingTransaction::confirm`] has observed a successful receipt.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod database;
pub mod deployer;
pub mod errors;
pub mod handle;
pub mod product;
pub mod product_factory;

pub use database::{Database, HandlerRecord};
pub use deployer::{Deployer, Deployment};
pub use errors::ContractError;
pub use handle::{ContractHandle, PendingTransaction, TxOptions};
pub use product::{ActionRecord, Product};
pub use product_factory::{NewProduct, ProductFactory};

/// Gas budget used for every transaction unless configured otherwise.
pub const DEFAULT_GAS: u64 = 4_700_000;
