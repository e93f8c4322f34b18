//! # SC-01 RPC Client - Node Access for the Harness
//!
//! Everything the harness knows about the blockchain node goes through the
//! [`NodeApi`] port. [`RpcClient`] is the production adapter speaking JSON-RPC
//! 2.0 over HTTP; tests substitute an in-memory ledger.
//!
//! ## Methods Consumed
//!
//! | Method | Purpose |
//! |--------|---------|
//! | `eth_accounts` | Sender identities (unlocked test accounts) |
//! | `eth_sendTransaction` | Contract deployment and state-changing calls |
//! | `eth_getTransactionReceipt` | Confirmation of a submitted transaction |
//! | `eth_call` | Read-only queries against deployed contracts |
//! | `eth_blockNumber` / `net_version` | Connectivity probe |
//!
//! ## Confirmation
//!
//! [`wait_for_receipt`] polls for a receipt until one appears or the
//! [`ConfirmationPolicy`] timeout elapses.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod client;
pub mod confirm;
pub mod domain;
pub mod ports;

pub use client::RpcClient;
pub use confirm::{wait_for_receipt, ConfirmationPolicy};
pub use domain::error::{RpcError, RpcResult};
pub use domain::types::{BlockTag, CallRequest, TransactionReceipt, TransactionRequest};
pub use ports::NodeApi;

/// Default local test-node endpoint.
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";
