//! # Shared Types Crate
//!
//! Ethereum primitives used by every harness crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Address`, `Hash` and `U256` come from
//!   `primitive-types` and are re-exported here so all crates agree on them.
//! - **JSON-RPC conventions**: byte strings and quantities serialize as
//!   `0x`-prefixed hex, matching what Ethereum nodes accept and emit.

pub mod entities;
pub mod errors;
pub mod hashing;

pub use entities::*;
pub use errors::*;
pub use hashing::keccak256;
