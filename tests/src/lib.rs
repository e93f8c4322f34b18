//! # Supply-Chain Harness Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── fixtures/contracts/   # Truffle-style artifacts for the three contracts
//! └── src/
//!     ├── ledger.rs         # In-memory node executing the contracts
//!     ├── fixtures.rs       # Config and ledger constructors
//!     └── integration/      # End-to-end suite runs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sc-tests
//!
//! # Against a running node on localhost:8545 with compiled artifacts
//! cargo test -p sc-tests -- --ignored
//! ```

pub mod fixtures;
pub mod integration;
pub mod ledger;
