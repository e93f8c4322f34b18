//! Request/response types and errors for node access.

pub mod error;
pub mod types;
