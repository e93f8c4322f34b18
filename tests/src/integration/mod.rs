//! End-to-end runs of the product suite.

pub mod live_node;
pub mod product_flow;
