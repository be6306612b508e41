//! Domain types for Shopify Admin API.
//!
//! These types provide a clean, ergonomic API separate from the raw
//! GraphQL response shapes in `admin::queries`. Inventory lines and orders
//! are converted straight into `shelfwise_core` records.

pub mod common;
pub mod inventory;
pub mod order;

pub use common::*;
pub use inventory::*;
pub use order::*;
