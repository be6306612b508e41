//! Shelfwise Core - Shared types and analytics library.
//!
//! This crate provides the types and computations used across all Shelfwise
//! components:
//! - `admin` - Analytics JSON API backed by the Shopify Admin API
//! - `cli` - Command-line reports (live or from snapshot files)
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no clocks except where a caller passes a timestamp in. Every
//! aggregation is a stateless transformation of already-deserialized records,
//! so it can be used anywhere and tested without a network.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for Shopify IDs and decimal prices
//! - [`analytics`] - Inventory/sales aggregation, KPI derivation and rollups

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod types;

pub use types::*;
