//! Shelfwise dashboard library.
//!
//! Serves multi-location inventory and sales analytics as JSON, computed
//! from the Shopify Admin API. The binary in `main.rs` wires this library
//! to a listener; the CLI reuses the same client and services.
//!
//! # Security
//!
//! This crate holds a Shopify Admin API token. Issue it to a custom app with
//! read-only scopes and keep the listener on a private interface.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod shopify;
pub mod state;
