//! Core types for Shelfwise.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;

pub use id::*;
pub use price::{deserialize_amount, deserialize_quantity, parse_amount};
