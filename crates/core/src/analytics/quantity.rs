//! Named inventory quantities.
//!
//! Shopify reports stock as a list of `{ name, quantity }` pairs per inventory
//! level rather than fixed fields. This module turns that list into lookups.

use serde::{Deserialize, Serialize};

use crate::types::deserialize_quantity;

/// Units that can be sold right now.
pub const AVAILABLE: &str = "available";
/// Units held back (e.g. for draft orders or safety stock).
pub const RESERVED: &str = "reserved";
/// Physical units at the location.
pub const ON_HAND: &str = "on_hand";
/// Units committed to unfulfilled orders.
pub const COMMITTED: &str = "committed";
/// Units on their way to the location.
pub const INCOMING: &str = "incoming";

/// Every quantity name the dashboard asks the platform for.
pub const TRACKED_QUANTITY_NAMES: [&str; 5] = [AVAILABLE, RESERVED, ON_HAND, COMMITTED, INCOMING];

/// One named quantity of an inventory level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityRecord {
    /// Quantity name, e.g. `available`.
    pub name: String,
    /// Quantity value. May be negative upstream (oversold stock). Malformed
    /// values read as zero.
    #[serde(default, deserialize_with = "deserialize_quantity")]
    pub quantity: i64,
}

impl QuantityRecord {
    /// Create a quantity record.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Quantity of the first record named exactly `name`, or `0` when absent.
///
/// Names match case-sensitively. Negative quantities are coerced to `0` so
/// downstream counts stay non-negative.
///
/// ```rust
/// # use shelfwise_core::analytics::quantity::{QuantityRecord, extract};
/// let records = vec![QuantityRecord::new("available", 7)];
/// assert_eq!(extract(&records, "available"), 7);
/// assert_eq!(extract(&records, "reserved"), 0);
/// ```
#[must_use]
pub fn extract(records: &[QuantityRecord], name: &str) -> i64 {
    records
        .iter()
        .find(|record| record.name == name)
        .map_or(0, |record| record.quantity.max(0))
}
