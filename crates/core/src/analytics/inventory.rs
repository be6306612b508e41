//! Inventory aggregation across (location, variant) snapshots.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::quantity::{self, QuantityRecord};
use crate::types::{LocationId, ProductId, VariantId, deserialize_amount};

/// Inventory snapshot of one variant at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLine {
    /// Location holding the stock.
    pub location_id: LocationId,
    /// Product the variant belongs to.
    pub product_id: ProductId,
    /// Variant being stocked.
    pub variant_id: VariantId,
    /// Product title, for display only.
    #[serde(default)]
    pub product_title: Option<String>,
    /// Selling price of one unit. Malformed values read as zero.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub unit_price: Decimal,
    /// Named quantities (`available`, `reserved`, `on_hand`, ...).
    #[serde(default)]
    pub quantities: Vec<QuantityRecord>,
}

impl InventoryLine {
    /// Units available for sale on this line.
    #[must_use]
    pub fn available(&self) -> i64 {
        quantity::extract(&self.quantities, quantity::AVAILABLE)
    }

    /// Units reserved on this line.
    #[must_use]
    pub fn reserved(&self) -> i64 {
        quantity::extract(&self.quantities, quantity::RESERVED)
    }

    /// Units physically on hand on this line.
    #[must_use]
    pub fn on_hand(&self) -> i64 {
        quantity::extract(&self.quantities, quantity::ON_HAND)
    }

    /// Value of the available units at this line's own price.
    ///
    /// A product too large for `Decimal` reads as zero, like any other
    /// unusable price.
    #[must_use]
    pub fn available_value(&self) -> Decimal {
        Decimal::from(self.available())
            .checked_mul(self.unit_price)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Totals over a set of inventory lines.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InventorySummary {
    /// Sum of available units.
    pub available: i64,
    /// Sum of reserved units.
    pub reserved: i64,
    /// Sum of on-hand units.
    pub on_hand: i64,
    /// Sum of `available × unit_price` per line. Not rounded.
    pub inventory_value: Decimal,
    /// Number of distinct products across the lines.
    pub unique_product_count: usize,
}

/// Aggregate inventory lines into unit totals, stock value and product count.
///
/// Value is accumulated per line (each line's available units times that
/// line's price), never from an average price. Sums saturate instead of
/// overflowing. An empty slice yields all zeros.
#[must_use]
pub fn aggregate_inventory(lines: &[InventoryLine]) -> InventorySummary {
    let mut summary = InventorySummary::default();
    let mut products: HashSet<&ProductId> = HashSet::new();

    for line in lines {
        summary.available = summary.available.saturating_add(line.available());
        summary.reserved = summary.reserved.saturating_add(line.reserved());
        summary.on_hand = summary.on_hand.saturating_add(line.on_hand());
        summary.inventory_value = summary.inventory_value.saturating_add(line.available_value());
        products.insert(&line.product_id);
    }

    summary.unique_product_count = products.len();
    summary
}
