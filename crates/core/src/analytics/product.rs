//! Per-product breakdown and low-stock detection.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{inventory::InventoryLine, kpi::sell_through_percent, sales::Order};
use crate::types::ProductId;

/// Products at or below this many available units are flagged low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// Stock and sales of one product, summed over all its variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPerformance {
    /// Product ID.
    pub product_id: ProductId,
    /// First title seen on an inventory line for the product.
    pub product_title: Option<String>,
    /// Available units across the product's variants.
    pub available: i64,
    /// On-hand units across the product's variants.
    pub on_hand: i64,
    /// Units sold in the period.
    pub units_sold: i64,
    /// Value of the available units.
    pub inventory_value: Decimal,
    /// Share of sold plus on-hand units that sold, in percent.
    pub sell_through_percent: f64,
    /// Whether available units are at or below the low-stock threshold.
    pub is_low_stock: bool,
}

impl ProductPerformance {
    fn empty(product_id: ProductId) -> Self {
        Self {
            product_id,
            product_title: None,
            available: 0,
            on_hand: 0,
            units_sold: 0,
            inventory_value: Decimal::ZERO,
            sell_through_percent: 0.0,
            is_low_stock: false,
        }
    }
}

/// Group inventory lines and order line items by product.
///
/// Products that only appear in orders (sold out and no longer stocked)
/// are included with zero stock. Rows are sorted by units sold, highest
/// first, then by product ID.
#[must_use]
pub fn product_breakdown(
    lines: &[InventoryLine],
    orders: &[Order],
    low_stock_threshold: i64,
) -> Vec<ProductPerformance> {
    let mut products: BTreeMap<&ProductId, ProductPerformance> = BTreeMap::new();

    for line in lines {
        let row = products
            .entry(&line.product_id)
            .or_insert_with(|| ProductPerformance::empty(line.product_id.clone()));
        row.available = row.available.saturating_add(line.available());
        row.on_hand = row.on_hand.saturating_add(line.on_hand());
        row.inventory_value = row.inventory_value.saturating_add(line.available_value());
        if row.product_title.is_none() {
            row.product_title.clone_from(&line.product_title);
        }
    }

    for item in orders.iter().flat_map(|order| &order.line_items) {
        let row = products
            .entry(&item.product_id)
            .or_insert_with(|| ProductPerformance::empty(item.product_id.clone()));
        row.units_sold = row.units_sold.saturating_add(item.quantity.max(0));
    }

    let mut rows: Vec<ProductPerformance> = products
        .into_values()
        .map(|mut row| {
            row.sell_through_percent = sell_through_percent(row.units_sold, row.on_hand);
            row.is_low_stock = row.available <= low_stock_threshold;
            row
        })
        .collect();

    rows.sort_by(|a, b| {
        b.units_sold
            .cmp(&a.units_sold)
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    rows
}

/// Flagged low-stock products, fewest available units first.
#[must_use]
pub fn low_stock(products: &[ProductPerformance]) -> Vec<ProductPerformance> {
    let mut flagged: Vec<ProductPerformance> = products
        .iter()
        .filter(|product| product.is_low_stock)
        .cloned()
        .collect();
    flagged.sort_by(|a, b| {
        a.available
            .cmp(&b.available)
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    flagged
}
