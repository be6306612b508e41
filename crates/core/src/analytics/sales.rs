//! Sales aggregation over orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{OrderId, ProductId, VariantId, deserialize_amount, deserialize_quantity};

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    /// Variant sold. May be a placeholder when the variant was deleted.
    pub variant_id: VariantId,
    /// Product sold.
    pub product_id: ProductId,
    /// Units sold on this line. Malformed values read as zero.
    #[serde(default, deserialize_with = "deserialize_quantity")]
    pub quantity: i64,
}

/// An order placed in the reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order ID.
    pub id: OrderId,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// Order total as charged, including shipping and tax.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub total_value: Decimal,
    /// Line items.
    #[serde(default)]
    pub line_items: Vec<OrderLineItem>,
}

impl Order {
    /// Units across all line items; negative quantities count as zero.
    #[must_use]
    pub fn units(&self) -> i64 {
        self.line_items
            .iter()
            .fold(0, |units: i64, item| units.saturating_add(item.quantity.max(0)))
    }
}

/// Totals over a set of orders.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SalesSummary {
    /// Units sold across every line item.
    pub units_sold: i64,
    /// Sum of order totals.
    pub sales_value: Decimal,
    /// Number of orders.
    pub order_count: usize,
    /// `sales_value / order_count`, or zero without orders.
    pub avg_order_value: Decimal,
}

/// Aggregate orders into units sold, sales value and average order value.
///
/// Sales value sums order-level totals. It is not re-derived from line items
/// because an order total also carries shipping and tax. Sums saturate
/// instead of overflowing.
#[must_use]
pub fn aggregate_sales(orders: &[Order]) -> SalesSummary {
    let units_sold = orders
        .iter()
        .fold(0, |units: i64, order| units.saturating_add(order.units()));
    let sales_value = orders
        .iter()
        .fold(Decimal::ZERO, |value, order| value.saturating_add(order.total_value));
    let order_count = orders.len();

    let avg_order_value = if order_count > 0 {
        sales_value / Decimal::from(order_count)
    } else {
        Decimal::ZERO
    };

    SalesSummary {
        units_sold,
        sales_value,
        order_count,
        avg_order_value,
    }
}
