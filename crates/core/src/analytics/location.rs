//! Per-location composition of inventory, sales and KPIs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    inventory::{InventoryLine, aggregate_inventory},
    kpi::compute_kpis,
    sales::{Order, aggregate_sales},
};
use crate::types::LocationId;

/// Already-fetched input for one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSnapshot {
    /// Location ID.
    pub location_id: LocationId,
    /// Location display name.
    #[serde(default)]
    pub location_name: String,
    /// Inventory lines stocked at the location.
    #[serde(default)]
    pub lines: Vec<InventoryLine>,
    /// Orders attributed to the location within the reporting period.
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// Inventory, sales and KPIs for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationAggregate {
    /// Location ID.
    pub location_id: LocationId,
    /// Location display name.
    pub location_name: String,
    /// Available units across every line.
    pub available: i64,
    /// Reserved units across every line.
    pub reserved: i64,
    /// On-hand units across every line.
    pub on_hand: i64,
    /// Value of the available units.
    pub inventory_value: Decimal,
    /// Distinct products stocked.
    pub unique_product_count: usize,
    /// Units sold in the period.
    pub units_sold: i64,
    /// Sum of order totals in the period.
    pub sales_value: Decimal,
    /// Orders in the period.
    pub order_count: usize,
    /// Average order total, or zero without orders.
    pub avg_order_value: Decimal,
    /// Units sold per available unit.
    pub turnover_rate: f64,
    /// Days of stock left at the period's sales velocity (999 without sales).
    pub stock_coverage_days: i64,
    /// Share of sold plus on-hand units that sold, in percent.
    pub sell_through_percent: f64,
}

/// Aggregate one location's snapshot over a period of `period_days`.
#[must_use]
pub fn aggregate_location(snapshot: &LocationSnapshot, period_days: u32) -> LocationAggregate {
    let inventory = aggregate_inventory(&snapshot.lines);
    let sales = aggregate_sales(&snapshot.orders);
    let kpis = compute_kpis(
        inventory.available,
        sales.units_sold,
        inventory.on_hand,
        period_days,
    );

    LocationAggregate {
        location_id: snapshot.location_id.clone(),
        location_name: snapshot.location_name.clone(),
        available: inventory.available,
        reserved: inventory.reserved,
        on_hand: inventory.on_hand,
        inventory_value: inventory.inventory_value,
        unique_product_count: inventory.unique_product_count,
        units_sold: sales.units_sold,
        sales_value: sales.sales_value,
        order_count: sales.order_count,
        avg_order_value: sales.avg_order_value,
        turnover_rate: kpis.turnover_rate,
        stock_coverage_days: kpis.stock_coverage_days,
        sell_through_percent: kpis.sell_through_percent,
    }
}
