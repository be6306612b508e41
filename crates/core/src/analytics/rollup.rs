//! Cross-location totals and location ordering.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{kpi::sell_through_percent, location::LocationAggregate, period::ParamError};

/// Totals across every location that produced a row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Number of location rows summed.
    pub location_count: usize,
    /// Sum of available units.
    pub total_available: i64,
    /// Sum of units sold.
    pub total_units_sold: i64,
    /// Sum of inventory value.
    pub total_inventory_value: Decimal,
    /// Sum of sales value.
    pub total_sales_value: Decimal,
    /// `units_sold / (units_sold + available) × 100`, or zero.
    pub overall_efficiency_percent: f64,
}

/// Sum location rows into portfolio totals.
///
/// The result does not depend on row order: integer and decimal sums are
/// exact (saturating at the type bounds), and efficiency is derived from the
/// sums.
#[must_use]
pub fn rollup(per_location: &[LocationAggregate]) -> PortfolioTotals {
    let mut totals = per_location
        .iter()
        .fold(PortfolioTotals::default(), |mut acc, row| {
            acc.location_count += 1;
            acc.total_available = acc.total_available.saturating_add(row.available);
            acc.total_units_sold = acc.total_units_sold.saturating_add(row.units_sold);
            acc.total_inventory_value = acc.total_inventory_value.saturating_add(row.inventory_value);
            acc.total_sales_value = acc.total_sales_value.saturating_add(row.sales_value);
            acc
        });

    totals.overall_efficiency_percent =
        sell_through_percent(totals.total_units_sold, totals.total_available);
    totals
}

/// Sort key for location rows. Numeric keys sort descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSort {
    #[default]
    SalesValue,
    InventoryValue,
    SellThrough,
    Turnover,
    Name,
}

impl FromStr for LocationSort {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "sales_value" | "sales" => Ok(Self::SalesValue),
            "inventory_value" | "inventory" => Ok(Self::InventoryValue),
            "sell_through" => Ok(Self::SellThrough),
            "turnover" => Ok(Self::Turnover),
            "name" => Ok(Self::Name),
            other => Err(ParamError::InvalidSort(other.to_string())),
        }
    }
}

/// Order location rows by `key`, breaking ties by location ID.
pub fn sort_locations(rows: &mut [LocationAggregate], key: LocationSort) {
    rows.sort_by(|a, b| {
        let primary = match key {
            LocationSort::SalesValue => b.sales_value.cmp(&a.sales_value),
            LocationSort::InventoryValue => b.inventory_value.cmp(&a.inventory_value),
            LocationSort::SellThrough => b.sell_through_percent.total_cmp(&a.sell_through_percent),
            LocationSort::Turnover => b.turnover_rate.total_cmp(&a.turnover_rate),
            LocationSort::Name => a.location_name.cmp(&b.location_name),
        };
        match primary {
            Ordering::Equal => a.location_id.cmp(&b.location_id),
            other => other,
        }
    });
}
