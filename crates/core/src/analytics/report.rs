//! Portfolio report envelope.
//!
//! A report is computed over whichever locations could be fetched. Locations
//! that failed are listed as gaps instead of failing the whole report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

use super::{
    location::{LocationAggregate, LocationSnapshot, aggregate_location},
    period::ReportingPeriod,
    product::{ProductPerformance, low_stock, product_breakdown},
    rollup::{LocationSort, PortfolioTotals, rollup, sort_locations},
};
use crate::types::LocationId;

/// Why a location is missing from a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GapReason {
    /// Every attempt exceeded the per-fetch timeout.
    TimedOut { after_ms: u64 },
    /// The platform returned an error on every attempt.
    FetchFailed { message: String },
}

impl fmt::Display for GapReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimedOut { after_ms } => write!(f, "timed out after {after_ms} ms"),
            Self::FetchFailed { message } => f.write_str(message),
        }
    }
}

/// A location omitted from a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationGap {
    /// Location that could not be fetched.
    pub location_id: LocationId,
    /// Location display name.
    pub location_name: String,
    /// What went wrong.
    pub reason: GapReason,
}

/// Per-location rows, totals and gaps for one reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    /// Window the sales figures cover.
    pub period: ReportingPeriod,
    /// When the report was computed.
    pub generated_at: DateTime<Utc>,
    /// One row per fetched location, in the requested order.
    pub locations: Vec<LocationAggregate>,
    /// Totals over `locations`.
    pub totals: PortfolioTotals,
    /// Locations left out of the report.
    pub gaps: Vec<LocationGap>,
}

impl PortfolioReport {
    /// Aggregate every snapshot, sort the rows and roll them up.
    ///
    /// Orders outside `period` are dropped before aggregation, so snapshots
    /// may carry a wider window than the report.
    #[must_use]
    pub fn build(
        period: ReportingPeriod,
        generated_at: DateTime<Utc>,
        snapshots: Vec<LocationSnapshot>,
        gaps: Vec<LocationGap>,
        sort: LocationSort,
    ) -> Self {
        let mut locations: Vec<LocationAggregate> = snapshots
            .into_iter()
            .map(|mut snapshot| {
                snapshot.orders = period.filter_orders(std::mem::take(&mut snapshot.orders));
                aggregate_location(&snapshot, period.days)
            })
            .collect();
        sort_locations(&mut locations, sort);

        let totals = rollup(&locations);

        Self {
            period,
            generated_at,
            locations,
            totals,
            gaps,
        }
    }

    /// Whether some locations are missing from the totals.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.gaps.is_empty()
    }
}

/// One location's aggregate with its per-product breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationReport {
    /// Window the sales figures cover.
    pub period: ReportingPeriod,
    /// When the report was computed.
    pub generated_at: DateTime<Utc>,
    /// Location totals and KPIs.
    pub location: LocationAggregate,
    /// Every product stocked or sold at the location, best sellers first.
    pub products: Vec<ProductPerformance>,
    /// Products at or below the low-stock threshold, scarcest first.
    pub low_stock: Vec<ProductPerformance>,
}

impl LocationReport {
    /// Aggregate one snapshot and break it down by product.
    ///
    /// Orders outside `period` are dropped first, as in [`PortfolioReport::build`].
    #[must_use]
    pub fn build(
        period: ReportingPeriod,
        generated_at: DateTime<Utc>,
        mut snapshot: LocationSnapshot,
        low_stock_threshold: i64,
    ) -> Self {
        snapshot.orders = period.filter_orders(std::mem::take(&mut snapshot.orders));

        let products = product_breakdown(&snapshot.lines, &snapshot.orders, low_stock_threshold);
        let low_stock = low_stock(&products);

        Self {
            period,
            generated_at,
            location: aggregate_location(&snapshot, period.days),
            products,
            low_stock,
        }
    }
}
