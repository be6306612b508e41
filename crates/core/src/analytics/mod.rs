//! Inventory and sales aggregation pipeline.
//!
//! Every reporting call site (the JSON API, the CLI, tests) goes through this
//! module so a metric has exactly one definition. All functions are pure:
//! they take already-deserialized records and return new values, with no
//! shared state between calls.
//!
//! # Pipeline
//!
//! ```text
//! QuantityRecord ──► quantity::extract
//!                         │
//! InventoryLine ─────► inventory::aggregate_inventory ─┐
//! Order ─────────────► sales::aggregate_sales ─────────┼─► location::aggregate_location
//!                          kpi::compute_kpis ──────────┘            │
//!                                                                  ▼
//!                                                   rollup::rollup ─► PortfolioTotals
//! ```
//!
//! # Zero denominators
//!
//! No function here returns an error, NaN or infinity. Every ratio whose
//! denominator is zero resolves to a documented value (usually `0`, and
//! [`kpi::STOCK_COVERAGE_SENTINEL_DAYS`] for stock coverage with no sales).

pub mod inventory;
pub mod kpi;
pub mod location;
pub mod period;
pub mod product;
pub mod quantity;
pub mod report;
pub mod rollup;
pub mod sales;

pub use inventory::{InventoryLine, InventorySummary, aggregate_inventory};
pub use kpi::{Kpis, STOCK_COVERAGE_SENTINEL_DAYS, compute_kpis, sell_through_percent};
pub use location::{LocationAggregate, LocationSnapshot, aggregate_location};
pub use period::{ParamError, ReportingPeriod};
pub use product::{DEFAULT_LOW_STOCK_THRESHOLD, ProductPerformance, low_stock, product_breakdown};
pub use quantity::{QuantityRecord, extract};
pub use report::{GapReason, LocationGap, LocationReport, PortfolioReport};
pub use rollup::{LocationSort, PortfolioTotals, rollup, sort_locations};
pub use sales::{Order, OrderLineItem, SalesSummary, aggregate_sales};
