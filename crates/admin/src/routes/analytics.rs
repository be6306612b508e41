//! Analytics route handlers.
//!
//! JSON endpoints over the portfolio reporting service. Query parameters are
//! validated before any Shopify request is made.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use serde::Deserialize;
use shelfwise_core::analytics::{
    Kpis, LocationReport, LocationSort, ParamError, PortfolioReport, ReportingPeriod, compute_kpis,
    period::MAX_PERIOD_DAYS,
};
use shelfwise_core::LocationId;
use tracing::instrument;

use crate::{
    error::AppError,
    services::{build_location_report, build_portfolio_report},
    state::AppState,
};

// =============================================================================
// Query Parameters
// =============================================================================

/// Query parameters for report endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// Date range preset: "7d", "30d" or "90d"
    pub range: Option<String>,
    /// Explicit window in days (1..=365); wins over `range`
    pub days: Option<u32>,
    /// Location sort key (e.g., "sales_value", "sell_through", "name")
    pub sort: Option<String>,
}

impl ReportQuery {
    /// Resolve the reporting period, falling back to `default_days`.
    fn period(&self, default_days: u32) -> Result<ReportingPeriod, ParamError> {
        ReportingPeriod::from_query_or(self.range.as_deref(), self.days, default_days, Utc::now())
    }

    fn sort(&self) -> Result<LocationSort, ParamError> {
        self.sort
            .as_deref()
            .map_or(Ok(LocationSort::default()), str::parse)
    }
}

/// Query parameters for the KPI calculator.
#[derive(Debug, Deserialize)]
pub struct KpiQuery {
    #[serde(default)]
    pub available: i64,
    #[serde(default)]
    pub units_sold: i64,
    /// Defaults to `available` when omitted.
    pub on_hand: Option<i64>,
    pub days: Option<u32>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Portfolio report: every location, totals and gaps.
#[instrument(skip(state))]
pub async fn portfolio(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<PortfolioReport>, AppError> {
    let period = query.period(state.config().report.period_days)?;
    let sort = query.sort()?;

    let report = build_portfolio_report(state.shopify(), period, sort, state.fan_out()).await?;

    tracing::info!(
        locations = report.locations.len(),
        gaps = report.gaps.len(),
        "Built portfolio report"
    );
    Ok(Json(report))
}

/// Single-location report with per-product breakdown and low-stock list.
#[instrument(skip(state))]
pub async fn location(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<LocationReport>, AppError> {
    let period = query.period(state.config().report.period_days)?;
    let location_id = LocationId::parse_input(&id);

    let report = build_location_report(
        state.shopify(),
        &location_id,
        period,
        state.config().report.low_stock_threshold,
        state.fan_out(),
    )
    .await?;

    Ok(Json(report))
}

/// KPI calculator over caller-supplied counts. Makes no Shopify request.
#[instrument(skip(state))]
pub async fn kpis(
    State(state): State<AppState>,
    Query(query): Query<KpiQuery>,
) -> Result<Json<Kpis>, AppError> {
    let days = query.days.unwrap_or(state.config().report.period_days);
    if !(1..=MAX_PERIOD_DAYS).contains(&days) {
        return Err(ParamError::DaysOutOfRange(days).into());
    }

    Ok(Json(compute_kpis(
        query.available,
        query.units_sold,
        query.on_hand.unwrap_or(query.available),
        days,
    )))
}
