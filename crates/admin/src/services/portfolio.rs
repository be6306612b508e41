//! Portfolio reporting service.
//!
//! Fetches every location's inventory and orders with bounded concurrency,
//! then hands the snapshots to the pure aggregation in `shelfwise_core`.
//!
//! Each location fetch gets its own timeout and retry budget. A location
//! that still fails is reported as a gap; the rest of the report is built
//! from the locations that succeeded.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use shelfwise_core::LocationId;
use shelfwise_core::analytics::{
    GapReason, LocationGap, LocationReport, LocationSnapshot, LocationSort, PortfolioReport,
    ReportingPeriod,
};
use thiserror::Error;
use tracing::instrument;

use crate::config::ReportConfig;
use crate::shopify::{AdminClient, AdminShopifyError, Location};

/// Errors building a report.
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// The location list itself could not be fetched.
    #[error("Aggregation input unavailable: {0}")]
    InputUnavailable(GapReason),

    /// A single requested location could not be fetched.
    #[error("Aggregation input unavailable for location {location_id}: {reason}")]
    LocationUnavailable {
        location_id: LocationId,
        reason: GapReason,
    },

    /// No active location has the requested ID.
    #[error("Location not found: {0}")]
    LocationNotFound(LocationId),
}

/// Source of per-location input data.
///
/// Implemented by [`AdminClient`]; tests substitute in-memory sources.
pub trait LocationDataSource: Sync {
    /// Every location to report on.
    fn locations(&self) -> impl Future<Output = Result<Vec<Location>, AdminShopifyError>> + Send;

    /// Inventory lines and orders for one location since `period.starts_at`.
    fn snapshot(
        &self,
        location: &Location,
        period: &ReportingPeriod,
    ) -> impl Future<Output = Result<LocationSnapshot, AdminShopifyError>> + Send;
}

impl LocationDataSource for AdminClient {
    async fn locations(&self) -> Result<Vec<Location>, AdminShopifyError> {
        self.get_all_locations().await
    }

    async fn snapshot(
        &self,
        location: &Location,
        period: &ReportingPeriod,
    ) -> Result<LocationSnapshot, AdminShopifyError> {
        let (lines, orders) = tokio::try_join!(
            self.get_location_inventory(&location.id),
            self.get_location_orders(&location.id, period.starts_at),
        )?;

        Ok(LocationSnapshot {
            location_id: location.id.clone(),
            location_name: location.name.clone(),
            lines,
            orders,
        })
    }
}

/// Concurrency, timeout and retry settings for location fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanOutOptions {
    /// Locations fetched at the same time.
    pub max_concurrent_fetches: usize,
    /// Deadline for a single attempt.
    pub fetch_timeout: Duration,
    /// Attempts after the first.
    pub fetch_retries: u32,
    /// Wait before retry `n` is `n × retry_backoff`.
    pub retry_backoff: Duration,
}

impl Default for FanOutOptions {
    fn default() -> Self {
        Self::from(&ReportConfig::default())
    }
}

impl From<&ReportConfig> for FanOutOptions {
    fn from(config: &ReportConfig) -> Self {
        Self {
            max_concurrent_fetches: config.max_concurrent_fetches.max(1),
            fetch_timeout: config.fetch_timeout,
            fetch_retries: config.fetch_retries,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

/// Build the portfolio report for `period`.
///
/// # Errors
///
/// Returns `PortfolioError::InputUnavailable` if the location list cannot be
/// fetched. Failures of individual locations become gaps instead.
#[instrument(skip(source, options), fields(days = period.days))]
pub async fn build_portfolio_report<S: LocationDataSource>(
    source: &S,
    period: ReportingPeriod,
    sort: LocationSort,
    options: &FanOutOptions,
) -> Result<PortfolioReport, PortfolioError> {
    let locations = with_retries(options, "locations", || source.locations())
        .await
        .map_err(PortfolioError::InputUnavailable)?;

    let (snapshots, gaps) = fetch_snapshots(source, locations, &period, options).await;
    if !gaps.is_empty() {
        tracing::warn!(
            missing = gaps.len(),
            fetched = snapshots.len(),
            "Portfolio report is partial"
        );
    }

    Ok(PortfolioReport::build(period, Utc::now(), snapshots, gaps, sort))
}

/// Build the report for a single location.
///
/// # Errors
///
/// Returns `PortfolioError::LocationNotFound` for an unknown ID, and
/// `PortfolioError::InputUnavailable`/`LocationUnavailable` when fetching fails.
#[instrument(skip(source, options), fields(location_id = %location_id, days = period.days))]
pub async fn build_location_report<S: LocationDataSource>(
    source: &S,
    location_id: &LocationId,
    period: ReportingPeriod,
    low_stock_threshold: i64,
    options: &FanOutOptions,
) -> Result<LocationReport, PortfolioError> {
    let locations = with_retries(options, "locations", || source.locations())
        .await
        .map_err(PortfolioError::InputUnavailable)?;

    let location = locations
        .into_iter()
        .find(|location| &location.id == location_id)
        .ok_or_else(|| PortfolioError::LocationNotFound(location_id.clone()))?;

    let snapshot = with_retries(options, location.name.as_str(), || {
        source.snapshot(&location, &period)
    })
    .await
    .map_err(|reason| PortfolioError::LocationUnavailable {
        location_id: location.id.clone(),
        reason,
    })?;

    Ok(LocationReport::build(
        period,
        Utc::now(),
        snapshot,
        low_stock_threshold,
    ))
}

/// Fetch snapshots for `locations`, at most `max_concurrent_fetches` at a time.
///
/// Returns the successful snapshots and one gap per failed location. Gaps
/// are sorted by location name.
pub async fn fetch_snapshots<S: LocationDataSource>(
    source: &S,
    locations: Vec<Location>,
    period: &ReportingPeriod,
    options: &FanOutOptions,
) -> (Vec<LocationSnapshot>, Vec<LocationGap>) {
    let results: Vec<(Location, Result<LocationSnapshot, GapReason>)> = stream::iter(locations)
        .map(|location| async move {
            let result = with_retries(options, location.name.as_str(), || {
                source.snapshot(&location, period)
            })
            .await;
            (location, result)
        })
        .buffer_unordered(options.max_concurrent_fetches.max(1))
        .collect()
        .await;

    let mut snapshots = Vec::with_capacity(results.len());
    let mut gaps = Vec::new();
    for (location, result) in results {
        match result {
            Ok(snapshot) => snapshots.push(snapshot),
            Err(reason) => gaps.push(LocationGap {
                location_id: location.id,
                location_name: location.name,
                reason,
            }),
        }
    }

    gaps.sort_by(|a, b| {
        a.location_name
            .cmp(&b.location_name)
            .then_with(|| a.location_id.cmp(&b.location_id))
    });
    (snapshots, gaps)
}

/// Run `attempt` under the per-fetch timeout, retrying with linear backoff.
///
/// Returns the reason of the last failed attempt once the budget is spent.
async fn with_retries<T, F, Fut>(
    options: &FanOutOptions,
    label: &str,
    mut attempt: F,
) -> Result<T, GapReason>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AdminShopifyError>>,
{
    let attempts = options.fetch_retries.saturating_add(1);

    for n in 1..=attempts {
        let reason = match tokio::time::timeout(options.fetch_timeout, attempt()).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(e)) => {
                tracing::warn!(target_name = label, attempt = n, error = %e, "Fetch failed");
                GapReason::FetchFailed {
                    message: e.to_string(),
                }
            }
            Err(_) => {
                tracing::warn!(target_name = label, attempt = n, "Fetch timed out");
                GapReason::TimedOut {
                    after_ms: u64::try_from(options.fetch_timeout.as_millis()).unwrap_or(u64::MAX),
                }
            }
        };

        if n == attempts {
            return Err(reason);
        }
        tokio::time::sleep(options.retry_backoff.saturating_mul(n)).await;
    }

    // `attempts` is at least 1, so the loop always returns.
    Err(GapReason::FetchFailed {
        message: "no fetch attempted".to_string(),
    })
}
