//! Report service over an in-memory data source.
//!
//! Exercises the public `LocationDataSource` seam the way a second backend
//! would plug in, without touching Shopify.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::HashSet;
use std::time::Duration;

use shelfwise_admin::services::{
    FanOutOptions, LocationDataSource, PortfolioError, build_location_report,
    build_portfolio_report,
};
use shelfwise_admin::shopify::{AdminShopifyError, Location};
use shelfwise_core::LocationId;
use shelfwise_core::analytics::{
    GapReason, LocationSnapshot, LocationSort, ReportingPeriod,
};
use shelfwise_integration_tests::{fixture_as_of, fixture_snapshots};

/// Serves the fixture; locations named in `broken` always fail.
struct FixtureSource {
    snapshots: Vec<LocationSnapshot>,
    broken: HashSet<String>,
}

impl FixtureSource {
    fn new(broken: &[&str]) -> Self {
        Self {
            snapshots: fixture_snapshots(),
            broken: broken.iter().map(ToString::to_string).collect(),
        }
    }
}

impl LocationDataSource for FixtureSource {
    async fn locations(&self) -> Result<Vec<Location>, AdminShopifyError> {
        Ok(self
            .snapshots
            .iter()
            .map(|snapshot| Location {
                id: snapshot.location_id.clone(),
                name: snapshot.location_name.clone(),
                is_active: true,
                fulfills_online_orders: true,
            })
            .collect())
    }

    async fn snapshot(
        &self,
        location: &Location,
        _period: &ReportingPeriod,
    ) -> Result<LocationSnapshot, AdminShopifyError> {
        if self.broken.contains(&location.name) {
            return Err(AdminShopifyError::Unauthorized("revoked".to_string()));
        }
        self.snapshots
            .iter()
            .find(|snapshot| snapshot.location_id == location.id)
            .cloned()
            .ok_or_else(|| AdminShopifyError::NotFound(location.id.to_string()))
    }
}

fn options() -> FanOutOptions {
    FanOutOptions {
        max_concurrent_fetches: 2,
        fetch_timeout: Duration::from_secs(1),
        fetch_retries: 1,
        retry_backoff: Duration::from_millis(5),
    }
}

fn period() -> ReportingPeriod {
    ReportingPeriod::ending_at(30, fixture_as_of()).unwrap()
}

#[tokio::test]
async fn test_full_portfolio_from_custom_source() {
    let source = FixtureSource::new(&[]);
    let report = build_portfolio_report(&source, period(), LocationSort::Name, &options())
        .await
        .unwrap();

    assert!(!report.is_partial());
    assert_eq!(report.totals.location_count, 3);
    assert_eq!(report.totals.total_units_sold, 53);
    assert_eq!(report.locations[0].location_name, "Airport");
}

#[tokio::test]
async fn test_failing_location_becomes_gap() {
    let source = FixtureSource::new(&["Downtown"]);
    let report = build_portfolio_report(&source, period(), LocationSort::default(), &options())
        .await
        .unwrap();

    assert!(report.is_partial());
    assert_eq!(report.totals.location_count, 2);
    assert_eq!(report.totals.total_units_sold, 50);
    assert_eq!(report.gaps.len(), 1);
    assert_eq!(report.gaps[0].location_name, "Downtown");
    assert!(matches!(
        &report.gaps[0].reason,
        GapReason::FetchFailed { message } if message.contains("revoked")
    ));
}

#[tokio::test]
async fn test_location_report_for_numeric_id() {
    let source = FixtureSource::new(&[]);
    let report = build_location_report(
        &source,
        &LocationId::parse_input("1"),
        period(),
        10,
        &options(),
    )
    .await
    .unwrap();

    assert_eq!(report.location.location_name, "Downtown");
    assert_eq!(report.products.len(), 1);
    assert_eq!(report.products[0].units_sold, 3);
}

#[tokio::test]
async fn test_unknown_location_is_not_found() {
    let source = FixtureSource::new(&[]);
    let err = build_location_report(
        &source,
        &LocationId::parse_input("404"),
        period(),
        10,
        &options(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PortfolioError::LocationNotFound(_)));
}
