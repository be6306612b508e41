//! Integration tests for Shelfwise.
//!
//! # Running Tests
//!
//! ```bash
//! # Offline tests (no network)
//! cargo test -p shelfwise-integration-tests
//!
//! # Live tests against a running dashboard
//! cargo run -p shelfwise-admin &
//! cargo test -p shelfwise-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `analytics_offline` - Aggregation over the snapshot fixture
//! - `fan_out` - Report service over an in-memory data source
//! - `dashboard_api` - JSON API of a running dashboard (ignored by default)

use chrono::{DateTime, TimeZone, Utc};
use shelfwise_core::analytics::{LocationSnapshot, ReportingPeriod};

/// Snapshot fixture shared by the offline tests.
pub const PORTFOLIO_FIXTURE: &str = include_str!("../fixtures/portfolio.yaml");

/// Base URL of a running dashboard (configurable via environment).
#[must_use]
pub fn dashboard_base_url() -> String {
    std::env::var("DASHBOARD_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// End of the window the fixture was written for.
///
/// # Panics
///
/// Panics if chrono rejects the fixed date.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn fixture_as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap()
}

/// The fixture's 30-day reporting period.
///
/// # Panics
///
/// Panics if the window were rejected as out of range.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn fixture_period() -> ReportingPeriod {
    ReportingPeriod::ending_at(30, fixture_as_of()).unwrap()
}

/// Parse the snapshot fixture.
///
/// # Panics
///
/// Panics if the fixture is not valid YAML.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn fixture_snapshots() -> Vec<LocationSnapshot> {
    serde_yaml::from_str(PORTFOLIO_FIXTURE).unwrap()
}
