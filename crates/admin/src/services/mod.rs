//! Business logic services for the dashboard.
//!
//! # Services
//!
//! - `portfolio` - Bounded fan-out over locations and report assembly

pub mod portfolio;

pub use portfolio::{
    FanOutOptions, LocationDataSource, PortfolioError, build_location_report,
    build_portfolio_report, fetch_snapshots,
};
