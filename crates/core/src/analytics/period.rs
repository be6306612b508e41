//! Reporting periods.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::sales::Order;

/// Default reporting window in days.
pub const DEFAULT_PERIOD_DAYS: u32 = 30;

/// Longest accepted reporting window in days.
pub const MAX_PERIOD_DAYS: u32 = 365;

/// Errors parsing report parameters from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// Unknown range preset.
    #[error("Unknown range '{0}' (expected 7d, 30d or 90d)")]
    InvalidRange(String),

    /// Day count outside `1..=365`.
    #[error("Period must be between 1 and {MAX_PERIOD_DAYS} days (got {0})")]
    DaysOutOfRange(u32),

    /// Unknown location sort key.
    #[error("Unknown sort '{0}'")]
    InvalidSort(String),
}

/// A window of `days` days ending at `ends_at`.
///
/// Orders are counted when `starts_at <= created_at <= ends_at`, and stock
/// coverage is computed against `days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    /// Length of the window in days.
    pub days: u32,
    /// Inclusive start of the window.
    pub starts_at: DateTime<Utc>,
    /// Inclusive end of the window.
    pub ends_at: DateTime<Utc>,
}

impl ReportingPeriod {
    /// A window of `days` days ending at `ends_at`.
    ///
    /// # Errors
    ///
    /// Returns `ParamError::DaysOutOfRange` unless `1 <= days <= 365`.
    pub fn ending_at(days: u32, ends_at: DateTime<Utc>) -> Result<Self, ParamError> {
        if !(1..=MAX_PERIOD_DAYS).contains(&days) {
            return Err(ParamError::DaysOutOfRange(days));
        }

        Ok(Self {
            days,
            starts_at: ends_at - Duration::days(i64::from(days)),
            ends_at,
        })
    }

    /// Build a period from query parameters.
    ///
    /// An explicit `days` wins over a `range` preset (`7d`, `30d`, `90d`).
    /// With neither, the default 30-day window is used.
    ///
    /// # Errors
    ///
    /// Returns `ParamError` for unknown presets or out-of-range day counts.
    pub fn from_query(
        range: Option<&str>,
        days: Option<u32>,
        ends_at: DateTime<Utc>,
    ) -> Result<Self, ParamError> {
        Self::from_query_or(range, days, DEFAULT_PERIOD_DAYS, ends_at)
    }

    /// Like [`from_query`](Self::from_query), with a configured default.
    ///
    /// A blank `range` counts as absent, so `?range=` falls back to
    /// `default_days` too.
    ///
    /// # Errors
    ///
    /// Returns `ParamError` for unknown presets or out-of-range day counts.
    pub fn from_query_or(
        range: Option<&str>,
        days: Option<u32>,
        default_days: u32,
        ends_at: DateTime<Utc>,
    ) -> Result<Self, ParamError> {
        let days = match (days, range.map(str::trim)) {
            (Some(days), _) => days,
            (None, None | Some("")) => default_days,
            (None, Some(preset)) => parse_preset(preset)?,
        };
        Self::ending_at(days, ends_at)
    }

    /// Whether `timestamp` falls inside the window.
    #[must_use]
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.starts_at <= timestamp && timestamp <= self.ends_at
    }

    /// Keep only orders placed inside the window.
    #[must_use]
    pub fn filter_orders(&self, orders: Vec<Order>) -> Vec<Order> {
        orders
            .into_iter()
            .filter(|order| self.contains(order.created_at))
            .collect()
    }
}

fn parse_preset(preset: &str) -> Result<u32, ParamError> {
    match preset {
        "7d" => Ok(7),
        "30d" => Ok(DEFAULT_PERIOD_DAYS),
        "90d" => Ok(90),
        other => Err(ParamError::InvalidRange(other.to_string())),
    }
}
