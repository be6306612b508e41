//! Report commands.
//!
//! # Usage
//!
//! ```bash
//! shelfwise report portfolio --days 14 --sort turnover
//! shelfwise report location 123456789 --json
//! shelfwise report offline --input snapshots.json --range 7d
//! ```
//!
//! # Environment Variables
//!
//! Live reports need `SHOPIFY_STORE` and `SHOPIFY_ADMIN_ACCESS_TOKEN`, and
//! honor the `REPORT_*` settings of the dashboard. Offline reports read
//! only the snapshot file.

use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use shelfwise_admin::config::{ConfigError, ReportConfig, ShopifyAdminConfig};
use shelfwise_admin::services::{
    FanOutOptions, PortfolioError, build_location_report, build_portfolio_report,
};
use shelfwise_admin::shopify::AdminClient;
use shelfwise_core::LocationId;
use shelfwise_core::analytics::{
    LocationAggregate, LocationReport, LocationSnapshot, LocationSort, ParamError,
    PortfolioReport, ReportingPeriod,
};
use thiserror::Error;

/// Errors that can occur while producing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid period or sort argument.
    #[error(transparent)]
    Param(#[from] ParamError),

    /// Fetching from Shopify failed.
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    /// Reading the snapshot file or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Snapshot file is not valid JSON, or JSON output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot file is not valid YAML.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Snapshot file extension is neither JSON nor YAML.
    #[error("Unsupported snapshot file '{0}' (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
}

/// How a report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    /// `--json` selects JSON; the default is a table.
    #[must_use]
    pub const fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Table }
    }
}

/// Period arguments shared by every report command.
#[derive(Debug, Clone, Default)]
pub struct PeriodArgs {
    pub days: Option<u32>,
    pub range: Option<String>,
}

impl PeriodArgs {
    /// Resolve the window ending at `ends_at`, falling back to `default_days`.
    fn resolve(&self, default_days: u32, ends_at: DateTime<Utc>) -> Result<ReportingPeriod, ParamError> {
        ReportingPeriod::from_query_or(self.range.as_deref(), self.days, default_days, ends_at)
    }
}

/// Live portfolio report across every active location.
///
/// # Errors
///
/// Returns an error if configuration is missing, arguments are invalid, the
/// location list cannot be fetched, or output cannot be written.
pub async fn portfolio(period: PeriodArgs, sort: &str, format: OutputFormat) -> Result<(), ReportError> {
    let sort: LocationSort = sort.parse()?;
    let (client, report_config) = live_client()?;
    let period = period.resolve(report_config.period_days, Utc::now())?;

    tracing::info!(store = client.store(), days = period.days, "Building portfolio report");
    let report = build_portfolio_report(
        &client,
        period,
        sort,
        &FanOutOptions::from(&report_config),
    )
    .await?;

    print_portfolio(&mut io::stdout().lock(), &report, format)
}

/// Live report for one location.
///
/// # Errors
///
/// Returns an error if configuration is missing, the location is unknown or
/// unavailable, or output cannot be written.
pub async fn location(id: &str, period: PeriodArgs, format: OutputFormat) -> Result<(), ReportError> {
    let (client, report_config) = live_client()?;
    let period = period.resolve(report_config.period_days, Utc::now())?;
    let location_id = LocationId::parse_input(id);

    tracing::info!(store = client.store(), location_id = %location_id, "Building location report");
    let report = build_location_report(
        &client,
        &location_id,
        period,
        report_config.low_stock_threshold,
        &FanOutOptions::from(&report_config),
    )
    .await?;

    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Json => write_json(&mut out, &report),
        OutputFormat::Table => write_location_table(&mut out, &report),
    }
}

/// Report over a snapshot file, without network access.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, arguments are
/// invalid, or output cannot be written.
pub fn offline(
    input: &Path,
    period: PeriodArgs,
    as_of: Option<DateTime<Utc>>,
    sort: &str,
    format: OutputFormat,
) -> Result<(), ReportError> {
    let sort: LocationSort = sort.parse()?;
    let period = period.resolve(
        shelfwise_core::analytics::period::DEFAULT_PERIOD_DAYS,
        as_of.unwrap_or_else(Utc::now),
    )?;

    let snapshots = read_snapshots(input)?;
    tracing::info!(path = %input.display(), locations = snapshots.len(), "Loaded snapshots");

    let report = PortfolioReport::build(period, Utc::now(), snapshots, vec![], sort);
    print_portfolio(&mut io::stdout().lock(), &report, format)
}

fn live_client() -> Result<(AdminClient, ReportConfig), ReportError> {
    let _ = dotenvy::dotenv();

    let shopify = ShopifyAdminConfig::from_env()?;
    let report = ReportConfig::from_env()?;
    let client = AdminClient::new(&shopify).with_page_size(report.page_size);
    Ok((client, report))
}

// =============================================================================
// Snapshot files
// =============================================================================

/// Accepted snapshot file layouts.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    List(Vec<LocationSnapshot>),
    Wrapped { locations: Vec<LocationSnapshot> },
}

impl SnapshotFile {
    fn into_snapshots(self) -> Vec<LocationSnapshot> {
        match self {
            Self::List(locations) | Self::Wrapped { locations } => locations,
        }
    }
}

/// Read snapshots from `path`, choosing the parser by file extension.
fn read_snapshots(path: &Path) -> Result<Vec<LocationSnapshot>, ReportError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let content = std::fs::read_to_string(path)?;

    let file: SnapshotFile = match extension.as_deref() {
        Some("json") => serde_json::from_str(&content)?,
        Some("yaml" | "yml") => serde_yaml::from_str(&content)?,
        _ => return Err(ReportError::UnsupportedFormat(path.display().to_string())),
    };
    Ok(file.into_snapshots())
}

// =============================================================================
// Output
// =============================================================================

fn print_portfolio<W: Write>(out: &mut W, report: &PortfolioReport, format: OutputFormat) -> Result<(), ReportError> {
    match format {
        OutputFormat::Json => write_json(out, report),
        OutputFormat::Table => write_portfolio_table(out, report),
    }
}

fn write_json<W: Write, T: serde::Serialize>(out: &mut W, value: &T) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

const LOCATION_HEADER: &str = "LOCATION                  AVAILABLE   ON HAND   SOLD     SALES VALUE   STOCK VALUE  SELL-THRU  TURNOVER  COVER(D)";

fn write_location_row<W: Write>(out: &mut W, row: &LocationAggregate) -> io::Result<()> {
    writeln!(
        out,
        "{:<24}  {:>9}  {:>8}  {:>5}  {:>14.2}  {:>12.2}  {:>8.1}%  {:>8.2}  {:>8}",
        truncate(&row.location_name, 24),
        row.available,
        row.on_hand,
        row.units_sold,
        row.sales_value,
        row.inventory_value,
        row.sell_through_percent,
        row.turnover_rate,
        row.stock_coverage_days,
    )
}

fn write_portfolio_table<W: Write>(out: &mut W, report: &PortfolioReport) -> Result<(), ReportError> {
    writeln!(
        out,
        "Portfolio report: {} days ({} to {})",
        report.period.days,
        report.period.starts_at.format("%Y-%m-%d"),
        report.period.ends_at.format("%Y-%m-%d"),
    )?;
    writeln!(out)?;
    writeln!(out, "{LOCATION_HEADER}")?;
    for row in &report.locations {
        write_location_row(out, row)?;
    }

    let totals = &report.totals;
    writeln!(out)?;
    writeln!(out, "Locations:        {}", totals.location_count)?;
    writeln!(out, "Available units:  {}", totals.total_available)?;
    writeln!(out, "Units sold:       {}", totals.total_units_sold)?;
    writeln!(out, "Inventory value:  {:.2}", totals.total_inventory_value)?;
    writeln!(out, "Sales value:      {:.2}", totals.total_sales_value)?;
    writeln!(out, "Sell-through:     {:.1}%", totals.overall_efficiency_percent)?;

    if report.is_partial() {
        writeln!(out)?;
        writeln!(out, "Missing locations ({}):", report.gaps.len())?;
        for gap in &report.gaps {
            writeln!(out, "  {} ({}): {}", gap.location_name, gap.location_id, gap.reason)?;
        }
    }
    Ok(())
}

fn write_location_table<W: Write>(out: &mut W, report: &LocationReport) -> Result<(), ReportError> {
    writeln!(
        out,
        "Location report: {} ({} days)",
        report.location.location_name, report.period.days
    )?;
    writeln!(out)?;
    writeln!(out, "{LOCATION_HEADER}")?;
    write_location_row(out, &report.location)?;

    writeln!(out)?;
    writeln!(out, "PRODUCT                               AVAILABLE   ON HAND   SOLD   STOCK VALUE  SELL-THRU  LOW")?;
    for product in &report.products {
        let title = product
            .product_title
            .as_deref()
            .unwrap_or_else(|| product.product_id.as_str());
        writeln!(
            out,
            "{:<36}  {:>9}  {:>8}  {:>5}  {:>12.2}  {:>8.1}%  {}",
            truncate(title, 36),
            product.available,
            product.on_hand,
            product.units_sold,
            product.inventory_value,
            product.sell_through_percent,
            if product.is_low_stock { "yes" } else { "" },
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Low stock: {} product(s)", report.low_stock.len())?;
    Ok(())
}

/// Shorten `s` to at most `max` characters.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut short: String = s.chars().take(max.saturating_sub(1)).collect();
        short.push('~');
        short
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use shelfwise_core::analytics::{GapReason, LocationGap};
    use std::path::PathBuf;

    const SNAPSHOTS_YAML: &str = r#"
- location_id: "gid://shopify/Location/1"
  location_name: Downtown
  lines:
    - location_id: "gid://shopify/Location/1"
      product_id: "gid://shopify/Product/10"
      variant_id: "gid://shopify/ProductVariant/100"
      product_title: Canvas Tote
      unit_price: "25.00"
      quantities:
        - { name: available, quantity: 100 }
        - { name: on_hand, quantity: 100 }
  orders:
    - id: "gid://shopify/Order/1"
      created_at: "2026-10-10T12:00:00Z"
      total_value: "625.00"
      line_items:
        - variant_id: "gid://shopify/ProductVariant/100"
          product_id: "gid://shopify/Product/10"
          quantity: 25
"#;

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap()
    }

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("shelfwise-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn report() -> PortfolioReport {
        let snapshots: Vec<LocationSnapshot> = serde_yaml::from_str(SNAPSHOTS_YAML).unwrap();
        let period = ReportingPeriod::ending_at(30, as_of()).unwrap();
        PortfolioReport::build(period, as_of(), snapshots, vec![], LocationSort::default())
    }

    #[test]
    fn test_output_format_from_flag() {
        assert_eq!(OutputFormat::from_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flag(false), OutputFormat::Table);
    }

    #[test]
    fn test_period_args_resolution() {
        let args = PeriodArgs::default();
        assert_eq!(args.resolve(14, as_of()).unwrap().days, 14);

        let args = PeriodArgs {
            days: None,
            range: Some("7d".to_string()),
        };
        assert_eq!(args.resolve(14, as_of()).unwrap().days, 7);

        let args = PeriodArgs {
            days: None,
            range: Some(" ".to_string()),
        };
        assert_eq!(args.resolve(14, as_of()).unwrap().days, 14);

        let args = PeriodArgs {
            days: Some(0),
            range: None,
        };
        assert!(matches!(
            args.resolve(14, as_of()),
            Err(ParamError::DaysOutOfRange(0))
        ));
    }

    #[test]
    fn test_read_yaml_snapshots() {
        let path = write_temp("list.yaml", SNAPSHOTS_YAML);
        let snapshots = read_snapshots(&path).unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].location_name, "Downtown");
        assert_eq!(snapshots[0].lines[0].unit_price, Decimal::new(2500, 2));
    }

    #[test]
    fn test_read_wrapped_json_snapshots() {
        let json = r#"{"locations": [{"location_id": "A", "location_name": "Annex"}]}"#;
        let path = write_temp("wrapped.json", json);
        let snapshots = read_snapshots(&path).unwrap();
        assert_eq!(snapshots.len(), 1);
        assert!(snapshots[0].lines.is_empty());
        assert!(snapshots[0].orders.is_empty());
    }

    #[test]
    fn test_read_snapshots_rejects_unknown_extension() {
        let path = write_temp("snapshots.csv", "[]");
        assert!(matches!(
            read_snapshots(&path),
            Err(ReportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_portfolio_table_shows_kpis() {
        let mut out = Vec::new();
        print_portfolio(&mut out, &report(), OutputFormat::Table).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Portfolio report: 30 days"));
        assert!(text.contains("Downtown"));
        assert!(text.contains("Sales value:      625.00"));
        assert!(text.contains("Inventory value:  2500.00"));
        assert!(!text.contains("Missing locations"));
    }

    #[test]
    fn test_portfolio_table_lists_gaps() {
        let mut report = report();
        report.gaps.push(LocationGap {
            location_id: LocationId::new("gid://shopify/Location/2"),
            location_name: "Airport".to_string(),
            reason: GapReason::TimedOut { after_ms: 15_000 },
        });

        let mut out = Vec::new();
        print_portfolio(&mut out, &report, OutputFormat::Table).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Missing locations (1):"));
        assert!(text.contains("Airport (gid://shopify/Location/2): timed out after 15000 ms"));
    }

    #[test]
    fn test_portfolio_json_output() {
        let mut out = Vec::new();
        print_portfolio(&mut out, &report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["totals"]["location_count"], 1);
        assert_eq!(value["locations"][0]["units_sold"], 25);
        assert_eq!(value["locations"][0]["stock_coverage_days"], 120);
    }

    #[test]
    fn test_location_table_lists_products() {
        let snapshots: Vec<LocationSnapshot> = serde_yaml::from_str(SNAPSHOTS_YAML).unwrap();
        let period = ReportingPeriod::ending_at(30, as_of()).unwrap();
        let report = LocationReport::build(period, as_of(), snapshots.into_iter().next().unwrap(), 10);

        let mut out = Vec::new();
        write_location_table(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Location report: Downtown (30 days)"));
        assert!(text.contains("Canvas Tote"));
        assert!(text.contains("Low stock: 0 product(s)"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long location name", 8), "a very ~");
    }
}
