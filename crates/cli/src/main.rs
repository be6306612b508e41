//! Shelfwise CLI - inventory and sales reports from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Portfolio report for the last 30 days, straight from Shopify
//! shelfwise report portfolio
//!
//! # Last 7 days, busiest locations by sell-through, as JSON
//! shelfwise report portfolio --range 7d --sort sell_through --json
//!
//! # One location with its product breakdown
//! shelfwise report location 123456789
//!
//! # Aggregate a saved snapshot file without touching the API
//! shelfwise report offline --input snapshots.yaml --as-of 2026-10-01T00:00:00Z
//! ```
//!
//! # Commands
//!
//! - `report portfolio` - Live report across every active location
//! - `report location` - Live report for one location
//! - `report offline` - Report over a JSON or YAML snapshot file

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

mod commands;

use commands::report::{self, OutputFormat, PeriodArgs};

#[derive(Parser)]
#[command(name = "shelfwise")]
#[command(author, version, about = "Shelfwise inventory and sales reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build inventory and sales reports
    Report {
        #[command(subcommand)]
        target: ReportTarget,
    },
}

#[derive(Subcommand)]
enum ReportTarget {
    /// Report across every active location
    Portfolio {
        #[command(flatten)]
        period: PeriodFlags,

        /// Row order (`sales_value`, `inventory_value`, `sell_through`, `turnover`, `name`)
        #[arg(short, long, default_value = "sales_value")]
        sort: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Report one location with its product breakdown
    Location {
        /// Location ID, numeric or `gid://shopify/Location/...`
        id: String,

        #[command(flatten)]
        period: PeriodFlags,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Report over a saved snapshot file (JSON or YAML)
    Offline {
        /// Snapshot file: a list of location snapshots, or `{ locations: [...] }`
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        period: PeriodFlags,

        /// End of the reporting window (RFC 3339); defaults to now
        #[arg(long)]
        as_of: Option<DateTime<Utc>>,

        /// Row order (`sales_value`, `inventory_value`, `sell_through`, `turnover`, `name`)
        #[arg(short, long, default_value = "sales_value")]
        sort: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct PeriodFlags {
    /// Window length in days (1-365); overrides `--range`
    #[arg(short, long)]
    days: Option<u32>,

    /// Window preset (`7d`, `30d`, `90d`)
    #[arg(short, long)]
    range: Option<String>,
}

impl From<PeriodFlags> for PeriodArgs {
    fn from(flags: PeriodFlags) -> Self {
        Self {
            days: flags.days,
            range: flags.range,
        }
    }
}

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main]
async fn main() {
    // Logs go to stderr so JSON output on stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        log_failure(e.as_ref());
        std::process::exit(1);
    }
}

fn log_failure(error: &dyn std::error::Error) {
    tracing::error!("Command failed: {error}");
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Report { target } => match target {
            ReportTarget::Portfolio { period, sort, json } => {
                report::portfolio(period.into(), &sort, OutputFormat::from_flag(json)).await?;
            }
            ReportTarget::Location { id, period, json } => {
                report::location(&id, period.into(), OutputFormat::from_flag(json)).await?;
            }
            ReportTarget::Offline {
                input,
                period,
                as_of,
                sort,
                json,
            } => {
                report::offline(
                    &input,
                    period.into(),
                    as_of,
                    &sort,
                    OutputFormat::from_flag(json),
                )?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn with_default_filter(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_env_filter(tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER))
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, f);
        captured.text()
    }

    #[test]
    fn test_default_filter_shows_command_failure() {
        let error = io::Error::new(io::ErrorKind::NotFound, "No such file or directory");
        let output = with_default_filter(|| log_failure(&error));

        assert!(output.contains("ERROR"), "{output}");
        assert!(output.contains("Command failed: No such file or directory"), "{output}");
    }

    #[test]
    fn test_default_filter_hides_progress_logs() {
        let output = with_default_filter(|| tracing::info!("Loaded snapshots"));
        assert!(output.is_empty(), "{output}");
    }

    #[test]
    fn test_parses_offline_command() {
        let cli = Cli::try_parse_from([
            "shelfwise",
            "report",
            "offline",
            "--input",
            "snapshots.yaml",
            "--range",
            "7d",
            "--as-of",
            "2026-10-01T00:00:00Z",
        ])
        .unwrap();

        let Commands::Report {
            target: ReportTarget::Offline { input, period, as_of, sort, json },
        } = cli.command
        else {
            panic!("expected offline report");
        };
        assert_eq!(input, PathBuf::from("snapshots.yaml"));
        assert_eq!(period.range.as_deref(), Some("7d"));
        assert_eq!(period.days, None);
        assert!(as_of.is_some());
        assert_eq!(sort, "sales_value");
        assert!(!json);
    }
}
