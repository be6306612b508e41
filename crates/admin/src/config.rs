//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPIFY_STORE` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_ADMIN_ACCESS_TOKEN` - Admin API access token of a custom app (read-only scopes)
//!
//! ## Optional
//! - `DASHBOARD_HOST` - Bind address (default: 127.0.0.1)
//! - `DASHBOARD_PORT` - Listen port (default: 3001)
//! - `SHOPIFY_API_VERSION` - API version (default: 2026-01)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 1.0)
//!
//! ## Optional (reporting)
//! - `REPORT_PERIOD_DAYS` - Default reporting window in days (default: 30, 1..=365)
//! - `REPORT_MAX_CONCURRENT_FETCHES` - Locations fetched in parallel (default: 4)
//! - `REPORT_FETCH_TIMEOUT_SECS` - Per-location fetch timeout (default: 15)
//! - `REPORT_FETCH_RETRIES` - Retries after a failed or timed-out fetch (default: 1)
//! - `REPORT_PAGE_SIZE` - GraphQL page size (default: 100, max 250)
//! - `REPORT_LOW_STOCK_THRESHOLD` - Available units at or below which a product is low stock (default: 10)

use std::collections::HashMap;
use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use shelfwise_core::analytics::{DEFAULT_LOW_STOCK_THRESHOLD, period};
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_API_VERSION: &str = "2026-01";
/// Largest `first:` argument the Admin API accepts on a connection.
const MAX_PAGE_SIZE: u32 = 250;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Dashboard application configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Shopify Admin API configuration
    pub shopify: ShopifyAdminConfig,
    /// Reporting window and fan-out settings
    pub report: ReportConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Shopify Admin API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyAdminConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store: String,
    /// Shopify API version (e.g., 2026-01)
    pub api_version: String,
    /// Custom app access token, sent as `X-Shopify-Access-Token`
    pub access_token: SecretString,
}

impl std::fmt::Debug for ShopifyAdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyAdminConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Reporting defaults and limits for the location fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Window used when a request names neither a range nor a day count.
    pub period_days: u32,
    /// Upper bound on locations fetched at the same time.
    pub max_concurrent_fetches: usize,
    /// Deadline for one location fetch attempt.
    pub fetch_timeout: Duration,
    /// Extra attempts after a failed or timed-out fetch.
    pub fetch_retries: u32,
    /// Page size for paginated Admin API connections.
    pub page_size: u32,
    /// Products with this many available units or fewer are flagged.
    pub low_stock_threshold: i64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            period_days: period::DEFAULT_PERIOD_DAYS,
            max_concurrent_fetches: 4,
            fetch_timeout: Duration::from_secs(15),
            fetch_retries: 1,
            page_size: 100,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the access token fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_parsed_or_default("DASHBOARD_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = get_parsed_or_default("DASHBOARD_PORT", 3001_u16)?;

        let shopify = ShopifyAdminConfig::from_env()?;
        let report = ReportConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            shopify,
            report,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ShopifyAdminConfig {
    /// Load only the Shopify settings (used by the CLI, which has no server).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the store or token is missing, or the token
    /// looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            store: get_required_env("SHOPIFY_STORE")?,
            api_version: get_env_or_default("SHOPIFY_API_VERSION", DEFAULT_API_VERSION),
            access_token: get_validated_secret("SHOPIFY_ADMIN_ACCESS_TOKEN")?,
        })
    }
}

impl ReportConfig {
    /// Load reporting settings, falling back to defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for unparseable or out-of-range values.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let period_days = get_parsed_or_default("REPORT_PERIOD_DAYS", defaults.period_days)?;
        if !(1..=period::MAX_PERIOD_DAYS).contains(&period_days) {
            return Err(ConfigError::InvalidEnvVar(
                "REPORT_PERIOD_DAYS".to_string(),
                format!("must be between 1 and {}", period::MAX_PERIOD_DAYS),
            ));
        }

        let max_concurrent_fetches =
            get_parsed_or_default("REPORT_MAX_CONCURRENT_FETCHES", defaults.max_concurrent_fetches)?;
        if max_concurrent_fetches == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "REPORT_MAX_CONCURRENT_FETCHES".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let timeout_secs = get_parsed_or_default(
            "REPORT_FETCH_TIMEOUT_SECS",
            defaults.fetch_timeout.as_secs(),
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "REPORT_FETCH_TIMEOUT_SECS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let page_size = get_parsed_or_default("REPORT_PAGE_SIZE", defaults.page_size)?;
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(ConfigError::InvalidEnvVar(
                "REPORT_PAGE_SIZE".to_string(),
                format!("must be between 1 and {MAX_PAGE_SIZE}"),
            ));
        }

        Ok(Self {
            period_days,
            max_concurrent_fetches,
            fetch_timeout: Duration::from_secs(timeout_secs),
            fetch_retries: get_parsed_or_default("REPORT_FETCH_RETRIES", defaults.fetch_retries)?,
            page_size,
            low_stock_threshold: get_parsed_or_default(
                "REPORT_LOW_STOCK_THRESHOLD",
                defaults.low_stock_threshold,
            )?
            .max(0),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an optional environment variable, using `default` when it is unset.
fn get_parsed_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the token issued by Shopify."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
