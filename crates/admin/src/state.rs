//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::services::FanOutOptions;
use crate::shopify::AdminClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the Shopify client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DashboardConfig,
    shopify: AdminClient,
    fan_out: FanOutOptions,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Builds the Shopify client from `config`; no request is made until a
    /// report is requested.
    #[must_use]
    pub fn new(config: DashboardConfig) -> Self {
        let shopify = AdminClient::new(&config.shopify).with_page_size(config.report.page_size);
        let fan_out = FanOutOptions::from(&config.report);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                shopify,
                fan_out,
            }),
        }
    }

    /// Get a reference to the dashboard configuration.
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify Admin API client.
    #[must_use]
    pub fn shopify(&self) -> &AdminClient {
        &self.inner.shopify
    }

    /// Fan-out settings derived from the report configuration.
    #[must_use]
    pub fn fan_out(&self) -> &FanOutOptions {
        &self.inner.fan_out
    }
}
