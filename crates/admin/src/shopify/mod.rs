//! Shopify Admin API client (read-only analytics access).
//!
//! # Security
//!
//! The client authenticates with a custom app access token. Give that app
//! read-only scopes: `read_locations`, `read_inventory`, `read_products`
//! and `read_orders`. Nothing here writes to the store.
//!
//! # Architecture
//!
//! - `graphql_client` request bodies and response envelopes over `reqwest`
//! - Direct API calls to Shopify (no local database sync)
//! - Every connection is paginated to exhaustion by the fetch helpers
//!
//! # Example
//!
//! ```rust,ignore
//! use shelfwise_admin::shopify::AdminClient;
//!
//! let client = AdminClient::new(&config.shopify).with_page_size(config.report.page_size);
//!
//! let locations = client.get_all_locations().await?;
//! let lines = client
//!     .get_location_inventory(&locations[0].id)
//!     .await?;
//! ```

mod admin;
pub mod types;

pub use admin::AdminClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with Shopify Admin API.
#[derive(Debug, Error)]
pub enum AdminShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<String>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}
