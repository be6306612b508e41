//! Shopify Admin API GraphQL client.
//!
//! This module provides a read-only client for the Shopify Admin API,
//! authenticated with a custom app access token.

use std::sync::Arc;

use graphql_client::{GraphQLQuery, PathFragment, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::config::ShopifyAdminConfig;

use super::{AdminShopifyError, GraphQLError, GraphQLErrorLocation};

mod conversions;
mod inventory;
mod orders;
pub mod queries;

/// Page size used when none is configured.
const DEFAULT_PAGE_SIZE: u32 = 100;

/// Shopify Admin API client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
    page_size: i64,
}

struct AdminClientInner {
    client: reqwest::Client,
    store: String,
    api_version: String,
    access_token: SecretString,
}

impl AdminClient {
    /// Create a new Admin API client.
    ///
    /// # Arguments
    ///
    /// * `config` - Shopify Admin API configuration
    #[must_use]
    pub fn new(config: &ShopifyAdminConfig) -> Self {
        let client = reqwest::Client::new();

        Self {
            inner: Arc::new(AdminClientInner {
                client,
                store: config.store.clone(),
                api_version: config.api_version.clone(),
                access_token: config.access_token.clone(),
            }),
            page_size: i64::from(DEFAULT_PAGE_SIZE),
        }
    }

    /// Set the page size for paginated connections.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = i64::from(page_size.max(1));
        self
    }

    /// Get the store domain.
    #[must_use]
    pub fn store(&self) -> &str {
        &self.inner.store
    }

    fn endpoint(&self) -> String {
        format!(
            "https://{}/admin/api/{}/graphql.json",
            self.inner.store, self.inner.api_version
        )
    }

    // =========================================================================
    // GraphQL Execution
    // =========================================================================

    /// Execute a GraphQL query.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, AdminShopifyError>
    where
        Q::ResponseData: DeserializeOwned,
    {
        let body = Q::build_query(variables);

        let response = self
            .inner
            .client
            .post(self.endpoint())
            .header("X-Shopify-Access-Token", self.inner.access_token.expose_secret())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        // Check for rate limiting
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<f64>().ok())
                .map_or(2, whole_seconds);
            return Err(AdminShopifyError::RateLimited(retry_after));
        }

        // Check for unauthorized
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AdminShopifyError::Unauthorized(
                "Invalid or revoked access token".to_string(),
            ));
        }

        let response = response.error_for_status()?;
        let graphql_response: Response<Q::ResponseData> = response.json().await?;

        into_data(graphql_response)
    }
}

/// Round a `Retry-After` value up to whole seconds, capped at an hour.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=3600
fn whole_seconds(secs: f64) -> u64 {
    secs.ceil().clamp(0.0, 3600.0) as u64
}

/// Unwrap a GraphQL response envelope, turning reported errors into
/// `AdminShopifyError::GraphQL`.
fn into_data<T>(response: Response<T>) -> Result<T, AdminShopifyError> {
    if let Some(errors) = response.errors
        && !errors.is_empty()
    {
        let converted_errors: Vec<GraphQLError> = errors
            .into_iter()
            .map(|e| GraphQLError {
                message: e.message,
                locations: e
                    .locations
                    .unwrap_or_default()
                    .into_iter()
                    .map(|l| GraphQLErrorLocation {
                        line: i64::from(l.line),
                        column: i64::from(l.column),
                    })
                    .collect(),
                path: e
                    .path
                    .unwrap_or_default()
                    .into_iter()
                    .map(|fragment| match fragment {
                        PathFragment::Key(key) => key,
                        PathFragment::Index(index) => index.to_string(),
                    })
                    .collect(),
            })
            .collect();
        return Err(AdminShopifyError::GraphQL(converted_errors));
    }

    response.data.ok_or_else(|| {
        AdminShopifyError::GraphQL(vec![GraphQLError {
            message: "No data in response".to_string(),
            locations: vec![],
            path: vec![],
        }])
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn test_config() -> ShopifyAdminConfig {
        ShopifyAdminConfig {
            store: "test.myshopify.com".to_string(),
            api_version: "2026-01".to_string(),
            access_token: SecretString::from("shpat_test"),
        }
    }

    #[test]
    fn test_admin_client_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AdminClient>();
    }

    #[test]
    fn test_admin_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AdminClient>();
    }

    #[test]
    fn test_endpoint_uses_store_and_version() {
        let client = AdminClient::new(&test_config());
        assert_eq!(
            client.endpoint(),
            "https://test.myshopify.com/admin/api/2026-01/graphql.json"
        );
        assert_eq!(client.store(), "test.myshopify.com");
    }

    #[test]
    fn test_page_size_is_at_least_one() {
        let client = AdminClient::new(&test_config()).with_page_size(0);
        assert_eq!(client.page_size, 1);
    }

    #[test]
    fn test_whole_seconds() {
        assert_eq!(whole_seconds(1.2), 2);
        assert_eq!(whole_seconds(-5.0), 0);
        assert_eq!(whole_seconds(1e9), 3600);
    }

    #[test]
    fn test_into_data_surfaces_graphql_errors() {
        let response: Response<serde_json::Value> = serde_json::from_str(
            r#"{
                "data": null,
                "errors": [{"message": "Throttled", "path": ["orders", 0], "locations": [{"line": 2, "column": 3}]}]
            }"#,
        )
        .unwrap();

        let err = into_data(response).unwrap_err();
        match err {
            AdminShopifyError::GraphQL(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].message, "Throttled");
                assert_eq!(errors[0].path, vec!["orders".to_string(), "0".to_string()]);
                assert_eq!(errors[0].locations[0].line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_into_data_without_data_is_an_error() {
        let response: Response<serde_json::Value> = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            into_data(response),
            Err(AdminShopifyError::GraphQL(_))
        ));
    }
}
