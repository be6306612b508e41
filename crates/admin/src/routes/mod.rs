//! HTTP route handlers for the dashboard API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                              - Health check
//!
//! # Analytics (JSON, read from Shopify)
//! GET  /api/analytics/portfolio             - Portfolio report (?range=&days=&sort=)
//! GET  /api/analytics/locations/{id}        - Location report with product breakdown
//! GET  /api/analytics/kpis                  - KPI calculator (?available=&units_sold=&on_hand=&days=)
//! ```

pub mod analytics;

use axum::{Router, http::Uri, routing::get};

use crate::{error::AppError, state::AppState};

/// Create the analytics API router.
pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/portfolio", get(analytics::portfolio))
        .route("/locations/{id}", get(analytics::location))
        .route("/kpis", get(analytics::kpis))
}

/// Create all routes for the dashboard.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api/analytics", analytics_routes())
        .fallback(not_found)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check Shopify.
async fn health() -> &'static str {
    "ok"
}

/// JSON 404 for unknown paths.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use secrecy::SecretString;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{DashboardConfig, ReportConfig, ShopifyAdminConfig};

    fn app() -> Router {
        let config = DashboardConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            shopify: ShopifyAdminConfig {
                store: "test.myshopify.com".to_string(),
                api_version: "2026-01".to_string(),
                access_token: SecretString::from("shpat_test"),
            },
            report: ReportConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        };
        routes().with_state(AppState::new(config))
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_path_is_json_404() {
        let (status, json) = get_json("/api/analytics/margins").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Not found: /api/analytics/margins");
    }

    #[tokio::test]
    async fn test_kpis_endpoint() {
        let (status, json) =
            get_json("/api/analytics/kpis?available=100&units_sold=25&on_hand=100&days=30").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["turnover_rate"], 0.25);
        assert_eq!(json["stock_coverage_days"], 120);
        assert_eq!(json["sell_through_percent"], 20.0);
    }

    #[tokio::test]
    async fn test_kpis_endpoint_no_sales() {
        let (status, json) = get_json("/api/analytics/kpis?available=40").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["turnover_rate"], 0.0);
        assert_eq!(json["stock_coverage_days"], 999);
    }

    #[tokio::test]
    async fn test_kpis_endpoint_rejects_zero_days() {
        let (status, json) = get_json("/api/analytics/kpis?available=1&days=0").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("between 1 and 365"));
    }

    #[tokio::test]
    async fn test_portfolio_rejects_unknown_range_before_fetching() {
        let (status, json) = get_json("/api/analytics/portfolio?range=1y").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("1y"));
    }

    #[tokio::test]
    async fn test_portfolio_rejects_unknown_sort() {
        let (status, _) = get_json("/api/analytics/portfolio?sort=margin").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
