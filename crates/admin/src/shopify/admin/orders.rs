//! Order read operations for the Admin API.

use chrono::{DateTime, SecondsFormat, Utc};
use shelfwise_core::LocationId;
use shelfwise_core::analytics::Order;
use tracing::instrument;

use super::{
    AdminClient, AdminShopifyError,
    conversions::convert_order_connection,
    queries::{self, GetOrders, LINE_ITEMS_PER_ORDER},
};
use crate::shopify::types::OrderConnection;

/// Search filter selecting a location's orders placed at or after `since`.
///
/// The Admin API search syntax takes the numeric location ID, not the
/// global ID.
#[must_use]
pub fn location_orders_query(location_id: &LocationId, since: DateTime<Utc>) -> String {
    let id = location_id.legacy_id().unwrap_or_else(|| location_id.as_str());
    format!(
        "location_id:{id} created_at:>='{}'",
        since.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

impl AdminClient {
    /// Get one page of orders matching a search filter.
    ///
    /// # Arguments
    ///
    /// * `query` - Admin API search filter (e.g., `created_at:>='2026-01-01T00:00:00Z'`)
    /// * `after` - Cursor for pagination
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_orders(
        &self,
        query: Option<String>,
        after: Option<String>,
    ) -> Result<OrderConnection, AdminShopifyError> {
        let variables = queries::get_orders::Variables {
            first: self.page_size,
            after,
            query,
            line_items: LINE_ITEMS_PER_ORDER,
        };

        let response = self.execute::<GetOrders>(variables).await?;

        Ok(convert_order_connection(response.orders))
    }

    /// Get every order attributed to a location since `since`, following
    /// pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self), fields(location_id = %location_id))]
    pub async fn get_location_orders(
        &self,
        location_id: &LocationId,
        since: DateTime<Utc>,
    ) -> Result<Vec<Order>, AdminShopifyError> {
        let query = location_orders_query(location_id, since);
        let mut orders = Vec::new();
        let mut after = None;

        loop {
            let page = self.get_orders(Some(query.clone()), after).await?;
            orders.extend(page.orders);
            match page.page_info.next_cursor() {
                Some(cursor) => after = Some(cursor.to_string()),
                None => break,
            }
        }

        tracing::debug!(count = orders.len(), "Fetched orders");
        Ok(orders)
    }
}
