//! Order domain types for Shopify Admin API.

use serde::{Deserialize, Serialize};
use shelfwise_core::analytics::Order;

use super::common::PageInfo;

/// One page of orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConnection {
    /// Orders in this page.
    pub orders: Vec<Order>,
    /// Pagination info.
    pub page_info: PageInfo,
}
