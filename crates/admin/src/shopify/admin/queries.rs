//! GraphQL query definitions for Shopify Admin API.
//!
//! Each operation is a marker type implementing [`GraphQLQuery`], next to a
//! module holding its document, `Variables` and `ResponseData`: the layout
//! `#[derive(GraphQLQuery)]` generates. The documents select only what the
//! analytics read, so the response types are written out by hand.
//!
//! Response fields the platform may omit or null are `Option`/defaulted.
//! Conversions decide how to treat a missing value.

use graphql_client::{GraphQLQuery, QueryBody};
use serde::Deserialize;

/// Line items fetched per order. Orders with more lines are truncated.
pub const LINE_ITEMS_PER_ORDER: i64 = 250;

/// Shared `pageInfo` selection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// Shared `{ id }` selection.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    pub id: String,
}

/// Relay-style edge wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

// =============================================================================
// Location queries
// =============================================================================

pub struct GetLocations;

pub mod get_locations {
    use serde::{Deserialize, Serialize};

    use super::{Edge, RawPageInfo};

    pub const OPERATION_NAME: &str = "GetLocations";
    pub const QUERY: &str = r"
query GetLocations($first: Int!, $after: String) {
  locations(first: $first, after: $after, includeInactive: false) {
    edges {
      node {
        id
        name
        isActive
        fulfillsOnlineOrders
      }
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}
";

    #[derive(Debug, Serialize)]
    pub struct Variables {
        pub first: i64,
        pub after: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        pub locations: GetLocationsLocations,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GetLocationsLocations {
        pub edges: Vec<Edge<GetLocationsNode>>,
        #[serde(default)]
        pub page_info: RawPageInfo,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GetLocationsNode {
        pub id: String,
        #[serde(default)]
        pub name: String,
        #[serde(default)]
        pub is_active: bool,
        #[serde(default)]
        pub fulfills_online_orders: bool,
    }
}

impl GraphQLQuery for GetLocations {
    type Variables = get_locations::Variables;
    type ResponseData = get_locations::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: get_locations::QUERY,
            operation_name: get_locations::OPERATION_NAME,
        }
    }
}

// =============================================================================
// Inventory queries
// =============================================================================

pub struct GetInventoryLevels;

pub mod get_inventory_levels {
    use serde::{Deserialize, Serialize};

    use super::{Edge, RawPageInfo};

    pub const OPERATION_NAME: &str = "GetInventoryLevels";
    pub const QUERY: &str = r"
query GetInventoryLevels($locationId: ID!, $first: Int!, $after: String, $quantityNames: [String!]!) {
  location(id: $locationId) {
    id
    inventoryLevels(first: $first, after: $after) {
      edges {
        node {
          quantities(names: $quantityNames) {
            name
            quantity
          }
          item {
            variant {
              id
              price
              product {
                id
                title
              }
            }
          }
        }
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
  }
}
";

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub location_id: String,
        pub first: i64,
        pub after: Option<String>,
        pub quantity_names: Vec<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        pub location: Option<GetInventoryLevelsLocation>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GetInventoryLevelsLocation {
        pub id: String,
        pub inventory_levels: InventoryLevels,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InventoryLevels {
        #[serde(default)]
        pub edges: Vec<Edge<InventoryLevelNode>>,
        #[serde(default)]
        pub page_info: RawPageInfo,
    }

    #[derive(Debug, Deserialize)]
    pub struct InventoryLevelNode {
        #[serde(default)]
        pub quantities: Vec<Quantity>,
        pub item: Option<InventoryItem>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Quantity {
        pub name: String,
        pub quantity: Option<i64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct InventoryItem {
        pub variant: Option<Variant>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Variant {
        pub id: String,
        /// Money scalar, a decimal string.
        pub price: Option<String>,
        pub product: Option<Product>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Product {
        pub id: String,
        pub title: Option<String>,
    }
}

impl GraphQLQuery for GetInventoryLevels {
    type Variables = get_inventory_levels::Variables;
    type ResponseData = get_inventory_levels::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: get_inventory_levels::QUERY,
            operation_name: get_inventory_levels::OPERATION_NAME,
        }
    }
}

// =============================================================================
// Order queries
// =============================================================================

pub struct GetOrders;

pub mod get_orders {
    use serde::{Deserialize, Serialize};

    use super::{Edge, RawNode, RawPageInfo};

    pub const OPERATION_NAME: &str = "GetOrders";
    pub const QUERY: &str = r"
query GetOrders($first: Int!, $after: String, $query: String, $lineItems: Int!) {
  orders(first: $first, after: $after, query: $query, sortKey: CREATED_AT) {
    edges {
      node {
        id
        createdAt
        totalPriceSet {
          shopMoney {
            amount
          }
        }
        lineItems(first: $lineItems) {
          edges {
            node {
              quantity
              variant {
                id
              }
              product {
                id
              }
            }
          }
        }
      }
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}
";

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub first: i64,
        pub after: Option<String>,
        /// Search syntax, e.g. `location_id:123 created_at:>=2026-01-01T00:00:00Z`.
        pub query: Option<String>,
        pub line_items: i64,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        pub orders: GetOrdersOrders,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GetOrdersOrders {
        #[serde(default)]
        pub edges: Vec<Edge<OrderNode>>,
        #[serde(default)]
        pub page_info: RawPageInfo,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct OrderNode {
        pub id: String,
        pub created_at: Option<String>,
        pub total_price_set: Option<MoneyBag>,
        pub line_items: Option<LineItems>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MoneyBag {
        pub shop_money: Option<MoneyV2>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MoneyV2 {
        pub amount: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct LineItems {
        #[serde(default)]
        pub edges: Vec<Edge<LineItemNode>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct LineItemNode {
        pub quantity: Option<i64>,
        pub variant: Option<RawNode>,
        pub product: Option<RawNode>,
    }
}

impl GraphQLQuery for GetOrders {
    type Variables = get_orders::Variables;
    type ResponseData = get_orders::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: get_orders::QUERY,
            operation_name: get_orders::OPERATION_NAME,
        }
    }
}
