//! Location and inventory domain types for Shopify Admin API.

use serde::{Deserialize, Serialize};
use shelfwise_core::LocationId;
use shelfwise_core::analytics::InventoryLine;

use super::common::PageInfo;

// =============================================================================
// Location Types
// =============================================================================

/// A physical location for inventory storage and fulfillment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Location ID.
    pub id: LocationId,
    /// Location name.
    pub name: String,
    /// Whether the location is active.
    pub is_active: bool,
    /// Whether this location fulfills online orders.
    pub fulfills_online_orders: bool,
}

/// Paginated list of locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConnection {
    /// Locations in this page.
    pub locations: Vec<Location>,
    /// Pagination info.
    pub page_info: PageInfo,
}

// =============================================================================
// Inventory Types
// =============================================================================

/// One page of inventory lines at a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryLevelConnection {
    /// Inventory lines in this page (levels without a variant are skipped).
    pub lines: Vec<InventoryLine>,
    /// Pagination info.
    pub page_info: PageInfo,
}
