//! Type conversions from GraphQL response types to domain types.
//!
//! These functions convert the raw response shapes in `queries` into
//! `shelfwise_core` records. They never fail: malformed values coerce to
//! zero, and records missing an identity (no variant, no timestamp) are
//! skipped with a warning.

mod inventory;
mod orders;

pub use inventory::{convert_inventory_level_connection, convert_location_connection};
pub use orders::convert_order_connection;

use crate::shopify::types::PageInfo;

use super::queries::RawPageInfo;

/// Placeholder ID for line items whose variant or product has been deleted.
pub const UNLINKED_ID: &str = "unlinked";

fn convert_page_info(page_info: RawPageInfo) -> PageInfo {
    PageInfo {
        has_next_page: page_info.has_next_page,
        end_cursor: page_info.end_cursor,
    }
}
