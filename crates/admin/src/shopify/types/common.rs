//! Common domain types shared across Shopify Admin API.

use serde::{Deserialize, Serialize};

/// Pagination information for connections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Cursor for the last item in this page.
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Cursor to request the next page, if there is one.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        if self.has_next_page {
            self.end_cursor.as_deref()
        } else {
            None
        }
    }
}
