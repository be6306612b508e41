//! Location and inventory read operations for the Admin API.

use shelfwise_core::LocationId;
use shelfwise_core::analytics::{InventoryLine, quantity::TRACKED_QUANTITY_NAMES};
use tracing::instrument;

use super::{
    AdminClient, AdminShopifyError,
    conversions::{convert_inventory_level_connection, convert_location_connection},
    queries::{self, GetInventoryLevels, GetLocations},
};
use crate::shopify::types::{InventoryLevelConnection, Location, LocationConnection};

impl AdminClient {
    /// Get one page of active locations.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_locations(
        &self,
        after: Option<String>,
    ) -> Result<LocationConnection, AdminShopifyError> {
        let variables = queries::get_locations::Variables {
            first: self.page_size,
            after,
        };

        let response = self.execute::<GetLocations>(variables).await?;

        Ok(convert_location_connection(response.locations))
    }

    /// Get every active location, following pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self))]
    pub async fn get_all_locations(&self) -> Result<Vec<Location>, AdminShopifyError> {
        let mut locations = Vec::new();
        let mut after = None;

        loop {
            let page = self.get_locations(after).await?;
            locations.extend(page.locations);
            match page.page_info.next_cursor() {
                Some(cursor) => after = Some(cursor.to_string()),
                None => break,
            }
        }

        tracing::debug!(count = locations.len(), "Fetched locations");
        Ok(locations)
    }

    /// Get one page of inventory levels at a location.
    ///
    /// # Arguments
    ///
    /// * `location_id` - Shopify location ID (e.g., `gid://shopify/Location/123`)
    /// * `after` - Cursor for pagination
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the location is not found.
    #[instrument(skip(self), fields(location_id = %location_id))]
    pub async fn get_inventory_levels(
        &self,
        location_id: &LocationId,
        after: Option<String>,
    ) -> Result<InventoryLevelConnection, AdminShopifyError> {
        let variables = queries::get_inventory_levels::Variables {
            location_id: location_id.to_string(),
            first: self.page_size,
            after,
            quantity_names: TRACKED_QUANTITY_NAMES.iter().map(ToString::to_string).collect(),
        };

        let response = self.execute::<GetInventoryLevels>(variables).await?;

        response
            .location
            .map(convert_inventory_level_connection)
            .ok_or_else(|| AdminShopifyError::NotFound(format!("Location {location_id} not found")))
    }

    /// Get every inventory line stocked at a location, following pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails or the location is not found.
    #[instrument(skip(self), fields(location_id = %location_id))]
    pub async fn get_location_inventory(
        &self,
        location_id: &LocationId,
    ) -> Result<Vec<InventoryLine>, AdminShopifyError> {
        let mut lines = Vec::new();
        let mut after = None;

        loop {
            let page = self.get_inventory_levels(location_id, after).await?;
            lines.extend(page.lines);
            match page.page_info.next_cursor() {
                Some(cursor) => after = Some(cursor.to_string()),
                None => break,
            }
        }

        tracing::debug!(count = lines.len(), "Fetched inventory lines");
        Ok(lines)
    }
}
