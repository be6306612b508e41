//! Inventory type conversion functions.

use rust_decimal::Decimal;
use shelfwise_core::analytics::{InventoryLine, QuantityRecord};
use shelfwise_core::{LocationId, ProductId, VariantId, parse_amount};

use crate::shopify::types::{InventoryLevelConnection, Location, LocationConnection};

use super::super::queries::{get_inventory_levels, get_locations};
use super::convert_page_info;

// =============================================================================
// GetInventoryLevels conversions
// =============================================================================

pub fn convert_inventory_level_connection(
    location: get_inventory_levels::GetInventoryLevelsLocation,
) -> InventoryLevelConnection {
    let location_id = LocationId::new(location.id);

    InventoryLevelConnection {
        lines: location
            .inventory_levels
            .edges
            .into_iter()
            .filter_map(|e| convert_inventory_level(e.node, &location_id))
            .collect(),
        page_info: convert_page_info(location.inventory_levels.page_info),
    }
}

fn convert_inventory_level(
    level: get_inventory_levels::InventoryLevelNode,
    location_id: &LocationId,
) -> Option<InventoryLine> {
    let Some(variant) = level.item.and_then(|item| item.variant) else {
        tracing::debug!(location_id = %location_id, "Skipping inventory level without a variant");
        return None;
    };
    let Some(product) = variant.product else {
        tracing::debug!(variant_id = %variant.id, "Skipping variant without a product");
        return None;
    };

    let unit_price: Decimal = parse_amount(variant.price.as_deref());

    Some(InventoryLine {
        location_id: location_id.clone(),
        product_id: ProductId::new(product.id),
        variant_id: VariantId::new(variant.id),
        product_title: product.title,
        unit_price,
        quantities: level
            .quantities
            .into_iter()
            .map(|q| QuantityRecord::new(q.name, q.quantity.unwrap_or(0)))
            .collect(),
    })
}

// =============================================================================
// GetLocations conversions
// =============================================================================

pub fn convert_location_connection(
    locations: get_locations::GetLocationsLocations,
) -> LocationConnection {
    LocationConnection {
        locations: locations
            .edges
            .into_iter()
            .map(|e| convert_location(e.node))
            .collect(),
        page_info: convert_page_info(locations.page_info),
    }
}

fn convert_location(location: get_locations::GetLocationsNode) -> Location {
    Location {
        id: LocationId::new(location.id),
        name: location.name,
        is_active: location.is_active,
        fulfills_online_orders: location.fulfills_online_orders,
    }
}
