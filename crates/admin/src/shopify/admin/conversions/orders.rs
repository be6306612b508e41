//! Order type conversion functions.

use chrono::{DateTime, Utc};
use shelfwise_core::analytics::{Order, OrderLineItem};
use shelfwise_core::{OrderId, ProductId, VariantId, parse_amount};

use crate::shopify::types::OrderConnection;

use super::super::queries::get_orders;
use super::{UNLINKED_ID, convert_page_info};

// =============================================================================
// GetOrders conversions
// =============================================================================

pub fn convert_order_connection(orders: get_orders::GetOrdersOrders) -> OrderConnection {
    OrderConnection {
        orders: orders
            .edges
            .into_iter()
            .filter_map(|e| convert_order(e.node))
            .collect(),
        page_info: convert_page_info(orders.page_info),
    }
}

fn convert_order(order: get_orders::OrderNode) -> Option<Order> {
    let Some(created_at) = order.created_at.as_deref().and_then(parse_timestamp) else {
        tracing::warn!(order_id = %order.id, "Skipping order without a valid createdAt");
        return None;
    };

    let total = order
        .total_price_set
        .and_then(|set| set.shop_money)
        .and_then(|money| money.amount);

    Some(Order {
        id: OrderId::new(order.id),
        created_at,
        total_value: parse_amount(total.as_deref()),
        line_items: order
            .line_items
            .map(|items| {
                items
                    .edges
                    .into_iter()
                    .map(|e| convert_line_item(e.node))
                    .collect()
            })
            .unwrap_or_default(),
    })
}

fn convert_line_item(item: get_orders::LineItemNode) -> OrderLineItem {
    OrderLineItem {
        variant_id: item
            .variant
            .map_or_else(|| VariantId::new(UNLINKED_ID), |v| VariantId::new(v.id)),
        product_id: item
            .product
            .map_or_else(|| ProductId::new(UNLINKED_ID), |p| ProductId::new(p.id)),
        quantity: item.quantity.unwrap_or(0),
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Utc))
}
