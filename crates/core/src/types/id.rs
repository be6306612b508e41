//! Newtype IDs for type-safe entity references.
//!
//! Shopify identifies every resource with a global ID string such as
//! `gid://shopify/Location/123`. Use the `define_id!` macro to create type-safe
//! wrappers that prevent accidentally mixing IDs from different entity types.

/// Prefix shared by every Shopify global ID.
pub const GID_PREFIX: &str = "gid://shopify/";

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `legacy_id()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use shelfwise_core::define_id;
/// define_id!(WarehouseId);
/// define_id!(ShipmentId);
///
/// let warehouse = WarehouseId::new("gid://shopify/Location/1");
/// let shipment = ShipmentId::new("gid://shopify/Shipment/1");
///
/// assert_eq!(warehouse.legacy_id(), Some("1"));
/// // These are different types, so this won't compile:
/// // let _: WarehouseId = shipment;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a Shopify global ID (or any opaque string).
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying ID string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// The numeric tail of a global ID (`gid://shopify/Location/123` -> `123`).
            ///
            /// Search filters in the Admin API take this form rather than the
            /// full global ID. Returns `None` for IDs that are not global IDs.
            #[must_use]
            pub fn legacy_id(&self) -> Option<&str> {
                let rest = self.0.strip_prefix($crate::types::id::GID_PREFIX)?;
                let (_, tail) = rest.rsplit_once('/')?;
                let tail = tail.split('?').next().unwrap_or(tail);
                (!tail.is_empty()).then_some(tail)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(LocationId);
define_id!(ProductId);
define_id!(VariantId);
define_id!(OrderId);

impl LocationId {
    /// Parse user input: a bare numeric ID becomes a `Location` global ID,
    /// anything else is taken as-is.
    #[must_use]
    pub fn parse_input(raw: &str) -> Self {
        let raw = raw.trim();
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            Self(format!("{GID_PREFIX}Location/{raw}"))
        } else {
            Self(raw.to_string())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_id_from_gid() {
        let id = LocationId::new("gid://shopify/Location/76543");
        assert_eq!(id.legacy_id(), Some("76543"));
    }

    #[test]
    fn test_legacy_id_strips_query() {
        let id = VariantId::new("gid://shopify/ProductVariant/42?inventory=1");
        assert_eq!(id.legacy_id(), Some("42"));
    }

    #[test]
    fn test_location_parse_input() {
        assert_eq!(
            LocationId::parse_input(" 123 ").as_str(),
            "gid://shopify/Location/123"
        );
        assert_eq!(
            LocationId::parse_input("gid://shopify/Location/9").as_str(),
            "gid://shopify/Location/9"
        );
        assert_eq!(LocationId::parse_input("").as_str(), "");
    }

    #[test]
    fn test_legacy_id_non_gid() {
        assert_eq!(LocationId::new("warehouse-main").legacy_id(), None);
        assert_eq!(LocationId::new("gid://shopify/Location/").legacy_id(), None);
    }

    #[test]
    fn test_display_and_serde_transparent() {
        let id = ProductId::new("gid://shopify/Product/9");
        assert_eq!(id.to_string(), "gid://shopify/Product/9");

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"gid://shopify/Product/9\"");

        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
