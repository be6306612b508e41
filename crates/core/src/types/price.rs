//! Lenient money and quantity parsing.
//!
//! Shopify sends money as decimal strings (`"19.99"`). Amounts are parsed into
//! [`Decimal`] so sums of many line values never pick up binary floating-point
//! error. Parsing is lenient: analytics must degrade to zero rather than fail
//! on a bad upstream value. Unit quantities get the same treatment.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Parse a platform money/decimal string, coercing bad input to zero.
///
/// Missing, non-numeric and negative values all yield `Decimal::ZERO`.
///
/// ```rust
/// # use shelfwise_core::parse_amount;
/// # use rust_decimal::Decimal;
/// assert_eq!(parse_amount(Some("19.99")), Decimal::new(1999, 2));
/// assert_eq!(parse_amount(Some("n/a")), Decimal::ZERO);
/// assert_eq!(parse_amount(None), Decimal::ZERO);
/// ```
#[must_use]
pub fn parse_amount(raw: Option<&str>) -> Decimal {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Decimal::ZERO;
    };

    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
        .filter(|amount| amount.is_sign_positive())
        .unwrap_or(Decimal::ZERO)
}

/// Serde helper: deserialize an amount leniently with [`parse_amount`].
///
/// Accepts a decimal string, a JSON number, `null` or anything else; values
/// that are not a non-negative number become zero instead of failing the
/// whole document. Pair with `#[serde(default)]` for absent fields.
///
/// # Errors
///
/// Only fails if the underlying deserializer itself fails.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Text(String),
        Number(f64),
        Other(serde::de::IgnoredAny),
    }

    let amount = match Option::<RawAmount>::deserialize(deserializer)? {
        Some(RawAmount::Text(text)) => parse_amount(Some(&text)),
        Some(RawAmount::Number(number)) => parse_amount(Some(&number.to_string())),
        Some(RawAmount::Other(_)) | None => Decimal::ZERO,
    };
    Ok(amount)
}

/// Serde helper: deserialize a unit quantity leniently.
///
/// Integers pass through (negative values included, callers clamp). Floats
/// are truncated, numeric strings are parsed, and `null` or anything else
/// becomes zero. Pair with `#[serde(default)]` for absent fields.
///
/// # Errors
///
/// Only fails if the underlying deserializer itself fails.
pub fn deserialize_quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawQuantity {
        Integer(i64),
        Float(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let quantity = match Option::<RawQuantity>::deserialize(deserializer)? {
        Some(RawQuantity::Integer(quantity)) => quantity,
        Some(RawQuantity::Float(quantity)) => float_quantity(quantity),
        Some(RawQuantity::Text(text)) => {
            let text = text.trim();
            text.parse::<i64>()
                .or_else(|_| text.parse::<f64>().map(float_quantity))
                .unwrap_or(0)
        }
        Some(RawQuantity::Other(_)) | None => 0,
    };
    Ok(quantity)
}

/// `as` saturates at the `i64` bounds and maps NaN to zero.
#[allow(clippy::cast_possible_truncation)]
fn float_quantity(quantity: f64) -> i64 {
    quantity.trunc() as i64
}
