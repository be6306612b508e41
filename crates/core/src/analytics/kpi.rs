//! KPI derivation: turnover, stock coverage and sell-through.
//!
//! Each ratio has a defined value for a zero denominator, so callers can
//! render or sum the result without special cases:
//!
//! | KPI                  | Formula                                   | Zero denominator |
//! |----------------------|-------------------------------------------|------------------|
//! | turnover rate        | `units_sold / available`                  | `0`              |
//! | stock coverage days  | `round(available / (units_sold / days))`  | `999`            |
//! | sell-through percent | `units_sold / (on_hand + units_sold) × 100` | `0`            |

use serde::{Deserialize, Serialize};

/// Stock coverage reported when nothing sold: effectively unlimited.
pub const STOCK_COVERAGE_SENTINEL_DAYS: i64 = 999;

/// Derived inventory/sales KPIs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Kpis {
    /// Units sold per unit currently available.
    pub turnover_rate: f64,
    /// Days the available stock lasts at the observed sales velocity.
    pub stock_coverage_days: i64,
    /// Share of ever-available units (sold + on hand) that sold.
    pub sell_through_percent: f64,
}

/// Derive KPIs from unit counts over a period of `period_days`.
///
/// Negative counts are treated as zero and a zero-day period as one day, so
/// the result never contains NaN or infinity.
///
/// ```rust
/// # use shelfwise_core::analytics::kpi::compute_kpis;
/// let kpis = compute_kpis(100, 25, 0, 30);
/// assert_eq!(kpis.turnover_rate, 0.25);
/// assert_eq!(kpis.stock_coverage_days, 120);
/// ```
#[must_use]
pub fn compute_kpis(available: i64, units_sold: i64, on_hand: i64, period_days: u32) -> Kpis {
    let available = available.max(0);
    let units_sold = units_sold.max(0);
    let on_hand = on_hand.max(0);

    Kpis {
        turnover_rate: turnover_rate(available, units_sold),
        stock_coverage_days: stock_coverage_days(available, units_sold, period_days),
        sell_through_percent: sell_through_percent(units_sold, on_hand),
    }
}

/// `units_sold / (remaining + units_sold) × 100`, or `0` when both are zero.
///
/// Shared by per-location sell-through, per-product sell-through and the
/// portfolio efficiency figure so every view uses one definition.
#[must_use]
#[allow(clippy::cast_precision_loss)] // unit counts stay far below 2^52
pub fn sell_through_percent(units_sold: i64, remaining: i64) -> f64 {
    let units_sold = units_sold.max(0);
    let total = remaining.max(0).saturating_add(units_sold);
    if total > 0 {
        (units_sold as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

#[allow(clippy::cast_precision_loss)]
fn turnover_rate(available: i64, units_sold: i64) -> f64 {
    if available > 0 {
        units_sold as f64 / available as f64
    } else {
        0.0
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn stock_coverage_days(available: i64, units_sold: i64, period_days: u32) -> i64 {
    if units_sold <= 0 {
        return STOCK_COVERAGE_SENTINEL_DAYS;
    }

    // Keep the two-step form: velocity first, then coverage. Folding it into
    // `available * days / sold` changes where rounding happens.
    let days = f64::from(period_days.max(1));
    let daily_velocity = units_sold as f64 / days;
    (available as f64 / daily_velocity).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_scenario() {
        let kpis = compute_kpis(100, 25, 0, 30);
        assert!((kpis.turnover_rate - 0.25).abs() < f64::EPSILON);
        assert_eq!(kpis.stock_coverage_days, 120);
    }

    #[test]
    fn test_sell_through_half() {
        let kpis = compute_kpis(0, 50, 50, 30);
        assert!((kpis.sell_through_percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_sales_uses_sentinel() {
        let kpis = compute_kpis(40, 0, 40, 30);
        assert!(kpis.turnover_rate.abs() < f64::EPSILON);
        assert_eq!(kpis.stock_coverage_days, STOCK_COVERAGE_SENTINEL_DAYS);
        assert!(kpis.sell_through_percent.abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_stock_with_sales() {
        let kpis = compute_kpis(0, 10, 0, 30);
        assert!(kpis.turnover_rate.abs() < f64::EPSILON);
        assert_eq!(kpis.stock_coverage_days, 0);
        assert!((kpis.sell_through_percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_coverage_rounds_half_up() {
        // 3 units selling 2 per 1 day: 1.5 days -> 2
        assert_eq!(compute_kpis(3, 2, 0, 1).stock_coverage_days, 2);
        // 10 units selling 3 per 7 days: 23.33 days -> 23
        assert_eq!(compute_kpis(10, 3, 0, 7).stock_coverage_days, 23);
    }

    #[test]
    fn test_zero_day_period_treated_as_one() {
        assert_eq!(compute_kpis(10, 5, 0, 0).stock_coverage_days, 2);
    }

    #[test]
    fn test_negative_inputs_clamped() {
        let kpis = compute_kpis(-5, -1, -10, 30);
        assert!(kpis.turnover_rate.abs() < f64::EPSILON);
        assert_eq!(kpis.stock_coverage_days, STOCK_COVERAGE_SENTINEL_DAYS);
        assert!(kpis.sell_through_percent.abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn no_sales_means_zero_turnover_and_sentinel(
            available in 0i64..1_000_000,
            on_hand in 0i64..1_000_000,
            days in 1u32..366,
        ) {
            let kpis = compute_kpis(available, 0, on_hand, days);
            prop_assert_eq!(kpis.turnover_rate, 0.0);
            prop_assert_eq!(kpis.stock_coverage_days, STOCK_COVERAGE_SENTINEL_DAYS);
        }

        #[test]
        fn kpis_are_always_finite_and_bounded(
            available in -1_000i64..1_000_000,
            units_sold in -1_000i64..1_000_000,
            on_hand in -1_000i64..1_000_000,
            days in 0u32..366,
        ) {
            let kpis = compute_kpis(available, units_sold, on_hand, days);
            prop_assert!(kpis.turnover_rate.is_finite());
            prop_assert!(kpis.turnover_rate >= 0.0);
            prop_assert!(kpis.stock_coverage_days >= 0);
            prop_assert!((0.0..=100.0).contains(&kpis.sell_through_percent));
        }

        #[test]
        fn compute_kpis_is_deterministic(
            available in 0i64..100_000,
            units_sold in 0i64..100_000,
            on_hand in 0i64..100_000,
            days in 1u32..366,
        ) {
            let first = compute_kpis(available, units_sold, on_hand, days);
            let second = compute_kpis(available, units_sold, on_hand, days);
            prop_assert_eq!(first.turnover_rate.to_bits(), second.turnover_rate.to_bits());
            prop_assert_eq!(first.stock_coverage_days, second.stock_coverage_days);
            prop_assert_eq!(
                first.sell_through_percent.to_bits(),
                second.sell_through_percent.to_bits()
            );
        }
    }
}
