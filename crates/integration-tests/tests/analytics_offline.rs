//! Aggregation over the snapshot fixture, through the public library API.
//!
//! No network or server needed.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use rust_decimal::Decimal;
use shelfwise_core::LocationId;
use shelfwise_core::analytics::{
    GapReason, LocationGap, LocationReport, LocationSort, PortfolioReport,
    STOCK_COVERAGE_SENTINEL_DAYS, aggregate_location, rollup,
};
use shelfwise_integration_tests::{fixture_as_of, fixture_period, fixture_snapshots};

fn report(sort: LocationSort) -> PortfolioReport {
    PortfolioReport::build(fixture_period(), fixture_as_of(), fixture_snapshots(), vec![], sort)
}

// ============================================================================
// Per-location rows
// ============================================================================

#[test]
fn test_downtown_row() {
    let report = report(LocationSort::Name);
    let row = report
        .locations
        .iter()
        .find(|row| row.location_name == "Downtown")
        .unwrap();

    assert_eq!(row.available, 15);
    assert_eq!(row.on_hand, 17);
    assert_eq!(row.reserved, 2);
    assert_eq!(row.inventory_value, Decimal::new(7500, 2));
    assert_eq!(row.unique_product_count, 1);

    // The August order falls outside the window
    assert_eq!(row.order_count, 1);
    assert_eq!(row.units_sold, 3);
    assert_eq!(row.sales_value, Decimal::new(15000, 2));
    assert_eq!(row.avg_order_value, Decimal::new(15000, 2));

    assert!((row.turnover_rate - 0.2).abs() < 1e-9);
    assert_eq!(row.stock_coverage_days, 150);
    assert!((row.sell_through_percent - 15.0).abs() < 1e-9);
}

#[test]
fn test_malformed_price_counts_as_zero_value() {
    let report = report(LocationSort::Name);
    let airport = report
        .locations
        .iter()
        .find(|row| row.location_name == "Airport")
        .unwrap();

    assert_eq!(airport.available, 100);
    assert_eq!(airport.inventory_value, Decimal::ZERO);
    assert_eq!(airport.units_sold, 50);
    assert!((airport.turnover_rate - 0.5).abs() < 1e-9);
    assert_eq!(airport.stock_coverage_days, 60);
    assert!((airport.sell_through_percent - 50.0).abs() < 1e-9);
}

#[test]
fn test_empty_location_uses_zero_denominator_values() {
    let report = report(LocationSort::Name);
    let popup = report
        .locations
        .iter()
        .find(|row| row.location_name == "Pop-up")
        .unwrap();

    assert_eq!(popup.available, 0);
    assert_eq!(popup.order_count, 0);
    assert_eq!(popup.avg_order_value, Decimal::ZERO);
    assert!(popup.turnover_rate.abs() < f64::EPSILON);
    assert_eq!(popup.stock_coverage_days, STOCK_COVERAGE_SENTINEL_DAYS);
    assert!(popup.sell_through_percent.abs() < f64::EPSILON);
}

// ============================================================================
// Totals and ordering
// ============================================================================

#[test]
fn test_portfolio_totals() {
    let totals = report(LocationSort::default()).totals;

    assert_eq!(totals.location_count, 3);
    assert_eq!(totals.total_available, 115);
    assert_eq!(totals.total_units_sold, 53);
    assert_eq!(totals.total_inventory_value, Decimal::new(7500, 2));
    assert_eq!(totals.total_sales_value, Decimal::new(55000, 2));

    let expected = 53.0 / 168.0 * 100.0;
    assert!((totals.overall_efficiency_percent - expected).abs() < 1e-9);
}

#[test]
fn test_default_sort_is_sales_value() {
    let names: Vec<String> = report(LocationSort::default())
        .locations
        .into_iter()
        .map(|row| row.location_name)
        .collect();
    assert_eq!(names, ["Airport", "Downtown", "Pop-up"]);
}

#[test]
fn test_totals_do_not_depend_on_row_order() {
    let period = fixture_period();
    let mut rows: Vec<_> = fixture_snapshots()
        .into_iter()
        .map(|mut snapshot| {
            snapshot.orders = period.filter_orders(std::mem::take(&mut snapshot.orders));
            aggregate_location(&snapshot, period.days)
        })
        .collect();

    let forward = rollup(&rows);
    rows.reverse();
    assert_eq!(rollup(&rows), forward);
}

#[test]
fn test_gaps_are_reported_but_not_summed() {
    let mut snapshots = fixture_snapshots();
    let airport = snapshots.remove(1);
    let gaps = vec![LocationGap {
        location_id: airport.location_id,
        location_name: airport.location_name,
        reason: GapReason::FetchFailed {
            message: "HTTP error: connection reset".to_string(),
        },
    }];

    let report = PortfolioReport::build(
        fixture_period(),
        fixture_as_of(),
        snapshots,
        gaps,
        LocationSort::default(),
    );

    assert!(report.is_partial());
    assert_eq!(report.totals.location_count, 2);
    assert_eq!(report.totals.total_sales_value, Decimal::new(15000, 2));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["gaps"][0]["location_name"], "Airport");
    assert_eq!(json["gaps"][0]["reason"]["kind"], "fetch_failed");
}

// ============================================================================
// Location detail
// ============================================================================

#[test]
fn test_location_report_breakdown() {
    let airport = fixture_snapshots().remove(1);
    let report = LocationReport::build(fixture_period(), fixture_as_of(), airport, 10);

    assert_eq!(report.location.location_id, LocationId::new("gid://shopify/Location/2"));
    assert_eq!(report.products.len(), 2);

    // Sales of deleted products stay visible under the placeholder ID
    let unlinked = report
        .products
        .iter()
        .find(|product| product.product_id.as_str() == "unlinked")
        .unwrap();
    assert_eq!(unlinked.units_sold, 25);
    assert_eq!(unlinked.available, 0);

    assert_eq!(report.low_stock.len(), 1);
    assert_eq!(report.low_stock[0].product_id.as_str(), "unlinked");
}
