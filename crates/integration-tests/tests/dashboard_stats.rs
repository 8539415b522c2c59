//! Dashboard statistics over the shop fixture.
//!
//! Settings in the fixture are 0.40 per kWh and a 200 W printer, so:
//! - Spiral Vase: 120 g Black at 0.02/g + 3 h × 0.2 kW × 0.40 = 2.40 + 0.24 = 2.64
//! - Wall Hook: 10 g White at 0.022/g + 5 g PETG at 0.03/g + 0.04 = 0.41
//!   (the only PETG roll is archived and still prices the key)

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use spoolhouse_core::{FilamentKey, ProductId};
use spoolhouse_integration_tests::shop_snapshot;
use spoolhouse_ops::catalog::unit_cost;
use spoolhouse_ops::models::Settings;
use spoolhouse_ops::stock::{gram_price, remaining_stock};

fn black() -> FilamentKey {
    FilamentKey::new("Esun", "PLA+", "Black")
}

fn white() -> FilamentKey {
    FilamentKey::new("Esun", "PLA+", "White")
}

fn petg() -> FilamentKey {
    FilamentKey::new("Prusament", "PETG", "Galaxy Black")
}

#[test]
fn test_fixture_unit_costs() {
    let snapshot = shop_snapshot().unwrap();
    let settings = snapshot.settings.unwrap();
    assert_eq!(settings.kwh_price, dec!(0.40));

    let vase = snapshot.product(&ProductId::new("p-vase")).unwrap();
    let hook = snapshot.product(&ProductId::new("p-hook")).unwrap();
    assert_eq!(unit_cost(vase, &snapshot.filaments, &settings), dec!(2.64));
    assert_eq!(unit_cost(hook, &snapshot.filaments, &settings), dec!(0.41));
}

#[test]
fn test_gram_price_prefers_active_roll() {
    let snapshot = shop_snapshot().unwrap();
    assert_eq!(gram_price(&snapshot.filaments, &black()), dec!(0.02));
    assert_eq!(gram_price(&snapshot.filaments, &petg()), dec!(0.03));
    assert_eq!(
        gram_price(&snapshot.filaments, &FilamentKey::new("Esun", "PLA+", "Pink")),
        Decimal::ZERO
    );
}

#[test]
fn test_remaining_stock_skips_archived_rolls() {
    let snapshot = shop_snapshot().unwrap();
    assert_eq!(remaining_stock(&snapshot.filaments, &black()), dec!(1400));
    assert_eq!(remaining_stock(&snapshot.filaments, &white()), dec!(50));
    assert_eq!(remaining_stock(&snapshot.filaments, &petg()), Decimal::ZERO);
}

#[test]
fn test_revenue_and_profit() {
    let snapshot = shop_snapshot().unwrap();
    let stats = snapshot.statistics(Settings::default());

    // o-1 (30 + 12) and o-5 (18, product no longer in the catalog).
    assert_eq!(stats.revenue, dec!(60));
    // Cost only for resolvable items: 2 × 2.64 + 3 × 0.41.
    assert_eq!(stats.profit, dec!(60) - dec!(6.51));
    // o-2: 3 vases outstanding at 14; o-6: 20 hooks at 4; ready items add nothing.
    assert_eq!(stats.pending_revenue, dec!(122));
}

#[test]
fn test_order_phase_counts_regular_channel_only() {
    let snapshot = shop_snapshot().unwrap();
    let stats = snapshot.statistics(Settings::default());

    assert_eq!(stats.waiting_order_count, 2);
    assert_eq!(stats.ready_order_count, 1);
    assert_eq!(stats.completed_order_count, 2);
}

#[test]
fn test_product_stats() {
    let snapshot = shop_snapshot().unwrap();
    let stats = snapshot.statistics(Settings::default());

    let rows: Vec<(&str, Decimal, Decimal, u64)> = stats
        .product_stats
        .iter()
        .map(|p| (p.name.as_str(), p.revenue, p.profit, p.count))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Spiral Vase", dec!(30), dec!(24.72), 2),
            ("Wall Hook", dec!(12), dec!(10.77), 3),
        ]
    );
}

#[test]
fn test_consumption_includes_special_channel() {
    let snapshot = shop_snapshot().unwrap();
    let stats = snapshot.statistics(Settings::default());

    let rows: Vec<(FilamentKey, Decimal)> = stats
        .filament_consumed_breakdown
        .iter()
        .map(|c| (c.key.clone(), c.weight))
        .collect();
    // Black: o-1 (240) + o-3 (120) + special o-4 (120).
    assert_eq!(
        rows,
        vec![(black(), dec!(480)), (white(), dec!(30)), (petg(), dec!(15))]
    );
    assert_eq!(stats.total_consumed_weight, dec!(525));
}

#[test]
fn test_pending_workload_and_shortages() {
    let snapshot = shop_snapshot().unwrap();
    let stats = snapshot.statistics(Settings::default());

    let pending: Vec<(&str, u64)> = stats
        .pending_products_breakdown
        .iter()
        .map(|p| (p.product_id.as_str(), p.count))
        .collect();
    assert_eq!(
        pending,
        vec![("p-hook", 20), ("p-keychain", 10), ("p-vase", 3)]
    );

    let needs: Vec<(FilamentKey, Decimal, Decimal, bool)> = stats
        .filament_needs
        .iter()
        .map(|n| (n.key.clone(), n.weight, n.in_stock, n.is_shortage))
        .collect();
    assert_eq!(
        needs,
        vec![
            (black(), dec!(360), dec!(1400), false),
            (white(), dec!(280), dec!(50), true),
            (petg(), dec!(100), Decimal::ZERO, true),
        ]
    );
    assert_eq!(stats.total_needed_weight, dec!(740));
}

#[test]
fn test_missing_settings_fall_back() {
    let mut snapshot = shop_snapshot().unwrap();
    snapshot.settings = None;
    let with_defaults = snapshot.statistics(Settings::default());

    // 3 h × 0.15 kW × 0.35 = 0.1575 energy per vase instead of 0.24.
    let vase = with_defaults
        .product_stats
        .iter()
        .find(|p| p.product_id.as_str() == "p-vase")
        .unwrap();
    assert_eq!(vase.profit, dec!(30) - dec!(2) * (dec!(2.40) + dec!(0.1575)));
}

#[test]
fn test_statistics_serialize_camel_case() {
    let snapshot = shop_snapshot().unwrap();
    let stats = snapshot.statistics(Settings::default());
    let value = serde_json::to_value(&stats).unwrap();

    for field in [
        "revenue",
        "profit",
        "pendingRevenue",
        "totalNeededWeight",
        "totalConsumedWeight",
        "waitingOrderCount",
        "readyOrderCount",
        "completedOrderCount",
        "productStats",
        "pendingProductsBreakdown",
        "filamentNeeds",
        "filamentConsumedBreakdown",
    ] {
        assert!(value.get(field).is_some(), "missing {field}");
    }
    assert_eq!(value["filamentNeeds"][0]["key"], "Esun|PLA+|Black");
    assert_eq!(value["filamentNeeds"][1]["isShortage"], true);
}
