//! Read-only pricing, costing and inventory views.

#![allow(clippy::print_stdout)]

use spoolhouse_core::{FilamentKey, ProductId, SalesChannel};
use spoolhouse_ops::catalog::{ProductCosting, costing_table};
use spoolhouse_ops::stock::{gram_price, inventory_summary, remaining_stock};

use crate::config::CliConfig;
use crate::store;

/// Print the per-gram price and remaining stock of one filament class.
///
/// # Errors
///
/// Returns an error if `key` is not `brand|materialType|colorName` or the
/// snapshot cannot be loaded.
pub async fn price(config: &CliConfig, key: &str) -> Result<(), Box<dyn std::error::Error>> {
    let key = FilamentKey::parse(key)?;
    let snapshot = store::load(&config.snapshot_path).await?;

    println!(
        "{key}: {} per g, {} g in stock",
        gram_price(&snapshot.filaments, &key).round_dp(4),
        remaining_stock(&snapshot.filaments, &key).round_dp(1)
    );
    Ok(())
}

/// Print the cost breakdown of one product.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or has no such product.
pub async fn cost(config: &CliConfig, product_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = store::load(&config.snapshot_path).await?;
    let product = snapshot.product(&ProductId::new(product_id))?;
    let costing = ProductCosting::of(
        product,
        &snapshot.filaments,
        &snapshot.settings_or(config.fallback_settings),
    );

    println!("{} ({})", costing.name, costing.product_id);
    println!("  material   {}", costing.material_cost.round_dp(2));
    println!("  energy     {}", costing.energy_cost.round_dp(2));
    println!("  unit cost  {}", costing.unit_cost.round_dp(2));
    println!("  price      {}", costing.suggested_price.round_dp(2));
    println!("  margin     {}", costing.margin.round_dp(2));
    Ok(())
}

/// Print the costing table for one sales channel.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded.
pub async fn table(config: &CliConfig, special: bool) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = store::load(&config.snapshot_path).await?;
    let rows = costing_table(
        &snapshot.products,
        &snapshot.filaments,
        &snapshot.settings_or(config.fallback_settings),
        SalesChannel::from_flag(special),
    );

    println!(
        "{:<24} {:>9} {:>9} {:>9} {:>9}",
        "PRODUCT", "COST", "PRICE", "MARGIN", "ID"
    );
    for row in rows {
        println!(
            "{:<24} {:>9} {:>9} {:>9} {:>9}",
            row.name,
            row.unit_cost.round_dp(2),
            row.suggested_price.round_dp(2),
            row.margin.round_dp(2),
            row.product_id
        );
    }
    Ok(())
}

/// Print the inventory summary.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded.
pub async fn stock(config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = store::load(&config.snapshot_path).await?;

    println!(
        "{:<40} {:>5} {:>6} {:>10} {:>9} {:>8}",
        "FILAMENT", "ROLLS", "ACTIVE", "REMAINING", "VALUE", "PER G"
    );
    for row in inventory_summary(&snapshot.filaments) {
        println!(
            "{:<40} {:>5} {:>6} {:>10} {:>9} {:>8}",
            row.key.to_string(),
            row.roll_count,
            row.active_rolls,
            row.remaining_weight.round_dp(1),
            row.stock_value.round_dp(2),
            row.gram_price.round_dp(4)
        );
    }
    Ok(())
}
