//! Product unit cost, margins, and finished-goods stock.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, instrument};

use spoolhouse_core::{ProductId, SalesChannel};

use crate::error::{OpsError, OpsResult};
use crate::models::{FilamentRoll, OrderItem, Product, Settings};
use crate::stock::gram_price;

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);
const WATTS_PER_KILOWATT: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Filament cost of one unit.
///
/// Requirements whose filament class has no roll on record cost nothing.
#[must_use]
pub fn material_cost(product: &Product, rolls: &[FilamentRoll]) -> Decimal {
    product
        .filament_requirements
        .iter()
        .map(|requirement| {
            requirement
                .weight
                .saturating_mul(gram_price(rolls, &requirement.key))
        })
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Electricity cost of one unit: hours × kW × price per kWh.
#[must_use]
pub fn energy_cost(product: &Product, settings: &Settings) -> Decimal {
    let hours = product.print_time_minutes / MINUTES_PER_HOUR;
    let kilowatts = settings.printer_wattage_w / WATTS_PER_KILOWATT;
    hours.saturating_mul(kilowatts).saturating_mul(settings.kwh_price)
}

/// Material plus energy cost of one unit.
#[must_use]
pub fn unit_cost(product: &Product, rolls: &[FilamentRoll], settings: &Settings) -> Decimal {
    material_cost(product, rolls).saturating_add(energy_cost(product, settings))
}

/// Suggested price minus unit cost.
#[must_use]
pub fn margin(product: &Product, rolls: &[FilamentRoll], settings: &Settings) -> Decimal {
    product
        .suggested_price
        .saturating_sub(unit_cost(product, rolls, settings))
}

/// Cost breakdown of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCosting {
    pub product_id: ProductId,
    pub name: String,
    pub material_cost: Decimal,
    pub energy_cost: Decimal,
    pub unit_cost: Decimal,
    pub suggested_price: Decimal,
    pub margin: Decimal,
}

impl ProductCosting {
    /// Compute the breakdown for `product`.
    #[must_use]
    pub fn of(product: &Product, rolls: &[FilamentRoll], settings: &Settings) -> Self {
        let material_cost = material_cost(product, rolls);
        let energy_cost = energy_cost(product, settings);
        let unit_cost = material_cost.saturating_add(energy_cost);
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            material_cost,
            energy_cost,
            unit_cost,
            suggested_price: product.suggested_price,
            margin: product.suggested_price.saturating_sub(unit_cost),
        }
    }
}

/// Costing of every active product in `channel`, best margin first.
#[must_use]
pub fn costing_table(
    products: &[Product],
    rolls: &[FilamentRoll],
    settings: &Settings,
    channel: SalesChannel,
) -> Vec<ProductCosting> {
    let mut table: Vec<ProductCosting> = products
        .iter()
        .filter(|product| product.is_active() && product.channel() == channel)
        .map(|product| ProductCosting::of(product, rolls, settings))
        .collect();
    table.sort_by(|a, b| b.margin.cmp(&a.margin));
    table
}

/// Change the finished stock of `product` by `delta` units, never below zero.
pub fn adjust_stock(product: &mut Product, delta: i64) {
    let next = i64::from(product.stock_quantity).saturating_add(delta);
    product.stock_quantity = u32::try_from(next.max(0)).unwrap_or(u32::MAX);
}

/// Fill an order item from finished stock of its product.
///
/// Moves as many units as are both on the shelf and still outstanding on the
/// item, then advances the item accordingly. Returns the units moved.
///
/// # Errors
///
/// Returns `OpsError::InvalidInput` if `item` is for a different product.
#[instrument(skip_all, fields(product_id = %product.id))]
pub fn reserve_from_stock(product: &mut Product, item: &mut OrderItem) -> OpsResult<u32> {
    if item.product_id != product.id {
        return Err(OpsError::InvalidInput(format!(
            "item is for product {}, not {}",
            item.product_id, product.id
        )));
    }

    let units = product.stock_quantity.min(item.outstanding());
    if units == 0 {
        debug!("Nothing to reserve");
        return Ok(0);
    }

    product.stock_quantity -= units;
    item.advance_partial(i64::from(units));
    debug!(units, "Reserved finished stock");
    Ok(units)
}
