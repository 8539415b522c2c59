//! Filament stock: per-gram pricing, remaining weight, and roll operations.
//!
//! Rolls are only cost-tracked per whole roll, so the price of one gram is
//! the roll's purchase price divided by its net weight, whatever is left on
//! it.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use spoolhouse_core::{FilamentKey, KEY_SEPARATOR, RollId, RollStatus};

use crate::error::{OpsError, OpsResult};
use crate::models::{FilamentRoll, RollIntake};

/// Cost of one gram of filament class `key`.
///
/// Prefers an `active` roll, then the first matching roll still in stock,
/// then any matching roll so an exhausted class keeps its last known price.
/// Returns zero when nothing matches or the chosen roll has no weight.
#[must_use]
pub fn gram_price(rolls: &[FilamentRoll], key: &FilamentKey) -> Decimal {
    let matching = || rolls.iter().filter(|roll| roll.matches(key));

    matching()
        .find(|roll| roll.status == RollStatus::Active)
        .or_else(|| matching().find(|roll| roll.status.is_available()))
        .or_else(|| matching().next())
        .and_then(price_per_gram)
        .unwrap_or(Decimal::ZERO)
}

fn price_per_gram(roll: &FilamentRoll) -> Option<Decimal> {
    if roll.total_weight <= Decimal::ZERO {
        return None;
    }
    roll.price.checked_div(roll.total_weight)
}

/// Grams of filament class `key` left on rolls that are not archived.
#[must_use]
pub fn remaining_stock(rolls: &[FilamentRoll], key: &FilamentKey) -> Decimal {
    rolls
        .iter()
        .filter(|roll| roll.status.is_available() && roll.matches(key))
        .map(FilamentRoll::remaining_weight)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Remaining grams for every filament class, in one pass.
///
/// Archived rolls are skipped, so a class whose rolls are all `empty` is
/// absent from the map.
#[must_use]
pub fn stock_levels(rolls: &[FilamentRoll]) -> BTreeMap<FilamentKey, Decimal> {
    rolls
        .iter()
        .filter(|roll| roll.status.is_available())
        .fold(BTreeMap::new(), |mut levels, roll| {
            let level = levels.entry(roll.key()).or_insert(Decimal::ZERO);
            *level = level.saturating_add(roll.remaining_weight());
            levels
        })
}

/// Inventory view of one filament class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    /// Filament class.
    pub key: FilamentKey,
    /// Rolls ever recorded for the class, archived included.
    pub roll_count: usize,
    /// Rolls currently `active`.
    pub active_rolls: usize,
    /// Grams left on rolls that are not archived.
    pub remaining_weight: Decimal,
    /// Purchase value of rolls that are not archived.
    pub stock_value: Decimal,
    /// Current per-gram price of the class.
    pub gram_price: Decimal,
}

/// Summarize rolls per filament class, sorted by key.
#[must_use]
pub fn inventory_summary(rolls: &[FilamentRoll]) -> Vec<StockSummary> {
    let mut groups: BTreeMap<FilamentKey, Vec<&FilamentRoll>> = BTreeMap::new();
    for roll in rolls {
        groups.entry(roll.key()).or_default().push(roll);
    }

    groups
        .into_iter()
        .map(|(key, group)| {
            let available = || group.iter().filter(|roll| roll.status.is_available());
            StockSummary {
                roll_count: group.len(),
                active_rolls: group
                    .iter()
                    .filter(|roll| roll.status == RollStatus::Active)
                    .count(),
                remaining_weight: available()
                    .map(|roll| roll.remaining_weight())
                    .fold(Decimal::ZERO, Decimal::saturating_add),
                stock_value: available()
                    .map(|roll| roll.price)
                    .fold(Decimal::ZERO, Decimal::saturating_add),
                gram_price: gram_price(rolls, &key),
                key,
            }
        })
        .collect()
}

/// Create `count` identical rolls from one purchase batch.
///
/// New rolls get fresh IDs, no consumption, and the `in-stock` status.
///
/// # Errors
///
/// Returns `OpsError::InvalidInput` if `count` is zero, the roll weight is
/// not positive, the price is negative, or brand, material or color contain
/// the key separator `|`.
#[instrument(skip(batch), fields(key = %batch.key()))]
pub fn intake(batch: &RollIntake, count: u32) -> OpsResult<Vec<FilamentRoll>> {
    if count == 0 {
        return Err(OpsError::InvalidInput(
            "roll count must be at least 1".to_string(),
        ));
    }
    for (part, value) in [
        ("brand", &batch.brand),
        ("material type", &batch.material_type),
        ("color name", &batch.color_name),
    ] {
        if value.contains(KEY_SEPARATOR) {
            return Err(OpsError::InvalidInput(format!(
                "{part} cannot contain `{KEY_SEPARATOR}`, got {value:?}"
            )));
        }
    }
    if batch.total_weight <= Decimal::ZERO {
        return Err(OpsError::InvalidInput(format!(
            "roll weight must be positive, got {}",
            batch.total_weight
        )));
    }
    if batch.price < Decimal::ZERO {
        return Err(OpsError::InvalidInput(format!(
            "roll price cannot be negative, got {}",
            batch.price
        )));
    }

    let rolls: Vec<FilamentRoll> = (0..count)
        .map(|_| FilamentRoll {
            id: RollId::new(Uuid::new_v4().to_string()),
            brand: batch.brand.clone(),
            material_type: batch.material_type.clone(),
            color_name: batch.color_name.clone(),
            color_code: batch.color_code.clone(),
            total_weight: batch.total_weight,
            used_weight: Decimal::ZERO,
            price: batch.price,
            purchase_date: batch.purchase_date,
            shop: batch.shop.clone(),
            status: RollStatus::InStock,
        })
        .collect();

    info!(count, "Recorded filament intake");
    Ok(rolls)
}

/// Record `grams` of filament used from `roll`.
///
/// Consumption is capped at what is left on the roll; the grams actually
/// applied are returned.
///
/// # Errors
///
/// Returns `OpsError::InvalidInput` if `grams` is not positive or the roll is
/// archived.
#[instrument(skip(roll), fields(roll_id = %roll.id))]
pub fn record_consumption(roll: &mut FilamentRoll, grams: Decimal) -> OpsResult<Decimal> {
    if grams <= Decimal::ZERO {
        return Err(OpsError::InvalidInput(format!(
            "consumed grams must be positive, got {grams}"
        )));
    }
    if roll.status == RollStatus::Empty {
        return Err(OpsError::InvalidInput(format!(
            "roll {} is archived",
            roll.id
        )));
    }

    let applied = grams.min(roll.remaining_weight());
    if applied < grams {
        warn!(
            requested = %grams,
            applied = %applied,
            "Consumption exceeds remaining weight, capping"
        );
    }
    roll.used_weight = roll.used_weight.saturating_add(applied);
    Ok(applied)
}

/// Mark a sealed roll as opened.
///
/// # Errors
///
/// Returns `OpsError::InvalidInput` if the roll is archived.
pub fn open_roll(roll: &mut FilamentRoll) -> OpsResult<()> {
    match roll.status {
        RollStatus::Empty => Err(OpsError::InvalidInput(format!(
            "roll {} is archived",
            roll.id
        ))),
        RollStatus::Active | RollStatus::InStock => {
            roll.status = RollStatus::Active;
            Ok(())
        }
    }
}

/// Archive a roll so it no longer counts toward stock.
///
/// Consumption is left as recorded.
pub fn archive_roll(roll: &mut FilamentRoll) {
    roll.status = RollStatus::Empty;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn roll(id: &str, color: &str, status: RollStatus, total: Decimal, price: Decimal) -> FilamentRoll {
        FilamentRoll {
            id: RollId::new(id),
            brand: "Esun".to_string(),
            material_type: "PLA".to_string(),
            color_name: color.to_string(),
            color_code: String::new(),
            total_weight: total,
            used_weight: Decimal::ZERO,
            price,
            purchase_date: None,
            shop: String::new(),
            status,
        }
    }

    fn red() -> FilamentKey {
        FilamentKey::new("Esun", "PLA", "Red")
    }

    #[test]
    fn test_gram_price_prefers_active_roll() {
        let rolls = vec![
            roll("a", "Red", RollStatus::InStock, dec!(1000), dec!(25)),
            roll("b", "Red", RollStatus::Active, dec!(1000), dec!(20)),
        ];
        assert_eq!(gram_price(&rolls, &red()), dec!(0.02));
    }

    #[test]
    fn test_gram_price_falls_back_to_stocked_roll() {
        let rolls = vec![
            roll("a", "Red", RollStatus::Empty, dec!(1000), dec!(30)),
            roll("b", "Red", RollStatus::InStock, dec!(1000), dec!(25)),
        ];
        assert_eq!(gram_price(&rolls, &red()), dec!(0.025));
    }

    #[test]
    fn test_gram_price_uses_archived_roll_as_last_resort() {
        let rolls = vec![roll("a", "Red", RollStatus::Empty, dec!(500), dec!(15))];
        assert_eq!(gram_price(&rolls, &red()), dec!(0.03));
    }

    #[test]
    fn test_gram_price_zero_without_match_or_weight() {
        let rolls = vec![roll("a", "Blue", RollStatus::Active, dec!(1000), dec!(20))];
        assert_eq!(gram_price(&rolls, &red()), Decimal::ZERO);
        assert_eq!(gram_price(&[], &red()), Decimal::ZERO);

        let weightless = vec![roll("b", "Red", RollStatus::Active, Decimal::ZERO, dec!(20))];
        assert_eq!(gram_price(&weightless, &red()), Decimal::ZERO);
    }

    #[test]
    fn test_remaining_stock_skips_archived_rolls() {
        let mut used = roll("a", "Red", RollStatus::Active, dec!(1000), dec!(20));
        used.used_weight = dec!(400);
        let mut archived = roll("b", "Red", RollStatus::Empty, dec!(1000), dec!(20));
        archived.used_weight = dec!(100);
        let sealed = roll("c", "Red", RollStatus::InStock, dec!(750), dec!(18));

        let rolls = vec![used, archived, sealed];
        assert_eq!(remaining_stock(&rolls, &red()), dec!(1350));
    }

    #[test]
    fn test_stock_levels_group_by_key() {
        let rolls = vec![
            roll("a", "Red", RollStatus::Active, dec!(1000), dec!(20)),
            roll("b", "Red", RollStatus::InStock, dec!(1000), dec!(20)),
            roll("c", "Blue", RollStatus::Empty, dec!(1000), dec!(20)),
        ];
        let levels = stock_levels(&rolls);
        assert_eq!(levels.get(&red()), Some(&dec!(2000)));
        assert!(!levels.contains_key(&FilamentKey::new("Esun", "PLA", "Blue")));
    }

    #[test]
    fn test_inventory_summary() {
        let mut active = roll("a", "Red", RollStatus::Active, dec!(1000), dec!(20));
        active.used_weight = dec!(250);
        let rolls = vec![
            active,
            roll("b", "Red", RollStatus::InStock, dec!(1000), dec!(22)),
            roll("c", "Red", RollStatus::Empty, dec!(1000), dec!(19)),
            roll("d", "Blue", RollStatus::InStock, dec!(500), dec!(12)),
        ];

        let summary = inventory_summary(&rolls);
        assert_eq!(summary.len(), 2);

        let blue = summary.first().unwrap();
        assert_eq!(blue.key.color_name(), "Blue");
        assert_eq!(blue.gram_price, dec!(0.024));

        let red = summary.get(1).unwrap();
        assert_eq!(red.roll_count, 3);
        assert_eq!(red.active_rolls, 1);
        assert_eq!(red.remaining_weight, dec!(1750));
        assert_eq!(red.stock_value, dec!(42));
        assert_eq!(red.gram_price, dec!(0.02));
    }

    #[test]
    fn test_intake_creates_identical_rolls() {
        let batch = RollIntake {
            brand: "Esun".to_string(),
            material_type: "PLA".to_string(),
            color_name: "Red".to_string(),
            color_code: "#ff0000".to_string(),
            total_weight: dec!(1000),
            price: dec!(19.5),
            purchase_date: None,
            shop: "Local".to_string(),
        };

        let rolls = intake(&batch, 3).unwrap();
        assert_eq!(rolls.len(), 3);
        assert!(rolls.iter().all(|r| r.status == RollStatus::InStock));
        assert!(rolls.iter().all(|r| r.used_weight == Decimal::ZERO));
        assert!(rolls.iter().all(|r| r.matches(&red())));

        let first = rolls.first().unwrap();
        let second = rolls.get(1).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_intake_rejects_bad_batches() {
        let mut batch = RollIntake {
            brand: "Esun".to_string(),
            material_type: "PLA".to_string(),
            color_name: "Red".to_string(),
            color_code: String::new(),
            total_weight: dec!(1000),
            price: dec!(19.5),
            purchase_date: None,
            shop: String::new(),
        };
        assert!(matches!(intake(&batch, 0), Err(OpsError::InvalidInput(_))));

        batch.total_weight = Decimal::ZERO;
        assert!(matches!(intake(&batch, 1), Err(OpsError::InvalidInput(_))));
    }

    #[test]
    fn test_intake_rejects_separator_in_key_parts() {
        let mut batch = RollIntake {
            brand: "Esun|Pro".to_string(),
            material_type: "PLA".to_string(),
            color_name: "Red".to_string(),
            color_code: String::new(),
            total_weight: dec!(1000),
            price: dec!(19.5),
            purchase_date: None,
            shop: String::new(),
        };
        assert!(matches!(intake(&batch, 1), Err(OpsError::InvalidInput(_))));

        batch.brand = "Esun".to_string();
        batch.color_name = "Red|Blue".to_string();
        assert!(matches!(intake(&batch, 1), Err(OpsError::InvalidInput(_))));

        batch.color_name = "Red".to_string();
        assert_eq!(intake(&batch, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_consumption_caps_at_remaining_weight() {
        let mut r = roll("a", "Red", RollStatus::Active, dec!(1000), dec!(20));
        assert_eq!(record_consumption(&mut r, dec!(900)).unwrap(), dec!(900));
        assert_eq!(record_consumption(&mut r, dec!(300)).unwrap(), dec!(100));
        assert_eq!(r.used_weight, dec!(1000));
        assert_eq!(r.remaining_weight(), Decimal::ZERO);
        // Still active: emptiness is never derived from weight.
        assert_eq!(r.status, RollStatus::Active);
    }

    #[test]
    fn test_consumption_rejects_invalid_requests() {
        let mut r = roll("a", "Red", RollStatus::Active, dec!(1000), dec!(20));
        assert!(record_consumption(&mut r, Decimal::ZERO).is_err());
        assert!(record_consumption(&mut r, dec!(-5)).is_err());

        archive_roll(&mut r);
        assert!(record_consumption(&mut r, dec!(5)).is_err());
    }

    #[test]
    fn test_open_and_archive() {
        let mut r = roll("a", "Red", RollStatus::InStock, dec!(1000), dec!(20));
        open_roll(&mut r).unwrap();
        assert_eq!(r.status, RollStatus::Active);

        archive_roll(&mut r);
        assert_eq!(r.status, RollStatus::Empty);
        assert!(open_roll(&mut r).is_err());
    }
}
