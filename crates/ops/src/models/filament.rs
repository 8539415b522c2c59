//! Filament roll records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use spoolhouse_core::{FilamentKey, RollId, RollStatus, lenient};

/// A physical spool of print material, tracked individually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilamentRoll {
    /// Document ID.
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: RollId,
    /// Manufacturer brand.
    #[serde(default, deserialize_with = "lenient::string")]
    pub brand: String,
    /// Material type (PLA, PETG, ...).
    #[serde(default, deserialize_with = "lenient::string")]
    pub material_type: String,
    /// Color name as printed on the roll.
    #[serde(default, deserialize_with = "lenient::string")]
    pub color_name: String,
    /// Display color (hex).
    #[serde(default, deserialize_with = "lenient::string")]
    pub color_code: String,
    /// Net filament weight when new, in grams.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub total_weight: Decimal,
    /// Grams consumed so far.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub used_weight: Decimal,
    /// Purchase price of the whole roll.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub price: Decimal,
    /// Date of purchase.
    #[serde(
        default,
        deserialize_with = "lenient::date",
        skip_serializing_if = "Option::is_none"
    )]
    pub purchase_date: Option<NaiveDate>,
    /// Where the roll was bought.
    #[serde(default, deserialize_with = "lenient::string")]
    pub shop: String,
    /// Lifecycle status.
    #[serde(default, deserialize_with = "lenient::status")]
    pub status: RollStatus,
}

impl FilamentRoll {
    /// The grouping key built from brand, material type and color name.
    #[must_use]
    pub fn key(&self) -> FilamentKey {
        FilamentKey::new(&self.brand, &self.material_type, &self.color_name)
    }

    /// Whether this roll belongs to `key`, without allocating a key.
    #[must_use]
    pub fn matches(&self, key: &FilamentKey) -> bool {
        self.brand == key.brand()
            && self.material_type == key.material_type()
            && self.color_name == key.color_name()
    }

    /// Grams left on the roll, never negative.
    #[must_use]
    pub fn remaining_weight(&self) -> Decimal {
        self.total_weight
            .saturating_sub(self.used_weight)
            .max(Decimal::ZERO)
    }
}

/// One purchase batch of identical rolls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollIntake {
    /// Manufacturer brand.
    pub brand: String,
    /// Material type.
    pub material_type: String,
    /// Color name.
    pub color_name: String,
    /// Display color (hex).
    #[serde(default)]
    pub color_code: String,
    /// Net weight of each roll, in grams.
    pub total_weight: Decimal,
    /// Price of each roll.
    pub price: Decimal,
    /// Date of purchase.
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    /// Where the batch was bought.
    #[serde(default)]
    pub shop: String,
}

impl RollIntake {
    /// The grouping key the new rolls will belong to.
    #[must_use]
    pub fn key(&self) -> FilamentKey {
        FilamentKey::new(&self.brand, &self.material_type, &self.color_name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_roll_from_stored_document() {
        let roll: FilamentRoll = serde_json::from_str(
            r##"{
                "id": "r1",
                "brand": "Esun",
                "materialType": "PLA+",
                "colorName": "Black",
                "colorCode": "#000000",
                "totalWeight": "1000",
                "usedWeight": 250.5,
                "price": 19.9,
                "purchaseDate": "2024-02-01",
                "shop": "Amazon",
                "status": "in-stock"
            }"##,
        )
        .unwrap();

        assert_eq!(roll.id.as_str(), "r1");
        assert_eq!(roll.total_weight, dec!(1000));
        assert_eq!(roll.remaining_weight(), dec!(749.5));
        assert_eq!(roll.status, RollStatus::InStock);
        assert_eq!(roll.key(), FilamentKey::new("Esun", "PLA+", "Black"));
    }

    #[test]
    fn test_remaining_weight_never_negative() {
        let roll: FilamentRoll =
            serde_json::from_str(r#"{"totalWeight": 100, "usedWeight": 130}"#).unwrap();
        assert_eq!(roll.remaining_weight(), Decimal::ZERO);
    }

    #[test]
    fn test_matches_compares_all_three_fields() {
        let roll: FilamentRoll = serde_json::from_str(
            r#"{"brand": "Esun", "materialType": "PLA", "colorName": "Red"}"#,
        )
        .unwrap();
        assert!(roll.matches(&FilamentKey::new("Esun", "PLA", "Red")));
        assert!(!roll.matches(&FilamentKey::new("Esun", "PLA", "Blue")));
    }
}
