//! Catalog product records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use spoolhouse_core::{FilamentKey, ProductId, ProductStatus, SalesChannel, lenient};

/// Grams of one filament class needed to print a single unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilamentRequirement {
    /// Filament class, stored as `brand|materialType|colorName`.
    #[serde(default, deserialize_with = "lenient::filament_key")]
    pub key: FilamentKey,
    /// Grams per unit.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub weight: Decimal,
}

/// A printable product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Document ID.
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: ProductId,
    /// Display name.
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    /// Filament needed per unit.
    #[serde(default, deserialize_with = "lenient::list")]
    pub filament_requirements: Vec<FilamentRequirement>,
    /// Printer time per unit, in minutes.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub print_time_minutes: Decimal,
    /// Selling price per unit.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub suggested_price: Decimal,
    /// Finished units on the shelf.
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub stock_quantity: u32,
    /// Catalog status.
    #[serde(default, deserialize_with = "lenient::status")]
    pub status: ProductStatus,
    /// Whether the product belongs to the special sales channel.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_special_channel: bool,
}

impl Product {
    /// The sales channel this product is listed in.
    #[must_use]
    pub const fn channel(&self) -> SalesChannel {
        SalesChannel::from_flag(self.is_special_channel)
    }

    /// Whether the product is still offered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }
}
