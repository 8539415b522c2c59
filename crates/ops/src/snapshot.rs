//! Snapshot documents: one consistent read of all four collections.
//!
//! A snapshot is what the hosted store hands out on every change
//! notification, exported as JSON or YAML:
//!
//! ```yaml
//! orders: [...]
//! products: [...]
//! filaments: [...]
//! settings:
//!   kwhPrice: 0.35
//!   printerWattageW: 150
//! ```
//!
//! Unknown fields are ignored and every record decodes leniently.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use spoolhouse_core::{OrderId, ProductId, RollId, lenient};

use crate::catalog::reserve_from_stock;
use crate::error::{OpsError, OpsResult};
use crate::models::{FilamentRoll, Order, Product, Settings};
use crate::stats::{StatisticsSnapshot, aggregate};

/// Errors that can occur when reading or writing snapshot documents.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// JSON decode or encode failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML decode or encode failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File extension does not name a known format.
    #[error("Unsupported snapshot format: {0}")]
    UnsupportedFormat(String),
}

/// Document encoding of a snapshot file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SnapshotFormat {
    #[default]
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Pick the format from a file extension; no extension means JSON.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::UnsupportedFormat` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return Ok(Self::Json);
        };
        match ext.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(SnapshotError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// All records needed for one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "lenient::list")]
    pub orders: Vec<Order>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub products: Vec<Product>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub filaments: Vec<FilamentRoll>,
    /// The settings record, if one has ever been saved.
    #[serde(
        default,
        deserialize_with = "lenient::record",
        skip_serializing_if = "Option::is_none"
    )]
    pub settings: Option<Settings>,
}

impl Snapshot {
    /// Decode a document.
    ///
    /// Ready quantities above the ordered quantity are pulled back into
    /// range.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a well-formed document of the
    /// given format.
    #[instrument(skip(text), fields(bytes = text.len()))]
    pub fn decode(text: &str, format: SnapshotFormat) -> Result<Self, SnapshotError> {
        let mut snapshot: Self = match format {
            SnapshotFormat::Json => serde_json::from_str(text)?,
            SnapshotFormat::Yaml => serde_yaml::from_str(text)?,
        };
        snapshot.normalize();

        debug!(
            orders = snapshot.orders.len(),
            products = snapshot.products.len(),
            filaments = snapshot.filaments.len(),
            has_settings = snapshot.settings.is_some(),
            "Decoded snapshot"
        );
        Ok(snapshot)
    }

    /// Encode as pretty JSON or YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn encode(&self, format: SnapshotFormat) -> Result<String, SnapshotError> {
        Ok(match format {
            SnapshotFormat::Json => serde_json::to_string_pretty(self)?,
            SnapshotFormat::Yaml => serde_yaml::to_string(self)?,
        })
    }

    fn normalize(&mut self) {
        for order in &mut self.orders {
            for item in &mut order.items {
                if item.normalize() {
                    warn!(
                        order_id = %order.id,
                        product_id = %item.product_id,
                        "Clamped ready quantity to ordered quantity"
                    );
                }
            }
        }
    }

    /// Stored settings, or `fallback` when the record is missing.
    #[must_use]
    pub fn settings_or(&self, fallback: Settings) -> Settings {
        self.settings.unwrap_or(fallback)
    }

    /// Aggregate the dashboard statistics for this snapshot.
    #[must_use]
    pub fn statistics(&self, fallback: Settings) -> StatisticsSnapshot {
        aggregate(
            &self.orders,
            &self.products,
            &self.filaments,
            &self.settings_or(fallback),
        )
    }

    /// Look up a product.
    ///
    /// # Errors
    ///
    /// Returns `OpsError::NotFound` if no product has this id.
    pub fn product(&self, id: &ProductId) -> OpsResult<&Product> {
        self.products
            .iter()
            .find(|product| &product.id == id)
            .ok_or_else(|| OpsError::NotFound(format!("product {id}")))
    }

    /// Look up a product for modification.
    ///
    /// # Errors
    ///
    /// Returns `OpsError::NotFound` if no product has this id.
    pub fn product_mut(&mut self, id: &ProductId) -> OpsResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|product| &product.id == id)
            .ok_or_else(|| OpsError::NotFound(format!("product {id}")))
    }

    /// Look up an order for modification.
    ///
    /// # Errors
    ///
    /// Returns `OpsError::NotFound` if no order has this id.
    pub fn order_mut(&mut self, id: &OrderId) -> OpsResult<&mut Order> {
        self.orders
            .iter_mut()
            .find(|order| &order.id == id)
            .ok_or_else(|| OpsError::NotFound(format!("order {id}")))
    }

    /// Look up a filament roll for modification.
    ///
    /// # Errors
    ///
    /// Returns `OpsError::NotFound` if no roll has this id.
    pub fn roll_mut(&mut self, id: &RollId) -> OpsResult<&mut FilamentRoll> {
        self.filaments
            .iter_mut()
            .find(|roll| &roll.id == id)
            .ok_or_else(|| OpsError::NotFound(format!("roll {id}")))
    }

    /// Fill item `index` of order `order_id` from its product's finished
    /// stock. Returns the units moved.
    ///
    /// # Errors
    ///
    /// Returns `OpsError::NotFound` if the order, the item or its product
    /// does not exist.
    pub fn reserve(&mut self, order_id: &OrderId, index: usize) -> OpsResult<u32> {
        let order = self
            .orders
            .iter_mut()
            .find(|order| &order.id == order_id)
            .ok_or_else(|| OpsError::NotFound(format!("order {order_id}")))?;
        let item = order.item_mut(index)?;
        let product = self
            .products
            .iter_mut()
            .find(|product| product.id == item.product_id)
            .ok_or_else(|| OpsError::NotFound(format!("product {}", item.product_id)))?;
        reserve_from_stock(product, item)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use spoolhouse_core::{ItemStatus, RollStatus};

    use super::*;

    const JSON: &str = r#"{
        "orders": [
            {
                "id": "o1",
                "customer": "Ana",
                "orderDate": "2024-03-01",
                "isSpecialChannel": false,
                "items": [
                    {"productId": "p1", "quantity": "2", "readyQuantity": 9, "price": 10, "status": "printing"}
                ]
            }
        ],
        "products": [
            {"id": "p1", "name": "Vase", "filamentRequirements": [{"key": "Esun|PLA|Black", "weight": 75}],
             "printTimeMinutes": 120, "suggestedPrice": 10, "stockQuantity": 3, "status": "active"}
        ],
        "filaments": [
            {"id": "r1", "brand": "Esun", "materialType": "PLA", "colorName": "Black",
             "totalWeight": 1000, "usedWeight": 0, "price": 20, "status": "active", "extra": true}
        ]
    }"#;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            SnapshotFormat::from_path(Path::new("data/snapshot.json")).unwrap(),
            SnapshotFormat::Json
        );
        assert_eq!(
            SnapshotFormat::from_path(Path::new("snapshot.YML")).unwrap(),
            SnapshotFormat::Yaml
        );
        assert_eq!(
            SnapshotFormat::from_path(Path::new("snapshot")).unwrap(),
            SnapshotFormat::Json
        );
        assert!(matches!(
            SnapshotFormat::from_path(Path::new("snapshot.toml")),
            Err(SnapshotError::UnsupportedFormat(ext)) if ext == "toml"
        ));
    }

    #[test]
    fn test_decode_json_normalizes_ready_quantity() {
        let snapshot = Snapshot::decode(JSON, SnapshotFormat::Json).unwrap();
        let item = snapshot.orders.first().unwrap().items.first().unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.ready_quantity, 2);
        assert_eq!(item.status, ItemStatus::Printing);
        assert!(snapshot.settings.is_none());
    }

    #[test]
    fn test_decode_yaml() {
        let yaml = "
orders: []
products: []
filaments:
  - id: r1
    brand: Esun
    materialType: PLA
    colorName: Black
    totalWeight: '1000'
    usedWeight: 250.5
    price: 20
    status: in-stock
settings:
  kwhPrice: 0.5
";
        let snapshot = Snapshot::decode(yaml, SnapshotFormat::Yaml).unwrap();
        let roll = snapshot.filaments.first().unwrap();
        assert_eq!(roll.remaining_weight(), dec!(749.5));
        assert_eq!(roll.status, RollStatus::InStock);

        let settings = snapshot.settings.unwrap();
        assert_eq!(settings.kwh_price, dec!(0.5));
        assert_eq!(settings.printer_wattage_w, dec!(150));
    }

    #[test]
    fn test_missing_collections_are_empty() {
        let snapshot = Snapshot::decode("{}", SnapshotFormat::Json).unwrap();
        assert_eq!(snapshot, Snapshot::default());

        let snapshot = Snapshot::decode(r#"{"orders": "oops"}"#, SnapshotFormat::Json).unwrap();
        assert!(snapshot.orders.is_empty());
    }

    #[test]
    fn test_settings_that_are_not_a_record_are_missing() {
        for settings in [r#""n/a""#, "null", "42", r#"["kwhPrice", 1]"#] {
            let text = format!(r#"{{"settings": {settings}}}"#);
            let snapshot = Snapshot::decode(&text, SnapshotFormat::Json).unwrap();
            assert!(snapshot.settings.is_none(), "settings {settings}");
        }
    }

    #[test]
    fn test_null_entries_in_record_lists_are_dropped() {
        let doc = r#"{
            "orders": [null, {"id": "o", "items": [null, {"productId": "p", "quantity": 2}, "x"]}],
            "products": [{"id": "p", "filamentRequirements": [null, {"key": "Esun|PLA|Black", "weight": 5}]}],
            "filaments": [7, {"id": "r"}]
        }"#;
        let snapshot = Snapshot::decode(doc, SnapshotFormat::Json).unwrap();

        assert_eq!(snapshot.orders.len(), 1);
        let items = &snapshot.orders.first().unwrap().items;
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().unwrap().quantity, 2);
        assert_eq!(
            snapshot.products.first().unwrap().filament_requirements.len(),
            1
        );
        assert_eq!(snapshot.filaments.len(), 1);
    }

    #[test]
    fn test_out_of_range_numbers_aggregate_without_overflow() {
        let doc = r#"{
            "orders": [
                {"id": "a", "items": [{"productId": "p", "quantity": 100, "price": "79228162514264337593543950335", "status": "queued"}]},
                {"id": "b", "items": [{"productId": "p", "quantity": 100, "price": 1e27, "status": "completed"}]}
            ],
            "products": [{"id": "p", "filamentRequirements": [{"key": "Esun|PLA|Black", "weight": 1e27}], "printTimeMinutes": 1e27}],
            "filaments": [{"id": "r", "brand": "Esun", "materialType": "PLA", "colorName": "Black", "totalWeight": 1, "price": 1e27, "status": "active"}]
        }"#;
        let snapshot = Snapshot::decode(doc, SnapshotFormat::Json).unwrap();
        let stats = snapshot.statistics(Settings::default());

        assert_eq!(stats.pending_revenue, Decimal::MAX);
        assert_eq!(stats.revenue, Decimal::MAX);
        assert_eq!(stats.total_needed_weight, Decimal::MAX);
        assert_eq!(stats.completed_order_count, 1);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(matches!(
            Snapshot::decode("{", SnapshotFormat::Json),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn test_encode_then_decode_keeps_records() {
        let snapshot = Snapshot::decode(JSON, SnapshotFormat::Json).unwrap();
        for format in [SnapshotFormat::Json, SnapshotFormat::Yaml] {
            let text = snapshot.encode(format).unwrap();
            assert_eq!(Snapshot::decode(&text, format).unwrap(), snapshot);
        }
    }

    #[test]
    fn test_statistics_uses_fallback_settings() {
        let snapshot = Snapshot::decode(JSON, SnapshotFormat::Json).unwrap();
        let stats = snapshot.statistics(Settings::default());
        assert_eq!(stats.waiting_order_count, 1);
        assert_eq!(stats.revenue, Decimal::ZERO);
        assert_eq!(
            snapshot.settings_or(Settings::default()),
            Settings::default()
        );
    }

    #[test]
    fn test_lookups() {
        let mut snapshot = Snapshot::decode(JSON, SnapshotFormat::Json).unwrap();
        assert_eq!(snapshot.product(&ProductId::new("p1")).unwrap().name, "Vase");
        assert!(snapshot.order_mut(&OrderId::new("o1")).is_ok());
        assert!(snapshot.roll_mut(&RollId::new("r1")).is_ok());
        assert!(matches!(
            snapshot.product_mut(&ProductId::new("nope")),
            Err(OpsError::NotFound(_))
        ));
        assert!(matches!(
            snapshot.roll_mut(&RollId::new("nope")),
            Err(OpsError::NotFound(_))
        ));
    }

    #[test]
    fn test_reserve_through_snapshot() {
        let mut snapshot = Snapshot::decode(JSON, SnapshotFormat::Json).unwrap();
        let order_id = OrderId::new("o1");
        snapshot.order_mut(&order_id).unwrap().item_mut(0).unwrap().ready_quantity = 0;

        assert_eq!(snapshot.reserve(&order_id, 0).unwrap(), 2);
        assert_eq!(snapshot.product(&ProductId::new("p1")).unwrap().stock_quantity, 1);
        let item = snapshot.orders.first().unwrap().items.first().unwrap();
        assert_eq!(item.status, ItemStatus::Ready);

        assert!(matches!(
            snapshot.reserve(&order_id, 5),
            Err(OpsError::NotFound(_))
        ));
    }
}
