//! Global energy pricing settings.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use spoolhouse_core::lenient;

/// Price of one kWh when no settings record exists (0.35).
pub const DEFAULT_KWH_PRICE: Decimal = Decimal::from_parts(35, 0, 0, false, 2);

/// Printer power draw in watts when no settings record exists (150).
pub const DEFAULT_PRINTER_WATTAGE_W: Decimal = Decimal::from_parts(150, 0, 0, false, 0);

/// Singleton settings record used for energy cost.
///
/// Missing or non-numeric fields fall back to the defaults rather than zero,
/// so a half-filled settings form never makes printing look free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Electricity price per kWh.
    #[serde(default = "default_kwh_price", deserialize_with = "kwh_price")]
    pub kwh_price: Decimal,
    /// Average printer power draw in watts.
    #[serde(
        default = "default_printer_wattage",
        deserialize_with = "printer_wattage"
    )]
    pub printer_wattage_w: Decimal,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            kwh_price: DEFAULT_KWH_PRICE,
            printer_wattage_w: DEFAULT_PRINTER_WATTAGE_W,
        }
    }
}

const fn default_kwh_price() -> Decimal {
    DEFAULT_KWH_PRICE
}

const fn default_printer_wattage() -> Decimal {
    DEFAULT_PRINTER_WATTAGE_W
}

fn kwh_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    Ok(lenient::optional_decimal(deserializer)?.unwrap_or(DEFAULT_KWH_PRICE))
}

fn printer_wattage<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    Ok(lenient::optional_decimal(deserializer)?.unwrap_or(DEFAULT_PRINTER_WATTAGE_W))
}
