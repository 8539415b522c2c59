//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SPOOLHOUSE_SNAPSHOT` - Snapshot file (default: snapshot.json; `.yaml`/`.yml` selects YAML)
//! - `SPOOLHOUSE_KWH_PRICE` - Electricity price per kWh when the snapshot has no settings (default: 0.35)
//! - `SPOOLHOUSE_PRINTER_WATTAGE` - Printer draw in watts when the snapshot has no settings (default: 150)
//! - `SPOOLHOUSE_LOG_FORMAT` - `text` or `json` (default: text)

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use spoolhouse_ops::models::Settings;

const DEFAULT_SNAPSHOT_PATH: &str = "snapshot.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Snapshot file read and written by commands.
    pub snapshot_path: PathBuf,
    /// Energy settings used when the snapshot has no settings record.
    pub fallback_settings: Settings,
    /// Log output format.
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        let snapshot_path = PathBuf::from(
            lookup("SPOOLHOUSE_SNAPSHOT").unwrap_or_else(|| DEFAULT_SNAPSHOT_PATH.to_string()),
        );
        let kwh_price = parse_optional::<Decimal>("SPOOLHOUSE_KWH_PRICE", &lookup)?
            .unwrap_or(defaults.kwh_price);
        let printer_wattage_w = parse_optional::<Decimal>("SPOOLHOUSE_PRINTER_WATTAGE", &lookup)?
            .unwrap_or(defaults.printer_wattage_w);
        let log_format =
            parse_optional::<LogFormat>("SPOOLHOUSE_LOG_FORMAT", &lookup)?.unwrap_or_default();

        for (key, value) in [
            ("SPOOLHOUSE_KWH_PRICE", kwh_price),
            ("SPOOLHOUSE_PRINTER_WATTAGE", printer_wattage_w),
        ] {
            if value.is_sign_negative() {
                return Err(ConfigError::InvalidEnvVar(
                    key.to_string(),
                    "must not be negative".to_string(),
                ));
            }
        }

        Ok(Self {
            snapshot_path,
            fallback_settings: Settings {
                kwh_price,
                printer_wattage_w,
            },
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional environment variable, treating blank values as unset.
fn parse_optional<T>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}
