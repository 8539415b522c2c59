//! Structured filament grouping key.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Separator used by the stored `brand|materialType|colorName` form.
pub const KEY_SEPARATOR: char = '|';

/// Errors that can occur when strictly parsing a [`FilamentKey`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FilamentKeyError {
    /// The input did not split into brand, material and color.
    #[error("filament key must have 3 `|`-separated parts, found {found}")]
    WrongPartCount {
        /// Number of parts present.
        found: usize,
    },
    /// One of the parts is blank.
    #[error("filament key part `{part}` cannot be empty")]
    EmptyPart {
        /// Name of the blank part.
        part: &'static str,
    },
}

/// Identifies an interchangeable class of filament rolls.
///
/// Two rolls belong to the same class when brand, material type and color
/// name all match exactly. The `|`-joined string only exists at the storage
/// boundary; in memory the three fields are kept apart.
///
/// ## Examples
///
/// ```
/// use spoolhouse_core::FilamentKey;
///
/// let key: FilamentKey = "Prusament|PETG|Galaxy Black".parse().unwrap();
/// assert_eq!(key.material_type(), "PETG");
/// assert_eq!(key.to_string(), "Prusament|PETG|Galaxy Black");
///
/// assert!("Prusament|PETG".parse::<FilamentKey>().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct FilamentKey {
    brand: String,
    material_type: String,
    color_name: String,
}

impl FilamentKey {
    /// Build a key from its three parts.
    ///
    /// Parts are taken as given. A brand or material containing `|` does not
    /// survive the stored form: it splits differently when read back, so
    /// roll intake rejects such names.
    #[must_use]
    pub fn new(
        brand: impl Into<String>,
        material_type: impl Into<String>,
        color_name: impl Into<String>,
    ) -> Self {
        Self {
            brand: brand.into(),
            material_type: material_type.into(),
            color_name: color_name.into(),
        }
    }

    /// Parse the stored `brand|materialType|colorName` form.
    ///
    /// # Errors
    ///
    /// Returns an error if the input does not have exactly three parts or if
    /// any part is blank.
    pub fn parse(s: &str) -> Result<Self, FilamentKeyError> {
        let parts: Vec<&str> = s.split(KEY_SEPARATOR).collect();
        let [brand, material_type, color_name] = parts.as_slice() else {
            return Err(FilamentKeyError::WrongPartCount { found: parts.len() });
        };

        for (part, value) in [
            ("brand", brand),
            ("materialType", material_type),
            ("colorName", color_name),
        ] {
            if value.trim().is_empty() {
                return Err(FilamentKeyError::EmptyPart { part });
            }
        }

        Ok(Self::new(*brand, *material_type, *color_name))
    }

    /// Manufacturer brand.
    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Material type (PLA, PETG, ...).
    #[must_use]
    pub fn material_type(&self) -> &str {
        &self.material_type
    }

    /// Color name as printed on the roll.
    #[must_use]
    pub fn color_name(&self) -> &str {
        &self.color_name
    }
}

impl fmt::Display for FilamentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{KEY_SEPARATOR}{}{KEY_SEPARATOR}{}",
            self.brand, self.material_type, self.color_name
        )
    }
}

impl std::str::FromStr for FilamentKey {
    type Err = FilamentKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<FilamentKey> for String {
    fn from(key: FilamentKey) -> Self {
        key.to_string()
    }
}

/// Lenient conversion used when reading stored records.
///
/// Missing parts become empty strings so a malformed key simply never
/// matches a roll instead of failing the whole document.
impl From<String> for FilamentKey {
    fn from(s: String) -> Self {
        let mut parts = s.splitn(3, KEY_SEPARATOR);
        let brand = parts.next().unwrap_or_default();
        let material_type = parts.next().unwrap_or_default();
        let color_name = parts.next().unwrap_or_default();
        Self::new(brand, material_type, color_name)
    }
}
