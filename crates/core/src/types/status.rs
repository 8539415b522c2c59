//! Status enums for records and derived classifications.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a physical filament roll.
///
/// A roll only becomes `Empty` when it is archived; a roll with no weight
/// left may still be `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RollStatus {
    /// Opened and mounted or in current use.
    Active,
    /// Sealed on the shelf.
    #[default]
    InStock,
    /// Archived, no longer counted toward stock.
    Empty,
}

impl RollStatus {
    /// Whether the roll still counts toward remaining stock.
    #[must_use]
    pub const fn is_available(self) -> bool {
        !matches!(self, Self::Empty)
    }
}

impl std::fmt::Display for RollStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::InStock => write!(f, "in-stock"),
            Self::Empty => write!(f, "empty"),
        }
    }
}

impl std::str::FromStr for RollStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "in-stock" => Ok(Self::InStock),
            "empty" => Ok(Self::Empty),
            _ => Err(format!("invalid roll status: {s}")),
        }
    }
}

/// Catalog status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Active,
    Archived,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            _ => Err(format!("invalid product status: {s}")),
        }
    }
}

/// Production status of an order line item.
///
/// Variants are declared in progression order, so `Ord` compares how far
/// along an item is: `Queued < Printing < Ready < Completed`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Waiting for a printer.
    #[default]
    Queued,
    /// Some or all units are on the printer.
    Printing,
    /// Every unit is produced and waiting for pickup.
    Ready,
    /// Handed over to the customer.
    Completed,
}

impl ItemStatus {
    /// All statuses in progression order.
    pub const ALL: [Self; 4] = [Self::Queued, Self::Printing, Self::Ready, Self::Completed];

    /// Whether the item still needs printer time.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Queued | Self::Printing)
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Queued => write!(f, "queued"),
            Self::Printing => write!(f, "printing"),
            Self::Ready => write!(f, "ready"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(Self::Queued),
            "printing" => Ok(Self::Printing),
            "ready" => Ok(Self::Ready),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("invalid item status: {s}")),
        }
    }
}

/// Derived phase of a whole order. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderPhase {
    /// At least one item is still queued or printing.
    Active,
    /// Everything is produced and at least one item awaits pickup.
    Ready,
    /// Every item is handed over.
    Completed,
}

impl std::fmt::Display for OrderPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Ready => write!(f, "ready"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Sales channel partition of the catalog and order book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SalesChannel {
    #[default]
    Regular,
    Special,
}

impl SalesChannel {
    /// Map the stored `isSpecialChannel` flag to a channel.
    #[must_use]
    pub const fn from_flag(is_special: bool) -> Self {
        if is_special { Self::Special } else { Self::Regular }
    }
}

impl std::fmt::Display for SalesChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Regular => write!(f, "regular"),
            Self::Special => write!(f, "special"),
        }
    }
}
