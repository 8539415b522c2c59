//! Record types as stored in the document collections.
//!
//! Every field deserializes leniently (see [`spoolhouse_core::lenient`]):
//! a snapshot written by hand-edited forms never fails to load because one
//! number was typed as text.

pub mod filament;
pub mod order;
pub mod product;
pub mod settings;

pub use filament::{FilamentRoll, RollIntake};
pub use order::{Order, OrderItem};
pub use product::{FilamentRequirement, Product};
pub use settings::Settings;
