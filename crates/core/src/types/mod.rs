//! Core types for Spoolhouse.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod filament_key;
pub mod id;
pub mod status;

pub use filament_key::{FilamentKey, FilamentKeyError, KEY_SEPARATOR};
pub use id::*;
pub use status::*;
