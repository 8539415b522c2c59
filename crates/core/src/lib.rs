//! Spoolhouse Core - Shared types library.
//!
//! This crate provides common types used across all Spoolhouse components:
//! - `ops` - Stock, catalog and order operations plus dashboard aggregation
//! - `cli` - Command-line driver over snapshot files
//!
//! # Architecture
//!
//! The core crate contains only types and serde helpers - no I/O, no store
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, statuses, and the structured filament key
//! - [`lenient`] - Coercing field deserializers for loosely typed documents

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod lenient;
pub mod types;

pub use types::*;
