//! Integration tests for Spoolhouse.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p spoolhouse-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `dashboard_stats` - Aggregation over the shop fixture
//! - `order_lifecycle` - Order and roll updates followed by re-aggregation
//! - `snapshot_ingest` - Lenient decoding of loosely typed documents
//!
//! # Fixtures
//!
//! `fixtures/snapshot.json` is a small shop: three products, four rolls
//! (one archived), and six orders across both sales channels, with a few
//! fields stored as strings, nulls or garbage the way hand-edited forms
//! leave them.

use spoolhouse_ops::{Snapshot, SnapshotError, SnapshotFormat};

/// The shop fixture as stored.
pub const SHOP_SNAPSHOT_JSON: &str = include_str!("../fixtures/snapshot.json");

/// Decode the shop fixture.
///
/// # Errors
///
/// Returns an error if the fixture is not a valid snapshot document.
pub fn shop_snapshot() -> Result<Snapshot, SnapshotError> {
    Snapshot::decode(SHOP_SNAPSHOT_JSON, SnapshotFormat::Json)
}

/// The shop fixture as a loosely typed JSON value, for tests that corrupt
/// individual fields before decoding.
///
/// # Errors
///
/// Returns an error if the fixture is not valid JSON.
pub fn shop_snapshot_value() -> Result<serde_json::Value, serde_json::Error> {
    serde_json::from_str(SHOP_SNAPSHOT_JSON)
}
