//! Spoolhouse Ops - Stock, catalog and order operations.
//!
//! Everything here works on records the caller already holds in memory.
//! Nothing in this crate reads from or writes to the hosted store; callers
//! load a [`snapshot::Snapshot`], run operations, and persist what changed.
//!
//! # Modules
//!
//! - [`models`] - Record types for rolls, products, orders and settings
//! - [`stock`] - Per-gram pricing, remaining weight, roll intake and depletion
//! - [`catalog`] - Unit cost, margins and finished-goods stock
//! - [`lifecycle`] - Order item status transitions and the order phase
//! - [`stats`] - Dashboard statistics aggregation
//! - [`snapshot`] - JSON/YAML snapshot documents
//!
//! # Example
//!
//! ```
//! use spoolhouse_ops::snapshot::{Snapshot, SnapshotFormat};
//! use spoolhouse_ops::models::Settings;
//!
//! let snapshot = Snapshot::decode(r#"{"orders": [], "products": []}"#, SnapshotFormat::Json)?;
//! let stats = snapshot.statistics(Settings::default());
//! assert_eq!(stats.completed_order_count, 0);
//! # Ok::<(), spoolhouse_ops::snapshot::SnapshotError>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod snapshot;
pub mod stats;
pub mod stock;

pub use error::{OpsError, OpsResult};
pub use snapshot::{Snapshot, SnapshotError, SnapshotFormat};
pub use stats::{StatisticsSnapshot, aggregate};
