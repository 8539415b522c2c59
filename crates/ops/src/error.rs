//! Unified error handling for record operations.

use thiserror::Error;

use crate::snapshot::SnapshotError;

/// Error type for operations that mutate or look up records.
///
/// Aggregation never fails; only explicit commands against a single record
/// (advance an item, consume from a roll, reserve stock) can be rejected.
#[derive(Debug, Error)]
pub enum OpsError {
    /// Snapshot could not be decoded or encoded.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Referenced record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation arguments are invalid for the record's current state.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience alias for results of record operations.
pub type OpsResult<T> = Result<T, OpsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ops_error_display() {
        let err = OpsError::NotFound("order o-123".to_string());
        assert_eq!(err.to_string(), "Not found: order o-123");

        let err = OpsError::InvalidInput("grams must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid input: grams must be positive");
    }

    #[test]
    fn test_snapshot_error_converts() {
        let err: OpsError = SnapshotError::UnsupportedFormat("toml".to_string()).into();
        assert!(matches!(err, OpsError::Snapshot(_)));
        assert!(err.to_string().contains("toml"));
    }
}
