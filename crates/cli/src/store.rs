//! Reading and writing the snapshot file.

use std::path::Path;

use tracing::{info, instrument};

use spoolhouse_ops::{Snapshot, SnapshotFormat};

/// Load the snapshot at `path`.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, or not a valid
/// snapshot document.
#[instrument(fields(path = %path.display()))]
pub async fn load(path: &Path) -> Result<Snapshot, Box<dyn std::error::Error>> {
    let format = SnapshotFormat::from_path(path)?;

    // Verify file exists
    if !tokio::fs::try_exists(path).await? {
        return Err(format!("Snapshot not found: {}", path.display()).into());
    }

    let content = tokio::fs::read_to_string(path).await?;
    let snapshot = Snapshot::decode(&content, format)?;
    info!(
        orders = snapshot.orders.len(),
        products = snapshot.products.len(),
        filaments = snapshot.filaments.len(),
        "Loaded snapshot"
    );
    Ok(snapshot)
}

/// Write `snapshot` back to `path` in the format its extension names.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
#[instrument(skip(snapshot), fields(path = %path.display()))]
pub async fn save(path: &Path, snapshot: &Snapshot) -> Result<(), Box<dyn std::error::Error>> {
    let format = SnapshotFormat::from_path(path)?;
    let mut content = snapshot.encode(format)?;
    if !content.ends_with('\n') {
        content.push('\n');
    }
    tokio::fs::write(path, content).await?;
    info!("Saved snapshot");
    Ok(())
}
