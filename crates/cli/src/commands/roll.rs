//! Filament roll intake and depletion.

use rust_decimal::Decimal;
use tracing::info;

use spoolhouse_core::RollId;
use spoolhouse_ops::models::RollIntake;
use spoolhouse_ops::stock::{archive_roll, intake as intake_batch, open_roll, record_consumption};

use crate::config::CliConfig;
use crate::store;

/// Add `count` rolls from one purchase batch.
///
/// # Errors
///
/// Returns an error if the batch is invalid, or the snapshot cannot be
/// loaded or saved.
pub async fn intake(
    config: &CliConfig,
    batch: &RollIntake,
    count: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut snapshot = store::load(&config.snapshot_path).await?;
    let rolls = intake_batch(batch, count)?;
    for roll in &rolls {
        info!(roll_id = %roll.id, key = %roll.key(), "Added roll");
    }
    snapshot.filaments.extend(rolls);
    store::save(&config.snapshot_path, &snapshot).await
}

/// Record `grams` used from a roll.
///
/// # Errors
///
/// Returns an error if the roll does not exist or is archived, `grams` is
/// not positive, or the snapshot cannot be loaded or saved.
pub async fn consume(
    config: &CliConfig,
    roll_id: &str,
    grams: Decimal,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut snapshot = store::load(&config.snapshot_path).await?;
    let roll = snapshot.roll_mut(&RollId::new(roll_id))?;
    let applied = record_consumption(roll, grams)?;
    info!(
        roll_id,
        applied = %applied,
        remaining = %roll.remaining_weight(),
        "Recorded consumption"
    );
    store::save(&config.snapshot_path, &snapshot).await
}

/// Mark a roll as opened.
///
/// # Errors
///
/// Returns an error if the roll does not exist or is archived, or the
/// snapshot cannot be loaded or saved.
pub async fn open(config: &CliConfig, roll_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut snapshot = store::load(&config.snapshot_path).await?;
    open_roll(snapshot.roll_mut(&RollId::new(roll_id))?)?;
    info!(roll_id, "Opened roll");
    store::save(&config.snapshot_path, &snapshot).await
}

/// Archive a roll.
///
/// # Errors
///
/// Returns an error if the roll does not exist, or the snapshot cannot be
/// loaded or saved.
pub async fn archive(config: &CliConfig, roll_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut snapshot = store::load(&config.snapshot_path).await?;
    archive_roll(snapshot.roll_mut(&RollId::new(roll_id))?);
    info!(roll_id, "Archived roll");
    store::save(&config.snapshot_path, &snapshot).await
}
