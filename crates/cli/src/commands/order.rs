//! Order item status updates.
//!
//! Each command loads the snapshot, applies one transition, and saves it.

use spoolhouse_core::{ItemStatus, OrderId, OrderPhase};
use spoolhouse_ops::Snapshot;
use tracing::info;

use crate::config::CliConfig;
use crate::store;

/// Add `delta` finished units to item `index` of an order.
///
/// # Errors
///
/// Returns an error if the order or item does not exist, or the snapshot
/// cannot be loaded or saved.
pub async fn advance(
    config: &CliConfig,
    order_id: &str,
    index: usize,
    delta: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    update(config, order_id, |snapshot, id| {
        let item = snapshot.order_mut(id)?.item_mut(index)?;
        item.advance_partial(delta);
        info!(
            order_id = %id,
            index,
            ready_quantity = item.ready_quantity,
            quantity = item.quantity,
            status = %item.status,
            "Advanced order item"
        );
        Ok(())
    })
    .await
}

/// Set the status of item `index` of an order.
///
/// # Errors
///
/// Returns an error if `status` is not a known item status, the order or
/// item does not exist, or the snapshot cannot be loaded or saved.
pub async fn set_status(
    config: &CliConfig,
    order_id: &str,
    index: usize,
    status: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let status: ItemStatus = status.parse()?;
    update(config, order_id, |snapshot, id| {
        snapshot.order_mut(id)?.item_mut(index)?.set_status(status);
        info!(order_id = %id, index, %status, "Set order item status");
        Ok(())
    })
    .await
}

/// Mark every item of an order ready for pickup.
///
/// # Errors
///
/// Returns an error if the order does not exist, or the snapshot cannot be
/// loaded or saved.
pub async fn ready(config: &CliConfig, order_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    update(config, order_id, |snapshot, id| {
        let order = snapshot.order_mut(id)?;
        order.mark_all_ready();
        log_phase(id, order.phase());
        Ok(())
    })
    .await
}

/// Mark every item of an order handed over.
///
/// # Errors
///
/// Returns an error if the order does not exist, or the snapshot cannot be
/// loaded or saved.
pub async fn complete(
    config: &CliConfig,
    order_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    update(config, order_id, |snapshot, id| {
        let order = snapshot.order_mut(id)?;
        order.mark_all_completed();
        log_phase(id, order.phase());
        Ok(())
    })
    .await
}

/// Fill item `index` of an order from finished stock.
///
/// # Errors
///
/// Returns an error if the order, item or product does not exist, or the
/// snapshot cannot be loaded or saved.
pub async fn reserve(
    config: &CliConfig,
    order_id: &str,
    index: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    update(config, order_id, |snapshot, id| {
        let units = snapshot.reserve(id, index)?;
        info!(order_id = %id, index, units, "Reserved finished stock for order item");
        Ok(())
    })
    .await
}

fn log_phase(id: &OrderId, phase: OrderPhase) {
    info!(order_id = %id, %phase, "Updated order");
}

/// Load, apply `change` to the order `order_id`, save.
async fn update<F>(
    config: &CliConfig,
    order_id: &str,
    change: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(&mut Snapshot, &OrderId) -> spoolhouse_ops::OpsResult<()>,
{
    let mut snapshot = store::load(&config.snapshot_path).await?;
    change(&mut snapshot, &OrderId::new(order_id))?;
    store::save(&config.snapshot_path, &snapshot).await
}
