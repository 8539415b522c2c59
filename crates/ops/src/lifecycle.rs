//! Order item status transitions and the derived order phase.
//!
//! Items progress `queued → printing → ready → completed`. The progression is
//! the intended direction, not a guard: any status can be set directly, and a
//! move backwards is logged rather than refused.
//!
//! Reaching `ready` or `completed` means every unit exists, so both force
//! `ready_quantity` up to `quantity`.

use tracing::warn;

use spoolhouse_core::{ItemStatus, OrderPhase};

use crate::error::{OpsError, OpsResult};
use crate::models::{Order, OrderItem};

impl OrderItem {
    /// Units still to be produced.
    #[must_use]
    pub const fn outstanding(&self) -> u32 {
        self.quantity.saturating_sub(self.ready_quantity)
    }

    /// Record `delta` more (or, if negative, fewer) finished units.
    ///
    /// The ready count is clamped to `0..=quantity`. A fully produced item
    /// becomes `ready`, a partially produced one `printing`; at zero the
    /// status is left alone.
    pub fn advance_partial(&mut self, delta: i64) {
        let next = i64::from(self.ready_quantity)
            .saturating_add(delta)
            .clamp(0, i64::from(self.quantity));
        self.ready_quantity = u32::try_from(next).unwrap_or(self.quantity);

        if self.ready_quantity == self.quantity {
            self.status = ItemStatus::Ready;
        } else if self.ready_quantity > 0 {
            self.status = ItemStatus::Printing;
        }
    }

    /// Set the status directly.
    pub fn set_status(&mut self, status: ItemStatus) {
        if status < self.status {
            warn!(
                product_id = %self.product_id,
                from = %self.status,
                to = %status,
                "Moving order item backwards"
            );
        }

        self.status = status;
        if matches!(status, ItemStatus::Ready | ItemStatus::Completed) {
            self.ready_quantity = self.quantity;
        }
    }

    /// Bring `ready_quantity` back into `0..=quantity`.
    ///
    /// Returns `true` if the stored value was out of range.
    pub fn normalize(&mut self) -> bool {
        if self.ready_quantity > self.quantity {
            self.ready_quantity = self.quantity;
            return true;
        }
        false
    }
}

impl Order {
    /// Classify the order from its items.
    ///
    /// Completed when every item is completed; ready when every item is
    /// ready or completed but not all completed; otherwise active.
    ///
    /// An order without items is active, although "every item is completed"
    /// holds vacuously for it.
    #[must_use]
    pub fn phase(&self) -> OrderPhase {
        if self.items.is_empty() {
            return OrderPhase::Active;
        }
        if self
            .items
            .iter()
            .all(|item| item.status == ItemStatus::Completed)
        {
            OrderPhase::Completed
        } else if self.items.iter().all(|item| item.status >= ItemStatus::Ready) {
            OrderPhase::Ready
        } else {
            OrderPhase::Active
        }
    }

    /// Mark every item as produced and waiting for pickup.
    pub fn mark_all_ready(&mut self) {
        for item in &mut self.items {
            item.set_status(ItemStatus::Ready);
        }
    }

    /// Mark every item as handed over.
    pub fn mark_all_completed(&mut self) {
        for item in &mut self.items {
            item.set_status(ItemStatus::Completed);
        }
    }

    /// Line item at `index`.
    ///
    /// # Errors
    ///
    /// Returns `OpsError::NotFound` if the order has no such item.
    pub fn item_mut(&mut self, index: usize) -> OpsResult<&mut OrderItem> {
        let count = self.items.len();
        self.items.get_mut(index).ok_or_else(|| {
            OpsError::NotFound(format!(
                "item {index} of order {} ({count} items)",
                self.id
            ))
        })
    }

    /// Units still to be produced across all items.
    #[must_use]
    pub fn outstanding(&self) -> u32 {
        self.items
            .iter()
            .map(OrderItem::outstanding)
            .fold(0, u32::saturating_add)
    }
}
