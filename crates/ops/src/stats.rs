//! Dashboard statistics aggregation.
//!
//! [`aggregate`] is a pure fold over one consistent read of orders, products,
//! filament rolls and settings. It never fails: unresolved product references
//! are skipped for cost and filament work, bad numbers have already been
//! coerced to zero when the records were decoded, and absurdly large ones
//! saturate at the decimal range instead of overflowing.
//!
//! Revenue, pending revenue and the order phase counts only cover the
//! regular sales channel. Filament consumption and pending workload cover
//! every order, since special-channel prints draw on the same stock.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use spoolhouse_core::{FilamentKey, ItemStatus, OrderPhase, ProductId, SalesChannel};

use crate::catalog::unit_cost;
use crate::models::{FilamentRoll, Order, OrderItem, Product, Settings};
use crate::stock::stock_levels;

/// Realized sales of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPerformance {
    pub product_id: ProductId,
    pub name: String,
    pub revenue: Decimal,
    pub profit: Decimal,
    /// Units sold.
    pub count: u64,
}

/// Units of one product still to be produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingProduct {
    pub product_id: ProductId,
    pub name: String,
    pub count: u64,
}

/// Projected filament demand for one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilamentNeed {
    pub key: FilamentKey,
    /// Grams needed for pending work.
    pub weight: Decimal,
    /// Grams remaining on non-empty rolls.
    pub in_stock: Decimal,
    /// Whether the need exceeds the stock.
    pub is_shortage: bool,
}

/// Grams of one key used by completed items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilamentConsumption {
    pub key: FilamentKey,
    pub weight: Decimal,
}

/// Everything the dashboard shows, derived from one read of the records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    /// Sales of completed regular orders.
    pub revenue: Decimal,
    /// Revenue minus the production cost of resolvable items.
    pub profit: Decimal,
    /// Value of units not yet produced on open regular items.
    pub pending_revenue: Decimal,
    /// Grams required by all pending work.
    pub total_needed_weight: Decimal,
    /// Grams used by all completed items.
    pub total_consumed_weight: Decimal,
    pub waiting_order_count: usize,
    pub ready_order_count: usize,
    pub completed_order_count: usize,
    /// Sorted by revenue, highest first.
    pub product_stats: Vec<ProductPerformance>,
    /// Sorted by count, highest first.
    pub pending_products_breakdown: Vec<PendingProduct>,
    /// Sorted by weight, highest first.
    pub filament_needs: Vec<FilamentNeed>,
    /// Sorted by weight, highest first.
    pub filament_consumed_breakdown: Vec<FilamentConsumption>,
}

#[derive(Default)]
struct Performance {
    revenue: Decimal,
    profit: Decimal,
    count: u64,
}

/// Accumulators for one aggregation pass.
#[derive(Default)]
struct Tally {
    revenue: Decimal,
    cost: Decimal,
    pending_revenue: Decimal,
    waiting: usize,
    ready: usize,
    completed: usize,
    performance: BTreeMap<ProductId, Performance>,
    pending: BTreeMap<ProductId, u64>,
    needs: BTreeMap<FilamentKey, Decimal>,
    consumed: BTreeMap<FilamentKey, Decimal>,
}

/// Compute the statistics snapshot.
#[must_use]
#[instrument(
    skip_all,
    fields(
        orders = orders.len(),
        products = products.len(),
        rolls = rolls.len()
    )
)]
pub fn aggregate(
    orders: &[Order],
    products: &[Product],
    rolls: &[FilamentRoll],
    settings: &Settings,
) -> StatisticsSnapshot {
    let stock = stock_levels(rolls);
    let catalog = index_products(products);
    let mut tally = Tally::default();

    for order in orders {
        let regular = order.channel() == SalesChannel::Regular;
        let phase = order.phase();

        if regular {
            match phase {
                OrderPhase::Active => tally.waiting += 1,
                OrderPhase::Ready => tally.ready += 1,
                OrderPhase::Completed => tally.completed += 1,
            }
        }

        for item in &order.items {
            let product = catalog.get(&item.product_id).copied();
            if product.is_none() {
                debug!(
                    order_id = %order.id,
                    product_id = %item.product_id,
                    "Order item references unknown product"
                );
            }

            if regular && phase == OrderPhase::Completed {
                tally.realize(item, product, rolls, settings);
            }
            if item.status == ItemStatus::Completed {
                tally.consume(item, product);
            }
            if item.status.is_pending() {
                tally.plan(item, product);
            }
            if regular && item.status != ItemStatus::Completed {
                let open = item.price.saturating_mul(Decimal::from(item.outstanding()));
                tally.pending_revenue = tally.pending_revenue.saturating_add(open);
            }
        }
    }

    tally.finish(&catalog, &stock)
}

fn index_products(products: &[Product]) -> HashMap<&ProductId, &Product> {
    let mut catalog = HashMap::with_capacity(products.len());
    for product in products {
        catalog.entry(&product.id).or_insert(product);
    }
    catalog
}

impl Tally {
    fn realize(
        &mut self,
        item: &OrderItem,
        product: Option<&Product>,
        rolls: &[FilamentRoll],
        settings: &Settings,
    ) {
        let quantity = Decimal::from(item.quantity);
        let revenue = item.price.saturating_mul(quantity);
        self.revenue = self.revenue.saturating_add(revenue);

        let Some(product) = product else {
            return;
        };
        let cost = unit_cost(product, rolls, settings).saturating_mul(quantity);
        self.cost = self.cost.saturating_add(cost);

        let entry = self.performance.entry(product.id.clone()).or_default();
        entry.revenue = entry.revenue.saturating_add(revenue);
        entry.profit = entry.profit.saturating_add(revenue.saturating_sub(cost));
        entry.count = entry.count.saturating_add(u64::from(item.quantity));
    }

    fn consume(&mut self, item: &OrderItem, product: Option<&Product>) {
        let Some(product) = product else {
            return;
        };
        let quantity = Decimal::from(item.quantity);
        for requirement in &product.filament_requirements {
            let used = self.consumed.entry(requirement.key.clone()).or_default();
            *used = used.saturating_add(requirement.weight.saturating_mul(quantity));
        }
    }

    fn plan(&mut self, item: &OrderItem, product: Option<&Product>) {
        let remaining = item.outstanding();
        if remaining == 0 {
            return;
        }
        let count = self.pending.entry(item.product_id.clone()).or_default();
        *count = count.saturating_add(u64::from(remaining));

        let Some(product) = product else {
            return;
        };
        let remaining = Decimal::from(remaining);
        for requirement in &product.filament_requirements {
            let need = self.needs.entry(requirement.key.clone()).or_default();
            *need = need.saturating_add(requirement.weight.saturating_mul(remaining));
        }
    }

    fn finish(
        self,
        catalog: &HashMap<&ProductId, &Product>,
        stock: &BTreeMap<FilamentKey, Decimal>,
    ) -> StatisticsSnapshot {
        let name_of = |id: &ProductId| {
            catalog
                .get(id)
                .map(|product| product.name.clone())
                .unwrap_or_default()
        };

        let mut product_stats: Vec<ProductPerformance> = self
            .performance
            .into_iter()
            .map(|(product_id, perf)| ProductPerformance {
                name: name_of(&product_id),
                product_id,
                revenue: perf.revenue,
                profit: perf.profit,
                count: perf.count,
            })
            .collect();
        product_stats.sort_by(|a, b| b.revenue.cmp(&a.revenue));

        let mut pending_products_breakdown: Vec<PendingProduct> = self
            .pending
            .into_iter()
            .map(|(product_id, count)| PendingProduct {
                name: name_of(&product_id),
                product_id,
                count,
            })
            .collect();
        pending_products_breakdown.sort_by(|a, b| b.count.cmp(&a.count));

        let mut filament_needs: Vec<FilamentNeed> = self
            .needs
            .into_iter()
            .map(|(key, weight)| {
                let in_stock = stock.get(&key).copied().unwrap_or_default();
                FilamentNeed {
                    is_shortage: weight > in_stock,
                    key,
                    weight,
                    in_stock,
                }
            })
            .collect();
        filament_needs.sort_by(|a, b| b.weight.cmp(&a.weight));

        let mut filament_consumed_breakdown: Vec<FilamentConsumption> = self
            .consumed
            .into_iter()
            .map(|(key, weight)| FilamentConsumption { key, weight })
            .collect();
        filament_consumed_breakdown.sort_by(|a, b| b.weight.cmp(&a.weight));

        StatisticsSnapshot {
            revenue: self.revenue,
            profit: self.revenue.saturating_sub(self.cost),
            pending_revenue: self.pending_revenue,
            total_needed_weight: filament_needs
                .iter()
                .map(|need| need.weight)
                .fold(Decimal::ZERO, Decimal::saturating_add),
            total_consumed_weight: filament_consumed_breakdown
                .iter()
                .map(|used| used.weight)
                .fold(Decimal::ZERO, Decimal::saturating_add),
            waiting_order_count: self.waiting,
            ready_order_count: self.ready,
            completed_order_count: self.completed,
            product_stats,
            pending_products_breakdown,
            filament_needs,
            filament_consumed_breakdown,
        }
    }
}
