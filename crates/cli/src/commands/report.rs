//! Dashboard statistics report.

use spoolhouse_ops::StatisticsSnapshot;

use crate::config::CliConfig;
use crate::store;

/// Print the statistics for the configured snapshot.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or the JSON output
/// cannot be encoded.
#[allow(clippy::print_stdout)]
pub async fn run(config: &CliConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = store::load(&config.snapshot_path).await?;
    let stats = snapshot.statistics(config.fallback_settings);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", render(&stats));
    }
    Ok(())
}

/// Plain-text rendering of the statistics.
fn render(stats: &StatisticsSnapshot) -> String {
    let mut lines = vec![
        format!("Revenue:          {}", stats.revenue.round_dp(2)),
        format!("Profit:           {}", stats.profit.round_dp(2)),
        format!("Pending revenue:  {}", stats.pending_revenue.round_dp(2)),
        format!(
            "Orders:           {} waiting, {} ready, {} completed",
            stats.waiting_order_count, stats.ready_order_count, stats.completed_order_count
        ),
        format!("Filament needed:  {} g", stats.total_needed_weight.round_dp(1)),
        format!("Filament used:    {} g", stats.total_consumed_weight.round_dp(1)),
    ];

    if !stats.product_stats.is_empty() {
        lines.push(String::new());
        lines.push("Top products:".to_string());
        lines.extend(stats.product_stats.iter().map(|p| {
            format!(
                "  {:<24} {:>4} sold  revenue {:>9}  profit {:>9}",
                p.name,
                p.count,
                p.revenue.round_dp(2),
                p.profit.round_dp(2)
            )
        }));
    }

    if !stats.pending_products_breakdown.is_empty() {
        lines.push(String::new());
        lines.push("Still to print:".to_string());
        lines.extend(
            stats
                .pending_products_breakdown
                .iter()
                .map(|p| format!("  {:<24} {:>4}", display_name(&p.name, p.product_id.as_str()), p.count)),
        );
    }

    if !stats.filament_needs.is_empty() {
        lines.push(String::new());
        lines.push("Filament needs:".to_string());
        lines.extend(stats.filament_needs.iter().map(|need| {
            format!(
                "  {:<40} need {:>8} g  have {:>8} g{}",
                need.key.to_string(),
                need.weight.round_dp(1),
                need.in_stock.round_dp(1),
                if need.is_shortage { "  SHORTAGE" } else { "" }
            )
        }));
    }

    if !stats.filament_consumed_breakdown.is_empty() {
        lines.push(String::new());
        lines.push("Filament consumed:".to_string());
        lines.extend(
            stats
                .filament_consumed_breakdown
                .iter()
                .map(|used| format!("  {:<40} {:>8} g", used.key.to_string(), used.weight.round_dp(1))),
        );
    }

    lines.join("\n")
}

/// Products deleted from the catalog have no name; show their id instead.
fn display_name<'a>(name: &'a str, id: &'a str) -> &'a str {
    if name.is_empty() { id } else { name }
}
