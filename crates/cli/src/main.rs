//! Spoolhouse CLI - Reports and record updates over snapshot files.
//!
//! # Usage
//!
//! ```bash
//! # Dashboard statistics
//! sh-cli report
//! sh-cli report --json
//!
//! # Pricing and costing
//! sh-cli price "Esun|PLA+|Black"
//! sh-cli cost p-vase
//! sh-cli catalog --special
//! sh-cli stock
//!
//! # Order items (items are addressed by position, starting at 0)
//! sh-cli order advance o-1001 0 2
//! sh-cli order set-status o-1001 1 printing
//! sh-cli order ready o-1001
//! sh-cli order complete o-1001
//! sh-cli order reserve o-1001 0
//!
//! # Filament rolls
//! sh-cli roll intake Esun PLA+ Black --weight 1000 --price 21.90 --count 3
//! sh-cli roll consume 6f1c... 42.5
//! sh-cli roll open 6f1c...
//! sh-cli roll archive 6f1c...
//! ```
//!
//! # Commands
//!
//! - `report` - Dashboard statistics
//! - `price`, `cost`, `catalog`, `stock` - Read-only views
//! - `order` - Order item status updates
//! - `roll` - Filament intake and depletion

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spoolhouse_ops::models::RollIntake;

use crate::config::{CliConfig, LogFormat};

mod commands;
mod config;
mod store;

#[derive(Parser)]
#[command(name = "sh-cli")]
#[command(author, version, about = "Spoolhouse print shop operations")]
struct Cli {
    /// Snapshot file (overrides `SPOOLHOUSE_SNAPSHOT`)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print dashboard statistics
    Report {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the per-gram price of a filament (`brand|materialType|colorName`)
    Price { key: String },
    /// Show the cost breakdown of a product
    Cost { product_id: String },
    /// Show the costing table, best margin first
    Catalog {
        /// Use the special sales channel
        #[arg(long)]
        special: bool,
    },
    /// Show remaining filament per class
    Stock,
    /// Update order items
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Manage filament rolls
    Roll {
        #[command(subcommand)]
        action: RollAction,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// Add (or with a negative delta, remove) finished units
    Advance {
        order_id: String,
        item: usize,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Set an item status (`queued`, `printing`, `ready`, `completed`)
    SetStatus {
        order_id: String,
        item: usize,
        status: String,
    },
    /// Mark every item ready for pickup
    Ready { order_id: String },
    /// Mark every item handed over
    Complete { order_id: String },
    /// Fill an item from finished product stock
    Reserve { order_id: String, item: usize },
}

#[derive(Subcommand)]
enum RollAction {
    /// Add rolls from a purchase batch
    Intake {
        brand: String,
        material_type: String,
        color_name: String,

        /// Net filament weight per roll, in grams
        #[arg(short, long)]
        weight: Decimal,

        /// Price per roll
        #[arg(short, long)]
        price: Decimal,

        /// Number of identical rolls
        #[arg(short, long, default_value_t = 1)]
        count: u32,

        /// Display color (hex)
        #[arg(long, default_value = "")]
        color_code: String,

        /// Purchase date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Where the batch was bought
        #[arg(long, default_value = "")]
        shop: String,
    },
    /// Record grams used from a roll
    Consume { roll_id: String, grams: Decimal },
    /// Mark a sealed roll as opened
    Open { roll_id: String },
    /// Archive a roll
    Archive { roll_id: String },
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "spoolhouse_cli=info,spoolhouse_ops=info".into());

    let json = format == LogFormat::Json;
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::Text);
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    if let Some(path) = cli.snapshot.clone() {
        config.snapshot_path = path;
    }

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Report { json } => commands::report::run(config, json).await?,
        Commands::Price { key } => commands::catalog::price(config, &key).await?,
        Commands::Cost { product_id } => commands::catalog::cost(config, &product_id).await?,
        Commands::Catalog { special } => commands::catalog::table(config, special).await?,
        Commands::Stock => commands::catalog::stock(config).await?,
        Commands::Order { action } => match action {
            OrderAction::Advance {
                order_id,
                item,
                delta,
            } => commands::order::advance(config, &order_id, item, delta).await?,
            OrderAction::SetStatus {
                order_id,
                item,
                status,
            } => commands::order::set_status(config, &order_id, item, &status).await?,
            OrderAction::Ready { order_id } => commands::order::ready(config, &order_id).await?,
            OrderAction::Complete { order_id } => {
                commands::order::complete(config, &order_id).await?;
            }
            OrderAction::Reserve { order_id, item } => {
                commands::order::reserve(config, &order_id, item).await?;
            }
        },
        Commands::Roll { action } => match action {
            RollAction::Intake {
                brand,
                material_type,
                color_name,
                weight,
                price,
                count,
                color_code,
                date,
                shop,
            } => {
                let batch = RollIntake {
                    brand,
                    material_type,
                    color_name,
                    color_code,
                    total_weight: weight,
                    price,
                    purchase_date: date,
                    shop,
                };
                commands::roll::intake(config, &batch, count).await?;
            }
            RollAction::Consume { roll_id, grams } => {
                commands::roll::consume(config, &roll_id, grams).await?;
            }
            RollAction::Open { roll_id } => commands::roll::open(config, &roll_id).await?,
            RollAction::Archive { roll_id } => commands::roll::archive(config, &roll_id).await?,
        },
    }
    Ok(())
}
