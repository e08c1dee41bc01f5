//! # Seed Data Generator
//!
//! Populates the database with a demo catalogue for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 items (default)
//! cargo run -p stockroom-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p stockroom-db --bin seed -- --count 1000
//!
//! # Specify database path
//! cargo run -p stockroom-db --bin seed -- --db ./data/stockroom.db
//! ```
//!
//! Every row goes through `create_or_merge`, so running the seeder twice
//! doubles amounts instead of duplicating rows.

use std::env;

use stockroom_core::NewItem;
use stockroom_db::{Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_COUNT: usize = 200;
const DEFAULT_DB_PATH: &str = "./stockroom.db";

/// Manufacturers and the parts they make.
const CATALOGUE: &[(&str, &[&str])] = &[
    (
        "Acme Corp",
        &["Bolt", "Nut", "Washer", "Hinge", "Bracket", "Spring", "Anvil"],
    ),
    (
        "Globex",
        &["Gear", "Sprocket", "Chain", "Pulley", "Belt", "Bearing"],
    ),
    (
        "Initech",
        &["Cable", "Connector", "Fuse", "Relay", "Switch", "Socket"],
    ),
    (
        "Umbrella Supplies",
        &["Gasket", "O-Ring", "Valve", "Hose Clamp", "Filter"],
    ),
];

/// Size variants appended to each part name.
const SIZES: &[&str] = &["M3", "M4", "M5", "M6", "M8", "M10", "M12"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut count = DEFAULT_COUNT;
    let mut db_path = String::from(DEFAULT_DB_PATH);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_COUNT);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of items to generate (default: {DEFAULT_COUNT})");
                println!("  -d, --db <PATH>    Database file path (default: {DEFAULT_DB_PATH})");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(argument = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    info!(db = %db_path, count, "Seeding items");

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let items = db.items();

    let existing = items.count().await?;
    if existing > 0 {
        warn!(existing, "Database already has items; amounts will be merged");
    }

    let start = std::time::Instant::now();
    let mut created = 0;
    let mut merged = 0;

    for (n, new_item) in catalogue().take(count).enumerate() {
        match items.create_or_merge(&new_item).await {
            Ok(outcome) if outcome.is_created() => created += 1,
            Ok(_) => merged += 1,
            Err(e) => {
                warn!(name = %new_item.name, error = %e, "Failed to seed item");
                continue;
            }
        }

        if (n + 1) % 100 == 0 {
            info!(done = n + 1, "Seeding progress");
        }
    }

    info!(
        created,
        merged,
        elapsed = ?start.elapsed(),
        total = items.count().await?,
        "Seed complete"
    );

    db.close().await;
    Ok(())
}

/// Walks the catalogue as an endless-enough stream of demo items.
///
/// Amounts are derived from the position so reruns are deterministic.
fn catalogue() -> impl Iterator<Item = NewItem> {
    CATALOGUE
        .iter()
        .flat_map(|(manufacturer, parts)| {
            parts.iter().flat_map(move |part| {
                SIZES
                    .iter()
                    .map(move |size| (format!("{part} {size}"), *manufacturer))
            })
        })
        .enumerate()
        .filter_map(|(n, (name, manufacturer))| {
            let amount = ((n * 37) % 250) as i64;
            NewItem::new(Some(&name), Some(manufacturer), Some(amount)).ok()
        })
}
