//! # Seed Data Generator
//!
//! Fills the current month's workbook with demo items for development.
//!
//! ## Usage
//! ```bash
//! # Seed 30 items (default) into ./data
//! cargo run -p tally-sheet --bin seed
//!
//! # Custom amount and directory
//! cargo run -p tally-sheet --bin seed -- --count 60 --dir ./demo
//! ```
//!
//! Every upsert rewrites the whole workbook, so keep counts modest.
//!
//! Each item has:
//! - Barcode `880{seed:010}` (Korean EAN prefix, checksum not valid)
//! - Name `{product} {size}`
//! - Sale price 1,000 - 9,990, original price 60-80% of it
//! - Stock 0 - 50

use std::env;

use tally_core::{ItemForm, Money};
use tally_sheet::{SheetConfig, UpsertOutcome, Workbook};

/// Product groups for realistic demo data
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Beverages",
        &[
            "Banana Milk",
            "Strawberry Milk",
            "Barley Tea",
            "Corn Silk Tea",
            "Cider",
            "Cola",
            "Sparkling Water",
            "Iced Coffee",
        ],
    ),
    (
        "Snacks",
        &[
            "Shrimp Crackers",
            "Honey Butter Chips",
            "Choco Pie",
            "Pepero",
            "Seaweed Snack",
            "Rice Crackers",
        ],
    ),
    (
        "Groceries",
        &[
            "Instant Ramen",
            "Cup Ramen",
            "Kimchi",
            "Tofu",
            "Eggs",
            "White Rice",
            "Soy Sauce",
            "Gochujang",
        ],
    ),
];

/// Size suffixes and their price addon (in cents)
const SIZES: &[(&str, i64)] = &[("Small", 0), ("Large", 50_000)];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 30;
    let mut dir = String::from("data");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(30);
                    i += 1;
                }
            }
            "--dir" | "-d" => {
                if i + 1 < args.len() {
                    dir = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Tally POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of items to write (default: 30)");
                println!("  -d, --dir <PATH>   Workbook directory (default: data)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let workbook = Workbook::open(SheetConfig::new(&dir))?;
    let store = workbook.catalog();

    println!("🌱 Tally POS Seed Data Generator");
    println!("================================");
    println!("Workbook: {}", workbook.path().display());
    println!("Items:    {}", count);
    println!();

    let mut inserted = 0;
    let mut updated = 0;
    let start = std::time::Instant::now();

    let items = CATEGORIES
        .iter()
        .flat_map(|(_, products)| products.iter())
        .flat_map(|product| SIZES.iter().map(move |size| (product, size)))
        .take(count);

    for (seed, (product, (size, addon))) in items.enumerate() {
        let form = generate_item(product, size, *addon, seed);

        match store.upsert(&form) {
            Ok(UpsertOutcome::Inserted { .. }) => inserted += 1,
            Ok(UpsertOutcome::Updated { .. }) => updated += 1,
            Err(e) => {
                eprintln!("Failed to write {}: {}", form.item_name, e);
                continue;
            }
        }

        if (inserted + updated) % 10 == 0 {
            println!("  Written {} items...", inserted + updated);
        }
    }

    println!();
    println!(
        "✓ {} inserted, {} updated in {:?}",
        inserted,
        updated,
        start.elapsed()
    );

    Ok(())
}

/// Builds one demo item form.
fn generate_item(product: &str, size: &str, price_addon: i64, seed: usize) -> ItemForm {
    let barcode = format!("880{:010}", seed);

    // 1,000.00 - 9,990.00 in steps of 10
    let sale = Money::from_cents(100_000 + ((seed as i64 * 37) % 900) * 1_000 + price_addon);

    // Cost is 60-80% of the sale price
    let cost_pct = 60 + (seed % 20) as i64;
    let original = Money::from_cents(sale.cents() * cost_pct / 100);

    let stock = (seed * 7) % 51;

    ItemForm::new(
        barcode,
        format!("{} {}", product, size),
        original.to_string(),
        sale.to_string(),
        stock.to_string(),
    )
}
