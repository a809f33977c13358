//! # Seed Data Generator
//!
//! Populates the store with demo categories and products for development.
//!
//! ## Usage
//! ```bash
//! cargo run -p caja-store --bin seed
//! cargo run -p caja-store --bin seed -- --db ./data/caja.db
//! ```

use std::env;

use tracing_subscriber::EnvFilter;

use caja_core::{Money, NewProduct};
use caja_store::{Store, StoreConfig};

/// Demo catalog: (category, products as (name, sku, price in pesos, stock)).
const CATALOG: &[(&str, &[(&str, &str, i64, i64)])] = &[
    (
        "Bebidas",
        &[
            ("Gaseosa 350ml", "GASE-350", 2_500, 48),
            ("Gaseosa 1.5L", "GASE-1500", 5_800, 24),
            ("Agua sin gas 600ml", "AGUA-600", 1_800, 60),
            ("Jugo de caja 200ml", "JUGO-200", 1_500, 36),
            ("Cerveza nacional 330ml", "CERV-330", 3_200, 30),
        ],
    ),
    (
        "Snacks",
        &[
            ("Papas fritas 40g", "PAPA-40", 2_000, 50),
            ("Galletas saladas", "GALL-SAL", 2_800, 40),
            ("Chocolatina", "CHOC-01", 1_200, 80),
            ("Mani salado 50g", "MANI-50", 1_700, 25),
        ],
    ),
    (
        "Lacteos",
        &[
            ("Leche entera 1L", "LECH-1000", 4_200, 20),
            ("Yogur de fresa 180g", "YOGU-180", 2_600, 15),
            ("Queso campesino 250g", "QUES-250", 7_500, 8),
        ],
    ),
    (
        "Panaderia",
        &[
            ("Pan tajado", "PANT-500", 5_400, 12),
            ("Pan aliñado unidad", "PANA-001", 800, 40),
            ("Almojabana", "ALMO-001", 1_500, 18),
        ],
    ),
    (
        "Aseo",
        &[
            ("Jabon de barra", "JABO-001", 3_100, 22),
            ("Detergente 500g", "DETE-500", 6_900, 10),
            ("Papel higienico x4", "PAPH-004", 8_200, 14),
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./caja_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Caja POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./caja_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Caja POS seed data generator");
    println!("Database: {}", db_path);
    println!();

    let store = Store::connect(StoreConfig::new(&db_path)).await?;
    println!("Connected, migrations applied");

    let existing = store.products().count().await?;
    if existing > 0 {
        println!("Database already has {} products; skipping seed.", existing);
        println!("Delete the database file to regenerate.");
        return Ok(());
    }

    let mut product_count = 0;
    for (category_name, products) in CATALOG {
        let category = store.categories().insert(category_name).await?;

        for (name, sku, price, stock) in products.iter() {
            store
                .products()
                .insert(NewProduct {
                    sku: Some((*sku).to_string()),
                    name: (*name).to_string(),
                    price: Money::from_units(*price),
                    stock: *stock,
                    category_id: Some(category.id.clone()),
                })
                .await?;
            product_count += 1;
        }
    }

    println!(
        "Seeded {} categories, {} products",
        CATALOG.len(),
        product_count
    );

    Ok(())
}
