//! # Seed Data Generator
//!
//! Populates a development database with a phone-shop catalog and a few
//! sales.
//!
//! ## Usage
//! ```bash
//! # Generate 100 products (default) into $EHUB_DB_PATH or ./ehub.db
//! cargo run -p ehub-db --bin seed
//!
//! # Custom amount and file
//! cargo run -p ehub-db --bin seed -- --count 120 --db ./data/ehub_dev.db
//! ```
//!
//! ## Generated Products
//! Every brand/model pair is expanded across storage and color variants:
//! - Model number: `{PREFIX}-{MODEL}-{STORAGE}-{COL}`, e.g. `AP-IPHONE15-256GB-BLU`
//! - Category from the model line (Phones, Tablets, Accessories)
//! - Price: base price + storage surcharge
//! - Stock: 0 - 24
//! - Every 17th variant is phased out
//!
//! The catalog yields at most 144 variants; larger `--count` values are capped.

use clap::Parser;
use ehub_core::{NewProduct, ProductStatus};
use ehub_db::{InventoryStore, StoreConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// (brand prefix, model, category, base price)
const CATALOG: &[(&str, &str, &str, f64)] = &[
    ("SM", "Galaxy S23", "Phones", 799.0),
    ("SM", "Galaxy A54", "Phones", 449.0),
    ("SM", "Galaxy Tab S9", "Tablets", 799.0),
    ("AP", "iPhone 15", "Phones", 799.0),
    ("AP", "iPhone 15 Pro", "Phones", 999.0),
    ("AP", "iPad Air", "Tablets", 599.0),
    ("GO", "Pixel 8", "Phones", 699.0),
    ("GO", "Pixel Tablet", "Tablets", 499.0),
    ("XI", "Redmi Note 13", "Phones", 249.0),
    ("OP", "OnePlus 12", "Phones", 799.0),
    ("AN", "Nano II 65W Charger", "Accessories", 49.0),
    ("BE", "USB-C Cable 2m", "Accessories", 19.0),
];

/// (storage, surcharge)
const STORAGE: &[(&str, f64)] = &[("128GB", 0.0), ("256GB", 100.0), ("512GB", 250.0)];

const COLORS: &[&str] = &["Black", "White", "Blue", "Green"];

/// Seed a development inventory database
#[derive(Debug, Parser)]
#[command(name = "seed", about = "eHub IMS seed data generator")]
struct Args {
    /// Database file path (defaults to $EHUB_DB_PATH or ./ehub.db)
    #[arg(short, long)]
    db: Option<String>,

    /// Number of products to generate (capped at the 144 catalog variants)
    #[arg(short, long, default_value_t = 100)]
    count: usize,

    /// Number of sales to record after seeding
    #[arg(short, long, default_value_t = 25)]
    sales: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let mut config = StoreConfig::from_env();
    if let Some(db) = args.db {
        config.database_path = db.into();
    }

    let store = InventoryStore::open(config).await?;
    info!(path = %store.path().display(), "Store ready");

    let existing = store.products().count_products().await?;
    if existing > 0 {
        warn!(existing, "Database already has products; skipping seed");
        return Ok(());
    }

    let available = CATALOG.len() * STORAGE.len() * COLORS.len();
    if args.count > available {
        warn!(requested = args.count, available, "Catalog too small; capping product count");
    }

    let start = std::time::Instant::now();
    let mut product_ids = Vec::with_capacity(args.count.min(available));

    for (seed, product) in variants().take(args.count).enumerate() {
        let outcome = match store.products().add_product(&product).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(model_number = %product.model_number, error = %e, "Failed to insert");
                continue;
            }
        };

        let Some(id) = outcome.id() else {
            warn!(model_number = %product.model_number, "Duplicate model number");
            continue;
        };

        if seed % 17 == 16 {
            store
                .products()
                .toggle_product_status(id, ProductStatus::Active)
                .await?;
        }

        product_ids.push(id);

        if product_ids.len() % 50 == 0 {
            info!(generated = product_ids.len(), "Generating products...");
        }
    }

    info!(
        generated = product_ids.len(),
        elapsed = ?start.elapsed(),
        "Products generated"
    );

    let mut sold = 0;
    for (i, id) in product_ids.iter().cycle().take(args.sales).enumerate() {
        let qty = (i % 3 + 1) as i64;
        let outcome = store.sales().record_sale(*id, qty).await;
        if outcome.is_success() {
            sold += 1;
        } else {
            info!(product_id = id, outcome = %outcome, "Sale skipped");
        }
    }

    let categories = store.products().get_unique_categories().await?;
    info!(sold, categories = ?categories, "Seed complete");

    Ok(())
}

/// Every catalog entry × storage × color, with deterministic stock.
fn variants() -> impl Iterator<Item = NewProduct> {
    let mut seed = 0usize;
    CATALOG.iter().flat_map(move |(prefix, model, category, base_price)| {
        STORAGE.iter().flat_map(move |(storage, surcharge)| {
            COLORS.iter().map(move |color| {
                let model_code: String = model
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .collect::<String>()
                    .to_uppercase();
                let model_number = format!(
                    "{}-{}-{}-{}",
                    prefix,
                    model_code,
                    storage,
                    color[..3].to_uppercase()
                );

                NewProduct::new(model_number, format!("{} {}", model, storage), 0, base_price + surcharge)
                    .category(*category)
                    .color(*color)
                    .storage(*storage)
            })
        })
    })
    .map(move |mut product| {
        product.quantity = ((seed * 7) % 25) as i64;
        seed += 1;
        product
    })
}

/// Initializes the tracing subscriber.
///
/// Defaults to `info,ehub=debug,sqlx=warn`; override with `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ehub=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
