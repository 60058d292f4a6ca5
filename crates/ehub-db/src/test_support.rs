//! Shared fixtures for the in-crate tests.
//!
//! Each test gets its own database file: with a connection per operation an
//! in-memory database would vanish between calls.

use ehub_core::NewProduct;
use tempfile::TempDir;

use crate::store::{InventoryStore, StoreConfig};

/// Opens a migrated store in a fresh temporary directory.
///
/// Keep the returned `TempDir` alive for the duration of the test.
pub(crate) async fn temp_store() -> (TempDir, InventoryStore) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = InventoryStore::open(StoreConfig::new(dir.path().join("ehub.db")))
        .await
        .expect("open store");
    (dir, store)
}

/// Adds a product with only the required fields and returns its id.
pub(crate) async fn add(store: &InventoryStore, model: &str, name: &str, qty: i64, price: f64) -> i64 {
    store
        .products()
        .add_product(&NewProduct::new(model, name, qty, price))
        .await
        .expect("add product")
        .id()
        .expect("model number is unique")
}
