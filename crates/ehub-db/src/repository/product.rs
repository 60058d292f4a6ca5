//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - CRUD (`add_product`, `update_product`, `delete_product`)
//! - Lookups (`fetch_all`, `search_product`, `fetch_by_category`)
//! - Lifecycle (`toggle_product_status`) and stock (`update_stock`)
//!
//! ## Missing IDs
//! Updates, deletes and stock adjustments against an id that doesn't exist
//! succeed and affect nothing. They return the number of rows touched so a
//! caller that cares can check for `0`.
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User types: "s23"                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pattern = "%s23%"   (%, _ and \ in the input are escaped)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  name LIKE pattern OR model_number LIKE pattern                        │
//! │                                                                         │
//! │  SM-S911B | Galaxy S23       ← MATCH (name)                           │
//! │  SM-S918B | Galaxy S23 Ultra ← MATCH (name)                           │
//! │  A2890    | iPhone 15                                                  │
//! │                                                                         │
//! │  LIKE is case-insensitive for ASCII letters.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use ehub_core::validation::{validate_new_product, validate_product_update};
use ehub_core::{AddProductOutcome, NewProduct, Product, ProductStatus, ProductUpdate};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::store::Connector;

/// Column list matching [`Product`]'s `FromRow` layout.
///
/// Rows written by older deployments may hold NULLs in columns the current
/// code always fills; those read back as empty / zero / Active.
const PRODUCT_COLUMNS: &str = r#"
    id,
    COALESCE(model_number, '') AS model_number,
    name,
    category,
    specs,
    color,
    storage,
    COALESCE(quantity, 0) AS quantity,
    COALESCE(price, 0.0) AS price,
    COALESCE(status, 'Active') AS status
"#;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = store.products();
///
/// let outcome = repo.add_product(&NewProduct::new("A2890", "iPhone 15", 5, 799.0)).await?;
/// let matches = repo.search_product("iphone").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    connector: Connector,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub(crate) fn new(connector: Connector) -> Self {
        ProductRepository { connector }
    }

    /// Inserts a new product with status `Active`.
    ///
    /// ## Returns
    /// * `Ok(AddProductOutcome::Added { id })` - Inserted
    /// * `Ok(AddProductOutcome::DuplicateModel)` - Model number taken; nothing written
    /// * `Err(DbError::Validation)` - Blank name
    pub async fn add_product(&self, product: &NewProduct) -> DbResult<AddProductOutcome> {
        validate_new_product(product)?;

        debug!(model_number = %product.model_number, "Adding product");

        let mut conn = self.connector.open().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO products (
                model_number, name, category, specs, color, storage,
                quantity, price, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&product.model_number)
        .bind(&product.name)
        .bind(&product.category)
        .bind(&product.specs)
        .bind(&product.color)
        .bind(&product.storage)
        .bind(product.quantity)
        .bind(product.price)
        .bind(ProductStatus::Active)
        .execute(&mut conn)
        .await
        .map_err(DbError::from);
        let result = self.connector.release(conn, result).await;

        match result {
            Ok(done) => {
                let id = done.last_insert_rowid();
                info!(id, model_number = %product.model_number, "Product added");
                Ok(AddProductOutcome::Added { id })
            }
            Err(err) if err.is_unique_violation() => {
                info!(model_number = %product.model_number, "Model number already exists");
                Ok(AddProductOutcome::DuplicateModel)
            }
            Err(err) => Err(err),
        }
    }

    /// Overwrites every editable field of a product.
    ///
    /// Quantity and status are left alone. Returns rows affected (`0` when
    /// the id doesn't exist).
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - `model_number` belongs to another product
    pub async fn update_product(&self, id: i64, update: &ProductUpdate) -> DbResult<u64> {
        validate_product_update(update)?;

        debug!(id, model_number = %update.model_number, "Updating product");

        let mut conn = self.connector.open().await?;
        let result = sqlx::query(
            r#"
            UPDATE products SET
                model_number = ?2,
                name = ?3,
                category = ?4,
                specs = ?5,
                color = ?6,
                storage = ?7,
                price = ?8
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&update.model_number)
        .bind(&update.name)
        .bind(&update.category)
        .bind(&update.specs)
        .bind(&update.color)
        .bind(&update.storage)
        .bind(update.price)
        .execute(&mut conn)
        .await
        .map(|done| done.rows_affected())
        .map_err(|err| match DbError::from(err) {
            DbError::UniqueViolation { field, .. } => DbError::UniqueViolation {
                field,
                value: update.model_number.clone(),
            },
            other => other,
        });

        self.connector.release(conn, result).await
    }

    /// Deletes a product.
    ///
    /// Sales referencing it are kept; their `product_id` dangles.
    pub async fn delete_product(&self, id: i64) -> DbResult<u64> {
        debug!(id, "Deleting product");

        let mut conn = self.connector.open().await?;
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&mut conn)
            .await
            .map(|done| done.rows_affected())
            .map_err(DbError::from);

        self.connector.release(conn, result).await
    }

    /// Returns every product in insertion order.
    pub async fn fetch_all(&self) -> DbResult<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id");

        let mut conn = self.connector.open().await?;
        let result = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&mut conn)
            .await
            .map_err(DbError::from);

        self.connector.release(conn, result).await
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_product(&self, id: i64) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");

        let mut conn = self.connector.open().await?;
        let result = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&mut conn)
            .await
            .map_err(DbError::from);

        self.connector.release(conn, result).await
    }

    /// Finds products whose name or model number contains `keyword`.
    ///
    /// An empty keyword matches everything.
    pub async fn search_product(&self, keyword: &str) -> DbResult<Vec<Product>> {
        let pattern = format!("%{}%", escape_like(keyword));

        debug!(keyword = %keyword, "Searching products");

        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE name LIKE ?1 ESCAPE '\'
               OR model_number LIKE ?1 ESCAPE '\'
            ORDER BY id
            "#
        );

        let mut conn = self.connector.open().await?;
        let result = sqlx::query_as::<_, Product>(&sql)
            .bind(pattern)
            .fetch_all(&mut conn)
            .await
            .map_err(DbError::from);
        let products = self.connector.release(conn, result).await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Distinct non-empty categories, ascending.
    pub async fn get_unique_categories(&self) -> DbResult<Vec<String>> {
        let mut conn = self.connector.open().await?;
        let result = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT category
            FROM products
            WHERE category IS NOT NULL AND category != ''
            ORDER BY category ASC
            "#,
        )
        .fetch_all(&mut conn)
        .await
        .map_err(DbError::from);

        self.connector.release(conn, result).await
    }

    /// Products whose category equals `category` exactly.
    pub async fn fetch_by_category(&self, category: &str) -> DbResult<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE category = ?1 ORDER BY id");

        let mut conn = self.connector.open().await?;
        let result = sqlx::query_as::<_, Product>(&sql)
            .bind(category)
            .fetch_all(&mut conn)
            .await
            .map_err(DbError::from);

        self.connector.release(conn, result).await
    }

    /// Flips a product between Active and Phased Out.
    ///
    /// The new status is derived from `current_status` as supplied by the
    /// caller; the stored value is not re-read, so two callers toggling from
    /// the same stale view both write the same status.
    pub async fn toggle_product_status(
        &self,
        id: i64,
        current_status: ProductStatus,
    ) -> DbResult<ProductStatus> {
        let new_status = current_status.toggled();

        debug!(id, from = %current_status, to = %new_status, "Toggling status");

        let mut conn = self.connector.open().await?;
        let result = sqlx::query("UPDATE products SET status = ?2 WHERE id = ?1")
            .bind(id)
            .bind(new_status)
            .execute(&mut conn)
            .await
            .map_err(DbError::from);
        self.connector.release(conn, result).await?;

        Ok(new_status)
    }

    /// Adds `delta` (positive or negative) to a product's stock.
    ///
    /// ## Delta Pattern
    /// ```text
    /// UPDATE products SET quantity = quantity + delta
    ///
    /// Applied in one statement, so two adjustments never overwrite each
    /// other. No floor: stock may go below zero.
    /// ```
    pub async fn update_stock(&self, id: i64, delta: i64) -> DbResult<u64> {
        debug!(id, delta, "Updating stock");

        let mut conn = self.connector.open().await?;
        let result = sqlx::query(
            "UPDATE products SET quantity = COALESCE(quantity, 0) + ?2 WHERE id = ?1",
        )
        .bind(id)
        .bind(delta)
        .execute(&mut conn)
        .await
        .map(|done| done.rows_affected())
        .map_err(DbError::from);

        self.connector.release(conn, result).await
    }

    /// Counts products (for diagnostics and the seed tool).
    pub async fn count_products(&self) -> DbResult<i64> {
        let mut conn = self.connector.open().await?;
        let result = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&mut conn)
            .await
            .map_err(DbError::from);

        self.connector.release(conn, result).await
    }
}

/// Escapes LIKE wildcards so `keyword` matches literally (`ESCAPE '\'`).
fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{add, temp_store};

    fn galaxy() -> NewProduct {
        NewProduct::new("SM-S918B", "Galaxy S23 Ultra", 5, 1199.0)
            .category("Phones")
            .specs("6.8\" AMOLED, 12GB RAM")
            .color("Phantom Black")
            .storage("256GB")
    }

    #[tokio::test]
    async fn test_add_product_defaults_to_active() {
        let (_dir, store) = temp_store().await;
        let repo = store.products();

        let outcome = repo.add_product(&galaxy()).await.unwrap();
        let id = outcome.id().unwrap();

        let all = repo.fetch_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].status, ProductStatus::Active);
        assert_eq!(all[0].storage.as_deref(), Some("256GB"));
        assert_eq!(all[0].quantity, 5);

        let found = repo.search_product("S23").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].model_number, "SM-S918B");
    }

    #[tokio::test]
    async fn test_duplicate_model_leaves_existing_row() {
        let (_dir, store) = temp_store().await;
        let repo = store.products();

        repo.add_product(&galaxy()).await.unwrap();

        let clash = NewProduct::new("SM-S918B", "Something Else", 99, 1.0);
        let outcome = repo.add_product(&clash).await.unwrap();
        assert_eq!(outcome, AddProductOutcome::DuplicateModel);

        let all = repo.fetch_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Galaxy S23 Ultra");
        assert_eq!(all[0].quantity, 5);
        assert_eq!(all[0].price, 1199.0);
    }

    #[tokio::test]
    async fn test_add_product_rejects_blank_name() {
        let (_dir, store) = temp_store().await;

        let err = store
            .products()
            .add_product(&NewProduct::new("X1", "  ", 1, 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
        assert_eq!(store.products().count_products().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_product_stores_fields_as_entered() {
        let (_dir, store) = temp_store().await;
        let repo = store.products();
        let long_model = "M".repeat(51);

        let long = repo
            .add_product(&NewProduct::new(long_model.clone(), "Import model", 1, 10.0))
            .await
            .unwrap();
        let credit = repo
            .add_product(&NewProduct::new("RET-CREDIT", "Trade-in credit", 0, -50.0))
            .await
            .unwrap();
        let blank = repo
            .add_product(&NewProduct::new("", "Unlabelled stock", 2, 5.0))
            .await
            .unwrap();

        assert!(long.is_added());
        assert!(credit.is_added());
        assert!(blank.is_added());
        assert_eq!(repo.count_products().await.unwrap(), 3);

        let stored = repo.get_product(long.id().unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.model_number, long_model);
        let stored = repo.get_product(credit.id().unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.price, -50.0);
    }

    #[tokio::test]
    async fn test_update_product_accepts_long_model_and_negative_price() {
        let (_dir, store) = temp_store().await;
        let repo = store.products();
        let id = add(&store, "A2890", "iPhone 15", 3, 799.0).await;

        let mut edit = ProductUpdate::from(&repo.get_product(id).await.unwrap().unwrap());
        edit.model_number = "Z".repeat(80);
        edit.price = -1.5;
        assert_eq!(repo.update_product(id, &edit).await.unwrap(), 1);

        let after = repo.get_product(id).await.unwrap().unwrap();
        assert_eq!(after.model_number.len(), 80);
        assert_eq!(after.price, -1.5);
    }

    #[tokio::test]
    async fn test_update_product_keeps_quantity_and_status() {
        let (_dir, store) = temp_store().await;
        let repo = store.products();
        let id = repo.add_product(&galaxy()).await.unwrap().id().unwrap();
        repo.toggle_product_status(id, ProductStatus::Active)
            .await
            .unwrap();

        let before = repo.get_product(id).await.unwrap().unwrap();
        let mut edit = ProductUpdate::from(&before);
        edit.name = "Galaxy S23 Ultra 5G".to_string();
        edit.price = 1099.0;
        edit.color = None;

        assert_eq!(repo.update_product(id, &edit).await.unwrap(), 1);

        let after = repo.get_product(id).await.unwrap().unwrap();
        assert_eq!(after.name, "Galaxy S23 Ultra 5G");
        assert_eq!(after.price, 1099.0);
        assert_eq!(after.color, None);
        assert_eq!(after.quantity, 5);
        assert_eq!(after.status, ProductStatus::PhasedOut);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_silent() {
        let (_dir, store) = temp_store().await;
        let edit = ProductUpdate::from(&Product {
            id: 0,
            model_number: "GHOST".to_string(),
            name: "Ghost".to_string(),
            category: None,
            specs: None,
            color: None,
            storage: None,
            quantity: 0,
            price: 0.0,
            status: ProductStatus::Active,
        });

        assert_eq!(store.products().update_product(404, &edit).await.unwrap(), 0);
        assert_eq!(store.products().delete_product(404).await.unwrap(), 0);
        assert_eq!(store.products().update_stock(404, 3).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_to_taken_model_number_fails() {
        let (_dir, store) = temp_store().await;
        let repo = store.products();
        add(&store, "A2890", "iPhone 15", 1, 799.0).await;
        let id = add(&store, "A2846", "iPhone 15 Pro", 1, 999.0).await;

        let mut edit = ProductUpdate::from(&repo.get_product(id).await.unwrap().unwrap());
        edit.model_number = "A2890".to_string();

        let err = repo.update_product(id, &edit).await.unwrap_err();
        match err {
            DbError::UniqueViolation { value, .. } => assert_eq!(value, "A2890"),
            other => panic!("expected unique violation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_product() {
        let (_dir, store) = temp_store().await;
        let id = add(&store, "A2890", "iPhone 15", 1, 799.0).await;

        assert_eq!(store.products().delete_product(id).await.unwrap(), 1);
        assert!(store.products().get_product(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_matches_name_or_model() {
        let (_dir, store) = temp_store().await;
        let repo = store.products();
        add(&store, "SM-S911B", "Galaxy S23", 1, 799.0).await;
        add(&store, "A2890", "iPhone 15", 1, 799.0).await;
        add(&store, "GA04432", "Pixel 8", 1, 699.0).await;

        let by_name = repo.search_product("galaxy").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].model_number, "SM-S911B");

        let by_model = repo.search_product("2890").await.unwrap();
        assert_eq!(by_model.len(), 1);
        assert_eq!(by_model[0].name, "iPhone 15");

        assert!(repo.search_product("nokia").await.unwrap().is_empty());
        assert_eq!(repo.search_product("").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let (_dir, store) = temp_store().await;
        let repo = store.products();
        add(&store, "USB_C-20W", "20W Charger", 1, 19.0).await;
        add(&store, "USBAC20W", "Legacy Charger", 1, 9.0).await;
        add(&store, "CASE-1", "100% Recycled Case", 1, 15.0).await;

        let underscore = repo.search_product("USB_C").await.unwrap();
        assert_eq!(underscore.len(), 1);
        assert_eq!(underscore[0].model_number, "USB_C-20W");

        let percent = repo.search_product("100%").await.unwrap();
        assert_eq!(percent.len(), 1);
        assert_eq!(percent[0].model_number, "CASE-1");
    }

    #[tokio::test]
    async fn test_unique_categories_sorted_without_blanks() {
        let (_dir, store) = temp_store().await;
        let repo = store.products();

        for (model, category) in [
            ("P1", Some("Phones")),
            ("C1", Some("Chargers")),
            ("P2", Some("Phones")),
            ("X1", Some("")),
            ("X2", None),
            ("A1", Some("Accessories")),
        ] {
            let mut product = NewProduct::new(model, model, 1, 1.0);
            product.category = category.map(str::to_string);
            repo.add_product(&product).await.unwrap();
        }

        let categories = repo.get_unique_categories().await.unwrap();
        assert_eq!(categories, ["Accessories", "Chargers", "Phones"]);

        let phones = repo.fetch_by_category("Phones").await.unwrap();
        let models: Vec<_> = phones.iter().map(|p| p.model_number.as_str()).collect();
        assert_eq!(models, ["P1", "P2"]);

        assert!(repo.fetch_by_category("phones").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_status_round_trip() {
        let (_dir, store) = temp_store().await;
        let repo = store.products();
        let id = add(&store, "A2890", "iPhone 15", 1, 799.0).await;

        let status = repo
            .toggle_product_status(id, ProductStatus::Active)
            .await
            .unwrap();
        assert_eq!(status, ProductStatus::PhasedOut);
        assert_eq!(
            repo.get_product(id).await.unwrap().unwrap().status,
            ProductStatus::PhasedOut
        );

        let status = repo.toggle_product_status(id, status).await.unwrap();
        assert_eq!(status, ProductStatus::Active);
        assert_eq!(
            repo.get_product(id).await.unwrap().unwrap().status,
            ProductStatus::Active
        );
    }

    #[tokio::test]
    async fn test_update_stock_allows_negative() {
        let (_dir, store) = temp_store().await;
        let repo = store.products();
        let id = add(&store, "A2890", "iPhone 15", 3, 799.0).await;

        repo.update_stock(id, 10).await.unwrap();
        assert_eq!(repo.get_product(id).await.unwrap().unwrap().quantity, 13);

        repo.update_stock(id, -20).await.unwrap();
        assert_eq!(repo.get_product(id).await.unwrap().unwrap().quantity, -7);
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("abc"), "abc");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }
}
