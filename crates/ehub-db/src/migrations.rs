//! # Schema Migration
//!
//! Brings any existing eHub database up to the current schema.
//!
//! ## How Migration Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Migration Process                                  │
//! │                                                                         │
//! │  InventoryStore::open                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                 │
//! │       ├── CREATE TABLE IF NOT EXISTS products                          │
//! │       ├── pragma_table_info('products') has `status`?                  │
//! │       │       ├── yes → nothing to do                                  │
//! │       │       └── no  → ALTER TABLE products ADD COLUMN status ...     │
//! │       ├── CREATE TABLE IF NOT EXISTS sales                             │
//! │       └── CREATE INDEX IF NOT EXISTS ...                               │
//! │  COMMIT                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every step is guarded by `IF NOT EXISTS` or an explicit schema check, so
//! running it against an up-to-date database changes nothing.
//!
//! ## Adding New Columns
//! Add a [`ColumnMigration`] to [`COLUMN_MIGRATIONS`]. Never edit the
//! `CREATE TABLE` text of a column that older databases already lack;
//! they only ever see the `ALTER`.

use sqlx::sqlite::SqliteConnection;
use sqlx::Connection;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

const CREATE_PRODUCTS: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        model_number TEXT UNIQUE,
        name TEXT NOT NULL,
        category TEXT,
        specs TEXT,
        color TEXT,
        storage TEXT,
        quantity INTEGER,
        price REAL,
        status TEXT DEFAULT 'Active'
    )
"#;

const CREATE_SALES: &str = r#"
    CREATE TABLE IF NOT EXISTS sales (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        product_id INTEGER,
        product_name TEXT,
        quantity_sold INTEGER,
        total_price REAL,
        sale_date TIMESTAMP,
        FOREIGN KEY(product_id) REFERENCES products(id)
    )
"#;

const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_products_model_number ON products(model_number)",
    "CREATE INDEX IF NOT EXISTS idx_products_name ON products(name)",
    "CREATE INDEX IF NOT EXISTS idx_sales_sale_date ON sales(sale_date)",
];

/// A column added after the table first shipped.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMigration {
    pub table: &'static str,
    pub column: &'static str,
    /// Full `ALTER TABLE` statement adding the column.
    pub ddl: &'static str,
}

/// Columns older databases may be missing, in the order they were introduced.
pub const COLUMN_MIGRATIONS: &[ColumnMigration] = &[ColumnMigration {
    table: "products",
    column: "status",
    ddl: "ALTER TABLE products ADD COLUMN status TEXT DEFAULT 'Active'",
}];

/// Runs the whole migration in one transaction.
pub async fn run_migrations(conn: &mut SqliteConnection) -> DbResult<()> {
    info!("Checking schema");

    migrate(conn)
        .await
        .map_err(|e| DbError::MigrationFailed(e.to_string()))
}

async fn migrate(conn: &mut SqliteConnection) -> DbResult<()> {
    let mut tx = conn.begin().await?;

    sqlx::query(CREATE_PRODUCTS).execute(&mut *tx).await?;

    for migration in COLUMN_MIGRATIONS {
        if column_exists(&mut *tx, migration.table, migration.column).await? {
            debug!(table = migration.table, column = migration.column, "Column present");
            continue;
        }
        sqlx::query(migration.ddl).execute(&mut *tx).await?;
        info!(table = migration.table, column = migration.column, "Added column");
    }

    sqlx::query(CREATE_SALES).execute(&mut *tx).await?;

    for ddl in CREATE_INDEXES {
        sqlx::query(ddl).execute(&mut *tx).await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Returns the column names of `table`, in declaration order.
///
/// Empty when the table doesn't exist.
pub async fn table_columns(conn: &mut SqliteConnection, table: &str) -> DbResult<Vec<String>> {
    let columns: Vec<String> =
        sqlx::query_scalar("SELECT name FROM pragma_table_info(?1) ORDER BY cid")
            .bind(table)
            .fetch_all(&mut *conn)
            .await?;

    Ok(columns)
}

/// Checks whether `table` has a column named `column`.
pub async fn column_exists(conn: &mut SqliteConnection, table: &str, column: &str) -> DbResult<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2")
            .bind(table)
            .bind(column)
            .fetch_one(&mut *conn)
            .await?;

    Ok(count > 0)
}
