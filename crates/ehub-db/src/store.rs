//! # Inventory Store
//!
//! Configuration and connection scoping for the SQLite store.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Scoped Connections                                 │
//! │                                                                         │
//! │  App Startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::from_env() ← path, busy timeout, journal mode            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InventoryStore::open(config).await ← migrate schema once              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.products().add_product(..)                                      │
//! │       │                                                                 │
//! │       ├── Connector::open()     → fresh SqliteConnection               │
//! │       ├── run statement(s)      → commit                               │
//! │       └── Connector::release()  → close, on success AND error          │
//! │                                                                         │
//! │  No pool, no connection shared between calls.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Foreign Keys
//! Enforcement stays OFF on every connection. Sales keep pointing at
//! products that have since been deleted, which a `REFERENCES` clause with
//! enforcement on would refuse.

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteJournalMode, SqliteSynchronous};
use sqlx::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::product::ProductRepository;
use crate::repository::sale::SaleRepository;

/// Database file used when nothing else is configured.
pub const DEFAULT_DATABASE_PATH: &str = "ehub.db";

/// Environment variable overriding the database path.
pub const ENV_DB_PATH: &str = "EHUB_DB_PATH";

/// Environment variable overriding the busy timeout, in milliseconds.
pub const ENV_BUSY_TIMEOUT_MS: &str = "EHUB_BUSY_TIMEOUT_MS";

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("/path/to/ehub.db")
///     .busy_timeout(Duration::from_secs(2))
///     .wal(false);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file. Created if missing.
    pub database_path: PathBuf,

    /// How long a statement waits on a locked database before failing.
    /// Default: 5 seconds
    pub busy_timeout: Duration,

    /// Use WAL journaling.
    /// Default: true
    pub wal: bool,

    /// Whether to migrate the schema on open.
    /// Default: true
    pub run_migrations: bool,
}

impl StoreConfig {
    /// Creates a configuration for the given database file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            busy_timeout: Duration::from_secs(5),
            wal: true,
            run_migrations: true,
        }
    }

    /// Sets the busy timeout.
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Enables or disables WAL journaling.
    pub fn wal(mut self, wal: bool) -> Self {
        self.wal = wal;
        self
    }

    /// Sets whether to run migrations on open.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Builds a configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `EHUB_DB_PATH`: database file (default `ehub.db`)
    /// - `EHUB_BUSY_TIMEOUT_MS`: busy timeout in milliseconds
    pub fn from_env() -> Self {
        let path = std::env::var(ENV_DB_PATH).unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string());
        let mut config = StoreConfig::new(path);

        if let Ok(raw) = std::env::var(ENV_BUSY_TIMEOUT_MS) {
            match raw.parse::<u64>() {
                Ok(ms) => config.busy_timeout = Duration::from_millis(ms),
                Err(_) => warn!(value = %raw, "Ignoring unparsable {}", ENV_BUSY_TIMEOUT_MS),
            }
        }

        config
    }

    fn connect_options(&self) -> SqliteConnectOptions {
        let journal_mode = if self.wal {
            SqliteJournalMode::Wal
        } else {
            SqliteJournalMode::Delete
        };

        SqliteConnectOptions::new()
            .filename(&self.database_path)
            .create_if_missing(true)
            .journal_mode(journal_mode)
            // NORMAL is durable enough for a single-user shop database
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(self.busy_timeout)
            // Sales must survive deletion of the product they reference
            .foreign_keys(false)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new(DEFAULT_DATABASE_PATH)
    }
}

// =============================================================================
// Connector
// =============================================================================

/// Opens and releases the per-operation connections.
#[derive(Debug, Clone)]
pub(crate) struct Connector {
    options: SqliteConnectOptions,
}

impl Connector {
    fn new(options: SqliteConnectOptions) -> Self {
        Connector { options }
    }

    /// Opens a fresh connection for one operation.
    pub(crate) async fn open(&self) -> DbResult<SqliteConnection> {
        SqliteConnection::connect_with(&self.options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))
    }

    /// Closes `conn` and hands back the operation's result.
    ///
    /// A close failure only surfaces when the operation itself succeeded;
    /// otherwise the operation's error wins.
    pub(crate) async fn release<T>(&self, conn: SqliteConnection, result: DbResult<T>) -> DbResult<T> {
        if let Err(close_err) = conn.close().await {
            warn!(error = %close_err, "Failed to close connection");
            if result.is_ok() {
                return Err(close_err.into());
            }
        }
        result
    }
}

// =============================================================================
// InventoryStore
// =============================================================================

/// Entry point to the inventory store.
///
/// Holds only configuration; every repository call opens its own
/// connection. Cloning is cheap.
///
/// ## Usage
/// ```rust,ignore
/// let store = InventoryStore::open(StoreConfig::from_env()).await?;
///
/// let outcome = store.products().add_product(&new_product).await?;
/// let sale = store.sales().record_sale(product_id, 2).await;
/// println!("{sale}");
/// ```
#[derive(Debug, Clone)]
pub struct InventoryStore {
    config: StoreConfig,
    connector: Connector,
}

impl InventoryStore {
    /// Opens the store.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Migrates the schema (if enabled): tables, `status` column, indexes
    ///
    /// No connection stays open afterwards.
    pub async fn open(config: StoreConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening inventory store"
        );

        let connector = Connector::new(config.connect_options());
        let store = InventoryStore { config, connector };

        if store.config.run_migrations {
            store.migrate().await?;
        } else {
            debug!("Skipping migrations");
        }

        Ok(store)
    }

    /// Brings the schema up to date. Idempotent.
    pub async fn migrate(&self) -> DbResult<()> {
        let mut conn = self.connector.open().await?;
        let result = migrations::run_migrations(&mut conn).await;
        self.connector.release(conn, result).await?;
        info!("Schema up to date");
        Ok(())
    }

    /// Returns the column names of `table`, in declaration order.
    pub async fn table_columns(&self, table: &str) -> DbResult<Vec<String>> {
        let mut conn = self.connector.open().await?;
        let result = migrations::table_columns(&mut conn, table).await;
        self.connector.release(conn, result).await
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.config.database_path
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.connector.clone())
    }

    /// Returns the sales repository.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.connector.clone())
    }

    /// Checks if the database is usable (can open and run a query).
    pub async fn health_check(&self) -> bool {
        let Ok(mut conn) = self.connector.open().await else {
            return false;
        };
        let result = sqlx::query("SELECT 1")
            .execute(&mut conn)
            .await
            .map_err(DbError::from);
        self.connector.release(conn, result).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
