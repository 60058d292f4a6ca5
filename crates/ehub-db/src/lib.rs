//! # ehub-db: Inventory Store for eHub IMS
//!
//! SQLite persistence for the product catalog and the sales ledger, using
//! sqlx with a fresh connection per operation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        eHub IMS Data Flow                               │
//! │                                                                         │
//! │  UI action (record a sale)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     ehub-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │InventoryStore │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │  (store.rs)   │    │ ProductRepo   │    │ tables,      │  │   │
//! │  │   │ StoreConfig   │◄───│ SaleRepo      │    │ status col,  │  │   │
//! │  │   │ Connector     │    │               │    │ indexes      │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (ehub.db)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Configuration, connection scoping, store handle
//! - [`migrations`] - Idempotent schema migration
//! - [`error`] - Database error types
//! - [`repository`] - Product and sale repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ehub_core::NewProduct;
//! use ehub_db::{InventoryStore, StoreConfig};
//!
//! let store = InventoryStore::open(StoreConfig::from_env()).await?;
//!
//! let id = store
//!     .products()
//!     .add_product(&NewProduct::new("A2890", "iPhone 15", 5, 799.0))
//!     .await?
//!     .id();
//!
//! let outcome = store.sales().record_sale(id.unwrap_or_default(), 2).await;
//! println!("{outcome}");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod repository;
pub mod store;

#[cfg(test)]
mod test_support;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use store::{InventoryStore, StoreConfig};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
