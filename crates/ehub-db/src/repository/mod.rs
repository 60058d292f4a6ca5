//! # Repository Module
//!
//! Database repository implementations for the inventory store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI / CLI                                                              │
//! │       │                                                                 │
//! │       │  store.products().search_product("s23")                        │
//! │       ▼                                                                 │
//! │  ProductRepository                 SaleRepository                      │
//! │  ├── add_product                   ├── record_sale                     │
//! │  ├── update_product                └── fetch_sales_history             │
//! │  ├── delete_product                                                    │
//! │  ├── fetch_all / search_product / fetch_by_category                    │
//! │  ├── get_unique_categories                                             │
//! │  ├── toggle_product_status                                             │
//! │  └── update_stock                                                      │
//! │       │                                                                 │
//! │       │  one connection per call                                       │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Catalog, status and stock
//! - [`SaleRepository`](sale::SaleRepository) - Sales ledger

pub mod product;
pub mod sale;
