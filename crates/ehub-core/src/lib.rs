//! # ehub-core: Pure Domain Logic for eHub IMS
//!
//! Domain types and business rules for the eHub inventory store, with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        eHub IMS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI / CLI (external)                          │   │
//! │  │    Inventory table ──► Stock dialog ──► Sales history          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ehub-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   rules   │  │ validation│                  │   │
//! │  │   │  Product  │  │check_sale │  │   input   │                  │   │
//! │  │   │   Sale    │  │sale_total │  │  checks   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    ehub-db (Inventory Store)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, outcomes)
//! - [`rules`] - Sale rules (status and stock checks)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use ehub_core::{check_sale, sale_total, ProductStatus};
//!
//! assert!(check_sale(ProductStatus::Active, 10, 3).is_ok());
//! assert!(check_sale(ProductStatus::PhasedOut, 10, 3).is_err());
//! assert_eq!(sale_total(199.0, 3), 597.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod rules;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use rules::{check_sale, sale_total};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Text format of `sales.sale_date`.
///
/// Matches the rows written by earlier deployments so that the
/// `ORDER BY sale_date DESC` text ordering stays chronological across both.
pub const SALE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
