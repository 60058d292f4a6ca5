//! # Domain Types
//!
//! Core domain types used throughout the eHub inventory store.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │  ProductStatus  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  Active         │       │
//! │  │  model_number   │   │  product_id     │   │  Phased Out     │       │
//! │  │  name           │   │  product_name   │   └─────────────────┘       │
//! │  │  quantity       │   │  total_price    │                              │
//! │  │  price, status  │   │  sale_date      │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  Inputs:   NewProduct, ProductUpdate                                   │
//! │  Outcomes: AddProductOutcome, SaleOutcome                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! - `id`: surrogate integer key assigned by SQLite, used by sales
//! - `model_number`: human-readable business key, unique, editable

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Product Status
// =============================================================================

/// Lifecycle status of a product.
///
/// Stored as the literal text `Active` / `Phased Out`, which is also what
/// rows written by earlier deployments contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum ProductStatus {
    /// Product can be sold.
    #[default]
    Active,
    /// Product is kept for history but can no longer be sold.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Phased Out"))]
    #[serde(rename = "Phased Out")]
    PhasedOut,
}

impl ProductStatus {
    /// The stored text form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "Active",
            ProductStatus::PhasedOut => "Phased Out",
        }
    }

    /// Returns the opposite status.
    pub const fn toggled(self) -> Self {
        match self {
            ProductStatus::Active => ProductStatus::PhasedOut,
            ProductStatus::PhasedOut => ProductStatus::Active,
        }
    }

    /// Whether products in this status may be sold.
    #[inline]
    pub const fn is_sellable(&self) -> bool {
        matches!(self, ProductStatus::Active)
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog item with stock, price and lifecycle status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Surrogate key.
    pub id: i64,

    /// Manufacturer model number - business identifier, unique.
    pub model_number: String,

    /// Display name.
    pub name: String,

    /// Free-form category ("Phones", "Chargers", ...).
    pub category: Option<String>,

    /// Free-text specification sheet.
    pub specs: Option<String>,

    pub color: Option<String>,

    /// Storage variant, e.g. "128GB".
    pub storage: Option<String>,

    /// Units on hand. Can go negative through manual stock adjustments.
    pub quantity: i64,

    /// Unit price.
    pub price: f64,

    pub status: ProductStatus,
}

// =============================================================================
// Product Inputs
// =============================================================================

/// Fields for creating a product.
///
/// ## Example
/// ```rust
/// use ehub_core::NewProduct;
///
/// let phone = NewProduct::new("SM-S918B", "Galaxy S23 Ultra", 5, 1199.0)
///     .category("Phones")
///     .color("Phantom Black")
///     .storage("256GB");
///
/// assert_eq!(phone.category.as_deref(), Some("Phones"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub model_number: String,
    pub name: String,
    pub category: Option<String>,
    pub specs: Option<String>,
    pub color: Option<String>,
    pub storage: Option<String>,
    /// Initial units on hand.
    pub quantity: i64,
    pub price: f64,
}

impl NewProduct {
    /// Creates a product with the required fields; optional ones start empty.
    pub fn new(
        model_number: impl Into<String>,
        name: impl Into<String>,
        quantity: i64,
        price: f64,
    ) -> Self {
        NewProduct {
            model_number: model_number.into(),
            name: name.into(),
            category: None,
            specs: None,
            color: None,
            storage: None,
            quantity,
            price,
        }
    }

    /// Sets the category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the specification text.
    pub fn specs(mut self, specs: impl Into<String>) -> Self {
        self.specs = Some(specs.into());
        self
    }

    /// Sets the color.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the storage variant.
    pub fn storage(mut self, storage: impl Into<String>) -> Self {
        self.storage = Some(storage.into());
        self
    }
}

/// Editable product fields. Quantity and status have dedicated operations
/// and are deliberately absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductUpdate {
    pub model_number: String,
    pub name: String,
    pub category: Option<String>,
    pub specs: Option<String>,
    pub color: Option<String>,
    pub storage: Option<String>,
    pub price: f64,
}

impl From<&Product> for ProductUpdate {
    /// Starts an edit from the product's current values.
    fn from(product: &Product) -> Self {
        ProductUpdate {
            model_number: product.model_number.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            specs: product.specs.clone(),
            color: product.color.clone(),
            storage: product.storage.clone(),
            price: product.price,
        }
    }
}

/// Result of inserting a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum AddProductOutcome {
    /// Row inserted with the given id.
    Added { id: i64 },
    /// Another product already uses this model number; nothing was written.
    DuplicateModel,
}

impl AddProductOutcome {
    /// `true` when the product was inserted.
    #[inline]
    pub fn is_added(&self) -> bool {
        matches!(self, AddProductOutcome::Added { .. })
    }

    /// The new product id, if inserted.
    pub fn id(&self) -> Option<i64> {
        match self {
            AddProductOutcome::Added { id } => Some(*id),
            AddProductOutcome::DuplicateModel => None,
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A row of the append-only sales ledger.
/// Uses snapshot pattern to freeze the product name and price at time of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Sale {
    pub id: i64,
    /// Weak reference; the product may have been deleted since.
    pub product_id: i64,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    pub quantity_sold: i64,
    /// Unit price × quantity at time of sale.
    pub total_price: f64,
    /// Local wall-clock time of the sale.
    #[ts(as = "String")]
    pub sale_date: NaiveDateTime,
}

/// Outcome of a sale attempt.
///
/// Business-rule rejections and storage failures are values, not errors:
/// the caller shows the [`Display`](fmt::Display) text to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum SaleOutcome {
    /// Stock was decremented and the sale recorded.
    Sold {
        sale_id: i64,
        quantity_sold: i64,
        total_price: f64,
    },
    ProductNotFound,
    /// Phased-out products cannot be sold.
    PhasedOut,
    /// Requested more than is on hand.
    InsufficientStock { remaining: i64 },
    /// Requested a zero or negative quantity.
    InvalidQuantity { requested: i64 },
    /// The store failed while recording the sale.
    DatabaseError { message: String },
}

impl SaleOutcome {
    /// `true` only for [`SaleOutcome::Sold`].
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, SaleOutcome::Sold { .. })
    }
}

impl fmt::Display for SaleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaleOutcome::Sold { quantity_sold, .. } => {
                write!(f, "Success! Sold {} units.", quantity_sold)
            }
            SaleOutcome::ProductNotFound => f.write_str("Error: Product not found"),
            SaleOutcome::PhasedOut => f.write_str("Error: Cannot sell a Phased Out product!"),
            SaleOutcome::InsufficientStock { remaining } => {
                write!(f, "Error: Not enough stock! Only {} left.", remaining)
            }
            SaleOutcome::InvalidQuantity { requested } => {
                write!(f, "Error: Quantity must be positive (got {}).", requested)
            }
            SaleOutcome::DatabaseError { message } => write!(f, "Database Error: {}", message),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_toggle_round_trip() {
        let status = ProductStatus::Active;
        assert_eq!(status.toggled(), ProductStatus::PhasedOut);
        assert_eq!(status.toggled().toggled(), ProductStatus::Active);
    }

    #[test]
    fn test_status_default_and_text() {
        assert_eq!(ProductStatus::default(), ProductStatus::Active);
        assert_eq!(ProductStatus::PhasedOut.to_string(), "Phased Out");
        assert!(!ProductStatus::PhasedOut.is_sellable());
    }

    #[test]
    fn test_status_serializes_as_stored_text() {
        let json = serde_json::to_string(&ProductStatus::PhasedOut).unwrap();
        assert_eq!(json, "\"Phased Out\"");

        let parsed: ProductStatus = serde_json::from_str("\"Active\"").unwrap();
        assert_eq!(parsed, ProductStatus::Active);
    }

    #[test]
    fn test_new_product_builder() {
        let product = NewProduct::new("A2890", "iPhone 15", 3, 799.0)
            .category("Phones")
            .specs("6.1\" OLED")
            .color("Blue")
            .storage("128GB");

        assert_eq!(product.model_number, "A2890");
        assert_eq!(product.quantity, 3);
        assert_eq!(product.color.as_deref(), Some("Blue"));
        assert_eq!(product.storage.as_deref(), Some("128GB"));
    }

    #[test]
    fn test_sale_outcome_messages() {
        let sold = SaleOutcome::Sold {
            sale_id: 1,
            quantity_sold: 3,
            total_price: 30.0,
        };
        assert_eq!(sold.to_string(), "Success! Sold 3 units.");
        assert!(sold.is_success());

        assert_eq!(
            SaleOutcome::InsufficientStock { remaining: 2 }.to_string(),
            "Error: Not enough stock! Only 2 left."
        );
        assert_eq!(
            SaleOutcome::PhasedOut.to_string(),
            "Error: Cannot sell a Phased Out product!"
        );
        assert_eq!(
            SaleOutcome::ProductNotFound.to_string(),
            "Error: Product not found"
        );
        assert!(!SaleOutcome::DatabaseError {
            message: "disk I/O error".into()
        }.is_success());
    }

    #[test]
    fn test_add_outcome_accessors() {
        assert_eq!(AddProductOutcome::Added { id: 7 }.id(), Some(7));
        assert!(!AddProductOutcome::DuplicateModel.is_added());
    }
}
