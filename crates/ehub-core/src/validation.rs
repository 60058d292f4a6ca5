//! # Validation Module
//!
//! Input checks applied by the store before anything touches SQLite.
//!
//! Catalog fields other than the name are stored as entered.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: UI                                                            │
//! │  └── Form checks, immediate feedback                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Required name, positive sale quantity                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite                                                       │
//! │  ├── NOT NULL (name)                                                   │
//! │  └── UNIQUE (model_number)                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ehub_core::validation::{validate_product_name, validate_sale_quantity};
//!
//! assert!(validate_product_name("Galaxy A54").is_ok());
//! assert!(validate_sale_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{NewProduct, ProductUpdate};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
///
/// ## Example
/// ```rust
/// use ehub_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Galaxy A54").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the quantity of a sale.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// Stock adjustments are not validated: negative deltas and negative stock
/// are allowed there.
pub fn validate_sale_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a new product. Model number, price and quantity are unchecked.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&product.name)
}

/// Validates a product edit.
pub fn validate_product_update(update: &ProductUpdate) -> ValidationResult<()> {
    validate_product_name(&update.name)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Pixel 8 Pro").is_ok());
        assert!(validate_product_name(&"A".repeat(300)).is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(" \t").is_err());
    }

    #[test]
    fn test_validate_sale_quantity() {
        assert!(validate_sale_quantity(1).is_ok());
        assert!(validate_sale_quantity(500).is_ok());
        assert_eq!(
            validate_sale_quantity(0),
            Err(ValidationError::MustBePositive {
                field: "quantity".to_string()
            })
        );
        assert!(validate_sale_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_new_product() {
        let ok = NewProduct::new("A2890", "iPhone 15", 1, 799.0);
        assert!(validate_new_product(&ok).is_ok());

        let unusual = NewProduct::new("", "Clearance bundle", -2, -5.0);
        assert!(validate_new_product(&unusual).is_ok());

        let nameless = NewProduct::new("A2890", " ", 1, 799.0);
        assert!(matches!(
            validate_new_product(&nameless),
            Err(ValidationError::Required { .. })
        ));
    }
}
