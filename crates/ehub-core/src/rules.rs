//! # Sale Rules
//!
//! The read-then-validate half of recording a sale, kept pure so the store
//! only has to feed it the row it just read.
//!
//! ```text
//! status == Phased Out ?     ──► PhasedOut
//! requested <= 0 ?           ──► Validation(MustBePositive)
//! requested > available ?    ──► InsufficientStock
//! otherwise                  ──► Ok, total = price × requested
//! ```

use crate::error::{CoreError, CoreResult};
use crate::types::ProductStatus;
use crate::validation::validate_sale_quantity;

/// Checks whether `requested` units of a product may be sold.
///
/// ## Example
/// ```rust
/// use ehub_core::{check_sale, CoreError, ProductStatus};
///
/// assert!(check_sale(ProductStatus::Active, 5, 5).is_ok());
/// assert!(matches!(
///     check_sale(ProductStatus::Active, 2, 3),
///     Err(CoreError::InsufficientStock { available: 2, requested: 3 })
/// ));
/// ```
pub fn check_sale(status: ProductStatus, available: i64, requested: i64) -> CoreResult<()> {
    if !status.is_sellable() {
        return Err(CoreError::PhasedOut);
    }

    validate_sale_quantity(requested)?;

    if requested > available {
        return Err(CoreError::InsufficientStock {
            available,
            requested,
        });
    }

    Ok(())
}

/// Total price of a sale line.
#[inline]
pub fn sale_total(unit_price: f64, quantity: i64) -> f64 {
    unit_price * quantity as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phased_out_rejected_regardless_of_stock() {
        for requested in [1, 10, 1_000] {
            assert!(matches!(
                check_sale(ProductStatus::PhasedOut, 1_000, requested),
                Err(CoreError::PhasedOut)
            ));
        }
    }

    #[test]
    fn test_exact_stock_is_sellable() {
        assert!(check_sale(ProductStatus::Active, 4, 4).is_ok());
    }

    #[test]
    fn test_negative_stock_blocks_sale() {
        assert!(matches!(
            check_sale(ProductStatus::Active, -2, 1),
            Err(CoreError::InsufficientStock {
                available: -2,
                requested: 1
            })
        ));
    }

    #[test]
    fn test_non_positive_quantity() {
        assert!(matches!(
            check_sale(ProductStatus::Active, 10, 0),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_sale_total() {
        assert_eq!(sale_total(249.5, 2), 499.0);
        assert_eq!(sale_total(10.0, 0), 0.0);
    }
}
