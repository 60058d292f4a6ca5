//! # Sale Repository
//!
//! Records sales and reads the sales ledger.
//!
//! ## Recording a Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       record_sale(product_id, qty)                      │
//! │                                                                         │
//! │  1. READ      quantity, name, price, status                            │
//! │     └── no row            → ProductNotFound                            │
//! │                                                                         │
//! │  2. VALIDATE  ehub_core::check_sale                                    │
//! │     ├── Phased Out        → PhasedOut                                  │
//! │     └── qty > quantity    → InsufficientStock { remaining }            │
//! │                                                                         │
//! │  3. WRITE (one transaction)                                            │
//! │     ├── UPDATE products SET quantity = quantity - qty                  │
//! │     ├── INSERT INTO sales (name snapshot, price × qty, now)            │
//! │     └── COMMIT            → Sold { sale_id, .. }                       │
//! │                                                                         │
//! │  Any storage error along the way → DatabaseError { message }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps 1 and 3 are not isolated from each other: a concurrent writer could
//! change stock in between. The store assumes a single active caller.

use chrono::Local;
use ehub_core::{check_sale, sale_total, CoreError, ProductStatus, Sale, SaleOutcome, SALE_DATE_FORMAT};
use sqlx::sqlite::SqliteConnection;
use sqlx::Connection;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::store::Connector;

/// Repository for the sales ledger.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    connector: Connector,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub(crate) fn new(connector: Connector) -> Self {
        SaleRepository { connector }
    }

    /// Sells `qty_sold` units of a product.
    ///
    /// Never fails: rule violations and storage errors come back as
    /// [`SaleOutcome`] variants whose `Display` is the user-facing message.
    pub async fn record_sale(&self, product_id: i64, qty_sold: i64) -> SaleOutcome {
        debug!(product_id, qty_sold, "Recording sale");

        let result = match self.connector.open().await {
            Ok(mut conn) => {
                let result = record_sale_on(&mut conn, product_id, qty_sold).await;
                self.connector.release(conn, result).await
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(outcome) => {
                if outcome.is_success() {
                    info!(product_id, qty_sold, "Sale recorded");
                } else {
                    warn!(product_id, qty_sold, outcome = %outcome, "Sale rejected");
                }
                outcome
            }
            Err(err) => {
                warn!(product_id, qty_sold, error = %err, "Sale failed");
                SaleOutcome::DatabaseError {
                    message: err.to_string(),
                }
            }
        }
    }

    /// Returns every sale, newest first.
    pub async fn fetch_sales_history(&self) -> DbResult<Vec<Sale>> {
        let mut conn = self.connector.open().await?;
        let result = sqlx::query_as::<_, Sale>(
            r#"
            SELECT
                id,
                COALESCE(product_id, 0) AS product_id,
                COALESCE(product_name, '') AS product_name,
                COALESCE(quantity_sold, 0) AS quantity_sold,
                COALESCE(total_price, 0.0) AS total_price,
                sale_date
            FROM sales
            ORDER BY sale_date DESC, id DESC
            "#,
        )
        .fetch_all(&mut conn)
        .await
        .map_err(DbError::from);

        self.connector.release(conn, result).await
    }
}

/// The read-validate-write sequence, on an already open connection.
async fn record_sale_on(
    conn: &mut SqliteConnection,
    product_id: i64,
    qty_sold: i64,
) -> DbResult<SaleOutcome> {
    let row: Option<(i64, String, f64, ProductStatus)> = sqlx::query_as(
        r#"
        SELECT
            COALESCE(quantity, 0),
            COALESCE(name, ''),
            COALESCE(price, 0.0),
            COALESCE(status, 'Active')
        FROM products
        WHERE id = ?1
        "#,
    )
    .bind(product_id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some((available, name, unit_price, status)) = row else {
        return Ok(SaleOutcome::ProductNotFound);
    };

    if let Err(rejection) = check_sale(status, available, qty_sold) {
        return Ok(match rejection {
            CoreError::PhasedOut => SaleOutcome::PhasedOut,
            CoreError::InsufficientStock { available, .. } => SaleOutcome::InsufficientStock {
                remaining: available,
            },
            CoreError::Validation(_) => SaleOutcome::InvalidQuantity {
                requested: qty_sold,
            },
        });
    }

    let total_price = sale_total(unit_price, qty_sold);
    let sale_date = Local::now().naive_local().format(SALE_DATE_FORMAT).to_string();

    let mut tx = conn
        .begin()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    sqlx::query("UPDATE products SET quantity = quantity - ?2 WHERE id = ?1")
        .bind(product_id)
        .bind(qty_sold)
        .execute(&mut *tx)
        .await?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO sales (product_id, product_name, quantity_sold, total_price, sale_date)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(product_id)
    .bind(&name)
    .bind(qty_sold)
    .bind(total_price)
    .bind(&sale_date)
    .execute(&mut *tx)
    .await?;

    tx.commit()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    Ok(SaleOutcome::Sold {
        sale_id: inserted.last_insert_rowid(),
        quantity_sold: qty_sold,
        total_price,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
