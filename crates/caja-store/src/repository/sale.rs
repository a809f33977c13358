//! # Sale Repository
//!
//! Database operations for sale headers and lines.
//!
//! Sales are write-once: the commit sequence inserts a header, then its
//! lines, and nothing ever updates either table afterwards. Reads exist for
//! the dashboard's recent-sales listing.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreResult;
use caja_core::{NewSale, NewSaleLine, Sale, SaleLine, SaleWithLines};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Inserts a sale header, generating its id and timestamp, and returns
    /// the stored row.
    ///
    /// Step 1 of the commit sequence: every later step references the id
    /// returned here.
    pub async fn insert_sale(&self, new: NewSale) -> StoreResult<Sale> {
        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            subtotal: new.subtotal,
            tax: new.tax,
            total: new.total,
            payment_method: new.payment_method,
            created_at: Utc::now(),
        };

        debug!(id = %sale.id, total = %sale.total, "Inserting sale");

        sqlx::query(
            r#"
            INSERT INTO sales (id, subtotal, tax, total, payment_method, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&sale.id)
        .bind(sale.subtotal)
        .bind(sale.tax)
        .bind(sale.total)
        .bind(sale.payment_method)
        .bind(sale.created_at)
        .execute(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Inserts the lines of a sale.
    ///
    /// Lines are inserted one at a time, so this is best-effort rather than
    /// all-or-nothing: a failure partway leaves the earlier lines in place.
    /// Callers treating the sale as possibly-partially-committed on error is
    /// part of the commit contract.
    pub async fn insert_lines(&self, sale_id: &str, lines: &[NewSaleLine]) -> StoreResult<()> {
        for line in lines {
            let id = Uuid::new_v4().to_string();

            debug!(sale_id = %sale_id, product_id = %line.product_id, "Inserting sale line");

            sqlx::query(
                r#"
                INSERT INTO sale_lines (id, sale_id, product_id, quantity, unit_price)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&id)
            .bind(sale_id)
            .bind(&line.product_id)
            .bind(line.quantity)
            .bind(line.unit_price)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    /// Gets a sale header by id.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, subtotal, tax, total, payment_method, created_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets all lines of a sale, in insertion order.
    pub async fn lines(&self, sale_id: &str) -> StoreResult<Vec<SaleLine>> {
        let lines = sqlx::query_as::<_, SaleLine>(
            r#"
            SELECT id, sale_id, product_id, quantity, unit_price
            FROM sale_lines
            WHERE sale_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// The most recent sales with their lines, newest first.
    ///
    /// Feeds the dashboard; `limit` keeps it to a screenful.
    pub async fn list_recent(&self, limit: u32) -> StoreResult<Vec<SaleWithLines>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, subtotal, tax, total, payment_method, created_at
            FROM sales
            ORDER BY created_at DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::with_capacity(sales.len());
        for sale in sales {
            let lines = self.lines(&sale.id).await?;
            result.push(SaleWithLines { sale, lines });
        }

        Ok(result)
    }
}
