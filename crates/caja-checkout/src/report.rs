//! # Reporting
//!
//! The dashboard numbers: today's revenue and transaction count, the
//! product count, the low-stock panel and the recent-sales table.
//!
//! Aggregation stays trivial on purpose: everything is computed in memory
//! over rows already fetched for display, never by extra analytical
//! queries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use caja_core::{Action, Money, Product, Profile, SaleWithLines, LOW_STOCK_THRESHOLD};
use caja_store::Store;

use crate::error::ServiceResult;

/// How many sales the dashboard's recent-sales table shows.
const RECENT_SALES_LIMIT: u32 = 20;

// =============================================================================
// Pure Aggregation
// =============================================================================

/// Revenue and transaction count for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub revenue: Money,
    pub transactions: usize,
}

/// Aggregates the sales that happened on `day` (UTC dates).
pub fn daily_summary(sales: &[SaleWithLines], day: NaiveDate) -> DailySummary {
    let todays = sales
        .iter()
        .filter(|s| s.sale.created_at.date_naive() == day);

    let mut revenue = Money::zero();
    let mut transactions = 0;
    for s in todays {
        revenue += s.sale.total;
        transactions += 1;
    }

    DailySummary {
        revenue,
        transactions,
    }
}

/// Products at or below the threshold, from an already-fetched list.
pub fn low_stock(products: &[Product], threshold: i64) -> Vec<Product> {
    let mut low: Vec<Product> = products
        .iter()
        .filter(|p| p.stock <= threshold)
        .cloned()
        .collect();
    low.sort_by_key(|p| p.stock);
    low
}

// =============================================================================
// Reports Service
// =============================================================================

/// Everything the dashboard screen shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub today: DailySummary,
    pub product_count: usize,
    pub low_stock: Vec<Product>,
    pub recent_sales: Vec<SaleWithLines>,
}

/// Dashboard assembly over the shared store handle.
#[derive(Debug, Clone)]
pub struct Reports {
    store: Store,
}

impl Reports {
    pub fn new(store: Store) -> Self {
        Reports { store }
    }

    /// Builds the dashboard for `today`. Requires [`Action::ViewReports`].
    pub async fn dashboard(&self, actor: &Profile, today: NaiveDate) -> ServiceResult<Dashboard> {
        actor.authorize(Action::ViewReports)?;

        let recent_sales = self.store.sales().list_recent(RECENT_SALES_LIMIT).await?;
        let products = self.store.products().list().await?;

        debug!(
            sales = recent_sales.len(),
            products = products.len(),
            "Dashboard data fetched"
        );

        Ok(Dashboard {
            today: daily_summary(&recent_sales, today),
            product_count: products.len(),
            low_stock: low_stock(&products, LOW_STOCK_THRESHOLD),
            recent_sales,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
