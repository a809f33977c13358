//! # Store Contract
//!
//! The backend-agnostic contract the services are written against. The
//! SQLite [`Store`] implements it here; tests substitute in-memory
//! implementations with fault injection to reproduce partial-failure
//! states.
//!
//! Splitting the contract in two keeps each service's requirement narrow:
//! the commit sequence needs [`SaleStore`], the register's product screen
//! needs [`CatalogStore`], and nothing needs both.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::pool::Store;
use caja_core::{Category, NewSale, NewSaleLine, Product, Sale};

// =============================================================================
// Contract Traits
// =============================================================================

/// The writes the sale commit sequence performs, in its required order.
///
/// Each method is an independent remote operation that can fail with a
/// store error; the contract makes no atomicity promise across calls. Stock
/// access is a plain read-then-write pair (last writer wins), not a
/// compare-and-swap.
#[async_trait]
pub trait SaleStore: Send + Sync {
    /// Inserts a sale header and returns it with its generated id.
    async fn create_sale(&self, sale: NewSale) -> StoreResult<Sale>;

    /// Inserts the lines of a sale. Partial-insertion behavior is
    /// implementation-defined; the SQLite store inserts best-effort, one
    /// line at a time.
    async fn create_sale_lines(&self, sale_id: &str, lines: &[NewSaleLine]) -> StoreResult<()>;

    /// Reads a product's current stock.
    async fn product_stock(&self, product_id: &str) -> StoreResult<i64>;

    /// Writes a product's stock to an absolute value.
    async fn set_product_stock(&self, product_id: &str, stock: i64) -> StoreResult<()>;
}

/// Read access to the catalog reference data.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All products, ordered by name.
    async fn list_products(&self) -> StoreResult<Vec<Product>>;

    /// All categories, ordered by name.
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;
}

// =============================================================================
// SQLite Implementation
// =============================================================================

#[async_trait]
impl SaleStore for Store {
    async fn create_sale(&self, sale: NewSale) -> StoreResult<Sale> {
        self.sales().insert_sale(sale).await
    }

    async fn create_sale_lines(&self, sale_id: &str, lines: &[NewSaleLine]) -> StoreResult<()> {
        self.sales().insert_lines(sale_id, lines).await
    }

    async fn product_stock(&self, product_id: &str) -> StoreResult<i64> {
        self.products().stock(product_id).await
    }

    async fn set_product_stock(&self, product_id: &str, stock: i64) -> StoreResult<()> {
        self.products().set_stock(product_id, stock).await
    }
}

#[async_trait]
impl CatalogStore for Store {
    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        self.products().list().await
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        self.categories().list().await
    }
}
