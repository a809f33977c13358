//! In-memory store with fault injection, for exercising the commit
//! sequence's partial-failure and concurrency behavior without SQLite.
//!
//! Knobs:
//! - fail the header insert, the line insert, or the stock write for one
//!   specific product;
//! - pin the stock read of a product to a fixed value, simulating two
//!   terminals that both read before either writes;
//! - park stock reads on a gate so a commit can be held mid-sequence.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Notify;
use uuid::Uuid;

use caja_core::{Money, NewSale, NewSaleLine, Product, Sale, SaleLine};
use caja_store::{SaleStore, StoreError, StoreResult};

/// Builds a product fixture.
pub fn product(id: &str, price: i64, stock: i64) -> Product {
    Product {
        id: id.to_string(),
        sku: Some(format!("SKU-{}", id)),
        name: format!("Product {}", id),
        price: Money::from_units(price),
        stock,
        category_id: None,
        created_at: Utc::now(),
    }
}

#[derive(Default)]
pub struct MemoryStore {
    stock: Mutex<HashMap<String, i64>>,
    min_written: Mutex<HashMap<String, i64>>,
    sales: Mutex<Vec<Sale>>,
    lines: Mutex<Vec<SaleLine>>,

    fail_sale: AtomicBool,
    fail_lines: AtomicBool,
    fail_stock_writes: Mutex<HashSet<String>>,
    pinned_reads: Mutex<HashMap<String, i64>>,

    holding: AtomicBool,
    parked: AtomicBool,
    release_notify: Notify,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a product's stock.
    pub fn put_product(&self, product: &Product) {
        self.stock
            .lock()
            .unwrap()
            .insert(product.id.clone(), product.stock);
    }

    pub fn stock_of(&self, product_id: &str) -> i64 {
        *self
            .stock
            .lock()
            .unwrap()
            .get(product_id)
            .expect("unknown product")
    }

    /// The smallest stock value ever written for a product, or i64::MAX if
    /// it was never written.
    pub fn min_stock_written(&self, product_id: &str) -> i64 {
        self.min_written
            .lock()
            .unwrap()
            .get(product_id)
            .copied()
            .unwrap_or(i64::MAX)
    }

    pub fn sales(&self) -> Vec<Sale> {
        self.sales.lock().unwrap().clone()
    }

    pub fn all_lines(&self) -> Vec<SaleLine> {
        self.lines.lock().unwrap().clone()
    }

    pub fn lines_for(&self, sale_id: &str) -> Vec<SaleLine> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.sale_id == sale_id)
            .cloned()
            .collect()
    }

    // -------------------------------------------------------------------------
    // Fault injection
    // -------------------------------------------------------------------------

    pub fn fail_create_sale(&self) {
        self.fail_sale.store(true, Ordering::SeqCst);
    }

    pub fn fail_create_lines(&self) {
        self.fail_lines.store(true, Ordering::SeqCst);
    }

    pub fn fail_stock_write_for(&self, product_id: &str) {
        self.fail_stock_writes
            .lock()
            .unwrap()
            .insert(product_id.to_string());
    }

    /// Pins the stock read of a product to a fixed value, regardless of
    /// what has been written since.
    pub fn pin_stock_read(&self, product_id: &str, value: i64) {
        self.pinned_reads
            .lock()
            .unwrap()
            .insert(product_id.to_string(), value);
    }

    // -------------------------------------------------------------------------
    // Gate: park stock reads mid-commit
    // -------------------------------------------------------------------------

    pub fn hold_stock_reads(&self) {
        self.holding.store(true, Ordering::SeqCst);
    }

    pub fn release_stock_reads(&self) {
        self.holding.store(false, Ordering::SeqCst);
        self.release_notify.notify_waiters();
    }

    /// Waits until some commit is parked inside a stock read.
    pub async fn wait_until_held(&self) {
        while !self.parked.load(Ordering::SeqCst) {
            tokio::time::sleep(std::time::Duration::from_millis(1)).await;
        }
    }

    async fn maybe_hold(&self) {
        if !self.holding.load(Ordering::SeqCst) {
            return;
        }
        self.parked.store(true, Ordering::SeqCst);

        let released = self.release_notify.notified();
        // The release may already have happened between the checks
        if !self.holding.load(Ordering::SeqCst) {
            return;
        }
        released.await;
    }
}

#[async_trait]
impl SaleStore for MemoryStore {
    async fn create_sale(&self, new: NewSale) -> StoreResult<Sale> {
        if self.fail_sale.load(Ordering::SeqCst) {
            return Err(StoreError::QueryFailed("injected header failure".into()));
        }

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            subtotal: new.subtotal,
            tax: new.tax,
            total: new.total,
            payment_method: new.payment_method,
            created_at: Utc::now(),
        };
        self.sales.lock().unwrap().push(sale.clone());
        Ok(sale)
    }

    async fn create_sale_lines(&self, sale_id: &str, lines: &[NewSaleLine]) -> StoreResult<()> {
        if self.fail_lines.load(Ordering::SeqCst) {
            return Err(StoreError::QueryFailed("injected line failure".into()));
        }

        let mut stored = self.lines.lock().unwrap();
        for line in lines {
            stored.push(SaleLine {
                id: Uuid::new_v4().to_string(),
                sale_id: sale_id.to_string(),
                product_id: line.product_id.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
            });
        }
        Ok(())
    }

    async fn product_stock(&self, product_id: &str) -> StoreResult<i64> {
        self.maybe_hold().await;

        if let Some(pinned) = self.pinned_reads.lock().unwrap().get(product_id) {
            return Ok(*pinned);
        }

        self.stock
            .lock()
            .unwrap()
            .get(product_id)
            .copied()
            .ok_or_else(|| StoreError::not_found("Product", product_id))
    }

    async fn set_product_stock(&self, product_id: &str, stock: i64) -> StoreResult<()> {
        if self.fail_stock_writes.lock().unwrap().contains(product_id) {
            return Err(StoreError::QueryFailed("injected stock failure".into()));
        }

        let mut min_written = self.min_written.lock().unwrap();
        let entry = min_written.entry(product_id.to_string()).or_insert(stock);
        *entry = (*entry).min(stock);
        drop(min_written);

        self.stock
            .lock()
            .unwrap()
            .insert(product_id.to_string(), stock);
        Ok(())
    }
}
