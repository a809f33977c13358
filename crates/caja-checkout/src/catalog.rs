//! # Catalog Read Facade
//!
//! What the register's product screen reads: the product and category
//! lists, plus the in-memory filtering applied on top of them.
//!
//! A store failure here must not take the register down, so both listings
//! degrade to an empty list: the error is logged and the screen shows
//! nothing rather than an error state. No caching, no retry.

use std::sync::Arc;

use tracing::error;

use caja_core::{Category, Product};
use caja_store::CatalogStore;

/// Read access to products and categories for one register screen.
#[derive(Debug)]
pub struct Catalog<S> {
    store: Arc<S>,
}

impl<S: CatalogStore> Catalog<S> {
    pub fn new(store: Arc<S>) -> Self {
        Catalog { store }
    }

    /// All products, ordered by name. Empty on store failure (logged).
    pub async fn products(&self) -> Vec<Product> {
        match self.store.list_products().await {
            Ok(products) => products,
            Err(e) => {
                error!(error = %e, "Failed to list products");
                Vec::new()
            }
        }
    }

    /// All categories, ordered by name. Empty on store failure (logged).
    pub async fn categories(&self) -> Vec<Category> {
        match self.store.list_categories().await {
            Ok(categories) => categories,
            Err(e) => {
                error!(error = %e, "Failed to list categories");
                Vec::new()
            }
        }
    }
}

// =============================================================================
// In-Memory Filtering
// =============================================================================

/// Filters a fetched product list down to what the register offers.
///
/// Only products with stock on hand are offered; `query` matches name or
/// SKU case-insensitively; `category_id` narrows to one category. This is
/// the selection-time gate that keeps out-of-stock products off the screen;
/// the commit path never re-checks it.
pub fn offered(products: &[Product], query: &str, category_id: Option<&str>) -> Vec<Product> {
    let query = query.trim().to_lowercase();

    products
        .iter()
        .filter(|p| p.sellable())
        .filter(|p| {
            query.is_empty()
                || p.name.to_lowercase().contains(&query)
                || p.sku
                    .as_deref()
                    .is_some_and(|sku| sku.to_lowercase().contains(&query))
        })
        .filter(|p| match category_id {
            Some(c) => p.category_id.as_deref() == Some(c),
            None => true,
        })
        .cloned()
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
