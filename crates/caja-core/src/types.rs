//! # Domain Types
//!
//! Core domain types used throughout Caja POS.
//!
//! ```text
//! Category ◄── Product ──► CartLine (ephemeral, in caja_core::cart)
//!                 │
//!                 └──► SaleLine ──► Sale
//! ```
//!
//! Persistence shapes are one-to-one with the three store tables (products,
//! sales, sale_lines) plus the reference tables (categories, profiles). The
//! `New*` structs are the pre-insert shapes handed to the store; identifiers
//! and timestamps are generated store-side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate in basis points (1 bps = 0.01%).
///
/// 1900 bps = the 19% VAT applied to every sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product category. Read-only reference data for the checkout flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, unique per store.
    pub name: String,

    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Stock Keeping Unit - optional business identifier.
    pub sku: Option<String>,

    /// Display name shown at the register.
    pub name: String,

    /// Sale price per unit.
    pub price: Money,

    /// Current stock level. Decremented on every committed sale.
    pub stock: i64,

    /// Category this product belongs to, if any.
    pub category_id: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether the register should offer this product at all.
    ///
    /// The selection screen only shows products with stock on hand; the
    /// commit path does not re-check this.
    #[inline]
    pub fn sellable(&self) -> bool {
        self.stock > 0
    }
}

/// Pre-insert shape for a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub sku: Option<String>,
    pub name: String,
    pub price: Money,
    pub stock: i64,
    pub category_id: Option<String>,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Physical cash. The register validates tendered amount >= total.
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// Bank transfer shown on the customer's phone.
    Transfer,
}

// =============================================================================
// Sale
// =============================================================================

/// A committed sale header. Created exactly once per successful checkout
/// and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: String,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

/// A line of a committed sale.
///
/// Carries the unit price captured from the cart at commit time; later
/// price changes never alter recorded sales.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleLine {
    pub id: String,
    pub sale_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: Money,
}

impl SaleLine {
    /// Line total before tax.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// Pre-insert shape for a sale header. The store generates the id and
/// timestamp and returns the full [`Sale`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSale {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
}

/// Pre-insert shape for one sale line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSaleLine {
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: Money,
}

/// A sale header together with its lines, as returned by the recent-sales
/// listing for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleWithLines {
    pub sale: Sale,
    pub lines: Vec<SaleLine>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1_900);
        assert_eq!(rate.bps(), 1_900);
        assert!((rate.percentage() - 19.0).abs() < 0.001);
    }

    #[test]
    fn test_product_sellable() {
        let mut product = Product {
            id: "p1".to_string(),
            sku: None,
            name: "Pan tajado".to_string(),
            price: Money::from_units(4_200),
            stock: 3,
            category_id: None,
            created_at: Utc::now(),
        };
        assert!(product.sellable());

        product.stock = 0;
        assert!(!product.sellable());
    }

    #[test]
    fn test_sale_line_total() {
        let line = SaleLine {
            id: "l1".to_string(),
            sale_id: "s1".to_string(),
            product_id: "p1".to_string(),
            quantity: 3,
            unit_price: Money::from_units(1_500),
        };
        assert_eq!(line.line_total().units(), 4_500);
    }
}
