//! # Cart Aggregate
//!
//! The in-progress sale: line items plus derived totals.
//!
//! ```text
//! Register action            Cart operation          State change
//! ───────────────            ──────────────          ────────────
//! Tap product        ──────► add(product)      ────► qty += 1 or new line
//! Change quantity    ──────► update_quantity() ────► qty = n (n <= 0 removes)
//! Tap remove         ──────► remove()          ────► line deleted
//! Cancel / commit ok ──────► clear()           ────► lines emptied
//! ```
//!
//! Every operation is total and infallible: the cart is a pure in-memory
//! reducer with no I/O and no error paths. Derived values are recomputed on
//! each call rather than cached, so they can never go stale.
//!
//! ## Invariants
//! - One line per product id; adding an already-present product increments
//!   its quantity instead of appending a duplicate line.
//! - Line quantity is always >= 1. Updating a quantity to zero or below
//!   removes the line.
//! - `total() == subtotal() + tax()` with `tax` = 19% VAT rounded half-up.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{NewSaleLine, Product};
use crate::VAT_RATE;

/// A line in the cart.
///
/// Holds a snapshot of the product taken when it was first added: the sale
/// records whatever price the cart held, so a price edit mid-cart does not
/// retroactively alter an in-progress checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Product id (UUID), the line's identity within the cart.
    pub product_id: String,

    /// SKU at the time of adding.
    pub sku: Option<String>,

    /// Product name at the time of adding.
    pub name: String,

    /// Unit price at the time of adding.
    pub unit_price: Money,

    /// Quantity in the cart, always >= 1.
    pub quantity: i64,
}

impl CartLine {
    fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
        }
    }

    /// Line total before tax (unit price x quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// The cart: an ordered collection of lines owned by one checkout session.
///
/// Created empty at session start, mutated by register actions, destroyed by
/// `clear()` after a successful commit or an explicit cancel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,

    /// When the cart was created or last cleared.
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds one unit of a product.
    ///
    /// If a line for the product already exists its quantity goes up by one;
    /// otherwise a new line with quantity 1 is appended. Product validity
    /// (existence, stock on hand) is the caller's concern.
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self.line_mut(&product.id) {
            line.quantity += 1;
            return;
        }
        self.lines.push(CartLine::from_product(product));
    }

    /// Removes the line for a product. No-op if the product is not in the
    /// cart.
    pub fn remove(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Sets the quantity of a product's line.
    ///
    /// A quantity of zero or below behaves as [`Cart::remove`]. No-op if the
    /// product is not in the cart.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id == product_id)
    }

    /// The lines, in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total quantity across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of line totals, before tax.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// 19% VAT on the subtotal, rounded half-up to the nearest peso.
    ///
    /// Tax is computed on the subtotal as a whole, not per line.
    pub fn tax(&self) -> Money {
        self.subtotal().tax(VAT_RATE)
    }

    /// Grand total: subtotal plus tax.
    pub fn total(&self) -> Money {
        self.subtotal() + self.tax()
    }

    /// The lines in the shape the store expects for sale commit.
    pub fn to_sale_lines(&self) -> Vec<NewSaleLine> {
        self.lines
            .iter()
            .map(|l| NewSaleLine {
                product_id: l.product_id.clone(),
                quantity: l.quantity,
                unit_price: l.unit_price,
            })
            .collect()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            sku: Some(format!("SKU-{}", id)),
            name: format!("Product {}", id),
            price: Money::from_units(price),
            stock: 10,
            category_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_new_line() {
        let mut cart = Cart::new();
        cart.add(&product("1", 2_500));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_add_same_product_merges_lines() {
        let mut cart = Cart::new();
        let p = product("1", 2_500);

        cart.add(&p);
        cart.add(&p);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_add_captures_price_at_add_time() {
        let mut cart = Cart::new();
        let mut p = product("1", 2_500);
        cart.add(&p);

        // A later price edit must not touch the line already in the cart
        p.price = Money::from_units(9_999);
        cart.add(&p);

        assert_eq!(cart.lines()[0].unit_price.units(), 2_500);
        assert_eq!(cart.subtotal().units(), 5_000);
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(&product("1", 2_500));
        cart.add(&product("2", 1_500));

        cart.remove("1");
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].product_id, "2");

        // Removing something absent is a no-op
        cart.remove("nope");
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add(&product("1", 2_500));

        cart.update_quantity("1", 5);
        assert_eq!(cart.lines()[0].quantity, 5);

        // Absent product: no-op
        cart.update_quantity("nope", 3);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_update_quantity_zero_or_below_removes() {
        let mut cart = Cart::new();
        cart.add(&product("1", 2_500));
        cart.update_quantity("1", 0);
        assert!(cart.is_empty());

        cart.add(&product("2", 1_500));
        cart.update_quantity("2", -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_no_sequence_produces_nonpositive_quantity() {
        let mut cart = Cart::new();
        let a = product("a", 1_000);
        let b = product("b", 2_000);

        cart.add(&a);
        cart.add(&b);
        cart.update_quantity("a", 7);
        cart.add(&a);
        cart.update_quantity("b", -1);
        cart.add(&b);
        cart.remove("a");
        cart.add(&a);
        cart.update_quantity("b", 2);

        assert!(cart.lines().iter().all(|l| l.quantity >= 1));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = Cart::new();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal().units(), 0);
        assert_eq!(cart.tax().units(), 0);
        assert_eq!(cart.total().units(), 0);
        assert_eq!(cart.item_count(), 0);

        cart.add(&product("1", 2_500));
        cart.clear();
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_scenario() {
        // 2 x 2500 + 1 x 1500 = 6500; 19% VAT = 1235; total 7735
        let mut cart = Cart::new();
        let a = product("a", 2_500);
        let b = product("b", 1_500);

        cart.add(&a);
        cart.add(&a);
        cart.add(&b);

        assert_eq!(cart.subtotal().units(), 6_500);
        assert_eq!(cart.tax().units(), 1_235);
        assert_eq!(cart.total().units(), 7_735);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_to_sale_lines() {
        let mut cart = Cart::new();
        cart.add(&product("a", 2_500));
        cart.add(&product("a", 2_500));
        cart.add(&product("b", 1_500));

        let lines = cart.to_sale_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].product_id, "a");
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].unit_price.units(), 2_500);
        assert_eq!(lines[1].product_id, "b");
        assert_eq!(lines[1].quantity, 1);
    }
}
