//! # Sale Commit Service
//!
//! Turns a finalized cart plus a payment method into durable records and
//! adjusts inventory.
//!
//! ```text
//! commit(cart, method)
//!   │
//!   ├─ 1. create_sale(header)          must succeed first; all later
//!   │                                  records reference the returned id
//!   ├─ 2. create_sale_lines(id, ...)   prices from the cart, not re-fetched
//!   │
//!   └─ 3. per product:                 independent read-then-write,
//!         stock = read(stock)          no ordering across products,
//!         write(stock - sold)          last writer wins
//! ```
//!
//! ## Failure model
//!
//! There is no retry, no rollback and no cross-step atomicity: a failure at
//! step 2 leaves an orphan header, a failure inside step 3 leaves the sale
//! fully recorded with only some stocks adjusted. The error surfaced to the
//! caller does not say which of those states was reached; the caller must
//! keep the cart intact and treat the sale as possibly-partially-committed
//! (inspect the sales log before manually retrying). Wrapping the three
//! steps in one backend-side transaction would change this observable
//! behavior and is deliberately not done here.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use caja_core::{Cart, Money, NewSale, PaymentMethod, Sale};
use caja_store::{SaleStore, StoreError};

// =============================================================================
// Checkout Error
// =============================================================================

/// Errors surfaced by [`CheckoutService::commit`].
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// The cart has no lines; nothing was written.
    #[error("cannot commit an empty cart")]
    EmptyCart,

    /// Another commit from this session is still in flight; nothing was
    /// written by this call.
    #[error("a sale commit is already in progress")]
    CommitInFlight,

    /// A store write failed. Depending on the failed step, the sale may be
    /// absent, an orphan header, or fully recorded with partially adjusted
    /// stock.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// =============================================================================
// Checkout Service
// =============================================================================

/// The sale commit service for one checkout session.
///
/// One instance per register session; the cart it commits is owned by that
/// same session. The service holds an in-flight guard so a double-tap on
/// the confirm button cannot start a second commit while one is running:
/// re-entrant calls fail fast with [`CheckoutError::CommitInFlight`].
#[derive(Debug)]
pub struct CheckoutService<S> {
    store: Arc<S>,
    in_flight: Mutex<()>,
}

impl<S: SaleStore> CheckoutService<S> {
    pub fn new(store: Arc<S>) -> Self {
        CheckoutService {
            store,
            in_flight: Mutex::new(()),
        }
    }

    /// Commits the cart as a sale.
    ///
    /// Runs the three-step sequence described at module level, strictly in
    /// order. On success returns the stored sale header; only then should
    /// the caller clear the cart. On error the caller must keep the cart
    /// as-is - see the module-level failure model for what may already have
    /// been written.
    pub async fn commit(
        &self,
        cart: &Cart,
        payment_method: PaymentMethod,
    ) -> Result<Sale, CheckoutError> {
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| CheckoutError::CommitInFlight)?;

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let lines = cart.to_sale_lines();

        debug!(
            lines = lines.len(),
            total = %cart.total(),
            method = ?payment_method,
            "Committing sale"
        );

        // Step 1: the header. Abort on failure; nothing else is attempted.
        let sale = self
            .store
            .create_sale(NewSale {
                subtotal: cart.subtotal(),
                tax: cart.tax(),
                total: cart.total(),
                payment_method,
            })
            .await?;

        // Step 2: the lines, carrying the cart's captured unit prices. A
        // failure here leaves the header from step 1 as an orphan.
        if let Err(e) = self.store.create_sale_lines(&sale.id, &lines).await {
            warn!(sale_id = %sale.id, error = %e, "Sale lines failed; header is orphaned");
            return Err(e.into());
        }

        // Step 3: stock adjustment, one independent read-then-write per
        // product, against the latest stored value at read time. The first
        // failure stops the loop; earlier decrements stay applied.
        for line in &lines {
            let stock = self.store.product_stock(&line.product_id).await?;
            if let Err(e) = self
                .store
                .set_product_stock(&line.product_id, stock - line.quantity)
                .await
            {
                warn!(
                    sale_id = %sale.id,
                    product_id = %line.product_id,
                    error = %e,
                    "Stock adjustment failed; sale is recorded, stock partially adjusted"
                );
                return Err(e.into());
            }
        }

        info!(
            sale_id = %sale.id,
            total = %sale.total,
            lines = lines.len(),
            "Sale committed"
        );

        Ok(sale)
    }
}

// =============================================================================
// Cash Tender
// =============================================================================

/// Change due for a cash payment, or `None` when the tendered amount does
/// not cover the total.
///
/// This is the register's pre-commit gate for cash sales; the commit
/// contract itself never sees the tendered amount.
///
/// ## Example
/// ```rust
/// use caja_checkout::checkout::change_due;
/// use caja_core::Money;
///
/// let total = Money::from_units(7_735);
/// assert_eq!(change_due(total, Money::from_units(10_000)), Some(Money::from_units(2_265)));
/// assert_eq!(change_due(total, Money::from_units(7_735)), Some(Money::zero()));
/// assert_eq!(change_due(total, Money::from_units(5_000)), None);
/// ```
pub fn change_due(total: Money, received: Money) -> Option<Money> {
    if received < total {
        return None;
    }
    Some(received - total)
}

// =============================================================================
// Unit Tests
// =============================================================================
