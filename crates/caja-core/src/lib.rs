//! # caja-core: Pure Business Logic for Caja POS
//!
//! Cart math, money and tax, domain types, and role checks, all as pure
//! code with zero I/O dependencies.
//!
//! ```text
//!   Register UI / services (caja-checkout)
//!        │
//!        ▼
//!   caja-core (THIS CRATE)  money · cart · types · access · validation
//!        │                  NO I/O · NO DATABASE · NO NETWORK
//!        ▼
//!   caja-store              SQLite queries, migrations, repositories
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - The cart aggregate: the in-progress sale and derived totals
//! - [`money`] - Integer peso arithmetic and half-up tax rounding
//! - [`types`] - Domain types (Product, Category, Sale, SaleLine, ...)
//! - [`access`] - Roles, capabilities, and the authorization predicate
//! - [`validation`] - Input validation for catalog/user writes
//! - [`error`] - Domain error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod access;
pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use access::{Action, NewProfile, Profile, Role};
pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The VAT rate applied to every sale: 19%, in basis points.
pub const VAT_RATE: types::TaxRate = types::TaxRate::from_bps(1_900);

/// Stock level at or below which a product shows up on the low-stock panel.
pub const LOW_STOCK_THRESHOLD: i64 = 5;
