//! # Roles and Capabilities
//!
//! Role-based access checks for the restricted operations (catalog
//! management, user administration).
//!
//! Authentication itself is the hosted backend's job; this module only
//! answers "may this profile perform this action". The predicate is
//! evaluated explicitly before the operation runs, never just hidden in the
//! UI, and the data store's own access-control layer remains the real
//! enforcement boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Role
// =============================================================================

/// A user's role at the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Store owner/manager: everything.
    Admin,
    /// Runs the register: sells and reads the dashboard.
    Cashier,
    /// Manages the catalog and stock levels.
    Inventory,
}

/// An operation gated by a role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Check out a cart at the register.
    RecordSale,
    /// Create or edit products and categories.
    ManageCatalog,
    /// Create, deactivate or list user profiles.
    ManageUsers,
    /// Read the dashboard summary and sales log.
    ViewReports,
}

impl Role {
    /// The capability predicate: whether this role may perform `action`.
    pub const fn allows(self, action: Action) -> bool {
        match self {
            Role::Admin => true,
            Role::Cashier => matches!(action, Action::RecordSale | Action::ViewReports),
            Role::Inventory => matches!(action, Action::ManageCatalog | Action::ViewReports),
        }
    }
}

// =============================================================================
// Profile
// =============================================================================

/// A user profile row. Credentials and sessions live in the backend's auth
/// service; only the role and active flag matter here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Profile {
    /// Matches the auth user's id.
    pub id: String,

    pub name: String,
    pub email: String,
    pub role: Role,

    /// Deactivated profiles keep their history but may not act.
    pub active: bool,

    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Checks that this profile may perform `action`.
    ///
    /// Inactive profiles are denied everything regardless of role.
    pub fn authorize(&self, action: Action) -> CoreResult<()> {
        if !self.active || !self.role.allows(action) {
            return Err(CoreError::AccessDenied {
                role: self.role,
                action,
            });
        }
        Ok(())
    }
}

/// Pre-insert shape for a new profile. The auth backend supplies the id once
/// the account exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

// =============================================================================
// Unit Tests
// =============================================================================
