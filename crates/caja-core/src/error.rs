//! # Error Types
//!
//! Domain-specific error types for caja-core.
//!
//! ```text
//! ValidationError ──► CoreError ──► StoreError (caja-store)
//!                                        │
//!                                        ▼
//!                               CheckoutError (caja-checkout)
//! ```
//!
//! The cart aggregate itself never errors; these types cover the gated
//! operations (catalog edits, user administration) and input validation.

use thiserror::Error;

use crate::access::{Action, Role};

// =============================================================================
// Core Error
// =============================================================================

/// Business-rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// The profile's role does not permit the requested action, or the
    /// profile is deactivated.
    #[error("role {role:?} may not perform {action:?}")]
    AccessDenied { role: Role, action: Action },

    /// Input validation failed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation failures, raised before any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (bad UUID, malformed email, ...).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ProductNotFound("abc".to_string());
        assert_eq!(err.to_string(), "product not found: abc");

        let err = CoreError::AccessDenied {
            role: Role::Cashier,
            action: Action::ManageUsers,
        };
        assert_eq!(err.to_string(), "role Cashier may not perform ManageUsers");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustNotBeNegative {
            field: "stock".to_string(),
        };
        assert_eq!(err.to_string(), "stock must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
