//! # Service Error Type
//!
//! Shared error surface for the gated services (inventory, user
//! directory, reports): either the capability/validation layer said no, or
//! the store failed.

use thiserror::Error;

use caja_core::CoreError;
use caja_store::StoreError;

/// Error from a gated service operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Authorization or validation failure; nothing was written.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<caja_core::ValidationError> for ServiceError {
    fn from(err: caja_core::ValidationError) -> Self {
        ServiceError::Core(err.into())
    }
}

/// Result type for gated service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
