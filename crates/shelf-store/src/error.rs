//! Store error types.

use shelf_commerce::checkout::OrderStatus;
use shelf_commerce::CommerceError;
use thiserror::Error;

/// Errors that can occur when using the store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// A referenced record does not exist.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// A unique key is already taken.
    #[error("{entity} already exists: {key}")]
    Conflict { entity: &'static str, key: String },

    /// Input rejected by a domain rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Order status change not allowed from the current status.
    #[error("Cannot change order status from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The store cannot serve requests (e.g. a poisoned lock).
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub(crate) fn not_found(entity: &'static str, key: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub(crate) fn conflict(entity: &'static str, key: impl ToString) -> Self {
        StoreError::Conflict {
            entity,
            key: key.to_string(),
        }
    }
}

impl From<CommerceError> for StoreError {
    fn from(e: CommerceError) -> Self {
        match e {
            CommerceError::InvalidTransition { from, to } => {
                StoreError::InvalidTransition { from, to }
            }
            other => StoreError::Validation(other.to_string()),
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
