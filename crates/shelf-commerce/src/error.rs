//! Commerce error types.

use thiserror::Error;

use crate::checkout::OrderStatus;
use crate::ids::ProductId;

/// Errors that can occur in storefront domain operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(ProductId),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Review rating outside 1-5.
    #[error("Invalid rating: {0} (expected 1-5)")]
    InvalidRating(i64),

    /// Status string outside the order status set.
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// Order status transition not allowed.
    #[error("Invalid order transition from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Identifier that is not a positive integer.
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// Unknown product type.
    #[error("Invalid product type: {0}")]
    InvalidProductType(String),

    /// Unknown catalog filter or sort option.
    #[error("Invalid {kind}: {value}")]
    InvalidFilter { kind: &'static str, value: String },
}
