//! Checkout module.
//!
//! Contains orders, order items and the checkout submission.

mod order;
mod request;

pub use order::{
    NewOrder, NewOrderItem, Order, OrderDetails, OrderItem, OrderLine, OrderStatus,
};
pub use request::{CheckoutRequest, FieldError, ValidationErrors};
