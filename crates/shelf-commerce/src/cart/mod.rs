//! Shopping cart module.
//!
//! Contains the cart aggregate and the pricing function shared by the cart
//! display and checkout.

mod cart;
mod pricing;

pub use cart::{Cart, CartItem};
pub use pricing::{compute_totals, compute_totals_with, OrderTotals, TaxRate, TAX_RATE};
