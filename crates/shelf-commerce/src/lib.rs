//! Storefront domain types and logic for Shelf.
//!
//! This crate holds everything about the digital-goods storefront that does
//! not depend on storage or transport:
//!
//! - **Catalog**: Categories, products, reviews
//! - **Cart**: Shopping cart and the tax/total calculation
//! - **Checkout**: Checkout submission, orders, order status lifecycle
//!
//! # Example
//!
//! ```rust,ignore
//! use shelf_commerce::prelude::*;
//!
//! let mut cart = Cart::new();
//! cart.add_item(&product, 1);
//!
//! let totals = cart.totals();
//! println!("Total: {}", totals.total.display());
//!
//! let request = cart.to_checkout_request(DEMO_USER_ID);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod user;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        Category, NewCategory, NewProduct, NewReview, PriceBand, Product, ProductFilter,
        ProductType, Rating, Review, ReviewSubmission, SortOption,
    };

    // Cart
    pub use crate::cart::{compute_totals, Cart, CartItem, OrderTotals, TaxRate, TAX_RATE};

    // Checkout
    pub use crate::checkout::{
        CheckoutRequest, FieldError, NewOrder, NewOrderItem, Order, OrderDetails, OrderItem,
        OrderLine, OrderStatus, ValidationErrors,
    };

    pub use crate::user::{NewUser, User};
}
