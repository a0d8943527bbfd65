//! The shopping cart, persisted across runs.

use shelf_commerce::cart::{Cart, OrderTotals};
use shelf_commerce::catalog::Product;
use shelf_commerce::checkout::CheckoutRequest;
use shelf_commerce::ids::{ProductId, UserId};

use crate::{Cache, CacheError, Session, SessionId};

const CART_NAMESPACE: &str = "cart";

/// A [`Cart`] that is written back to the cache after every change.
///
/// Opening a session never fails on bad data: a missing or unreadable stored
/// cart starts out empty.
#[derive(Debug)]
pub struct CartSession {
    store: Session<Cart>,
    id: SessionId,
    cart: Cart,
}

impl CartSession {
    /// Load the cart for a session.
    pub fn open(cache: Cache, id: SessionId) -> Self {
        let store: Session<Cart> = Session::new(cache, CART_NAMESPACE);
        let cart = store.load(&id);
        tracing::debug!(session = %id, lines = cart.len(), "Loaded cart");
        Self { store, id, cart }
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn totals(&self) -> OrderTotals {
        self.cart.totals()
    }

    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Add a product; returns the line's new quantity.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<u32, CacheError> {
        let quantity = self.cart.add_item(product, quantity);
        self.persist()?;
        Ok(quantity)
    }

    /// Remove a product; returns whether it was in the cart.
    pub fn remove_item(&mut self, product_id: ProductId) -> Result<bool, CacheError> {
        let removed = self.cart.remove_item(product_id);
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Set a line's quantity. Rejected quantities leave the cart untouched.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), CacheError> {
        self.cart.update_quantity(product_id, quantity)?;
        self.persist()
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> Result<(), CacheError> {
        self.cart.clear();
        self.persist()
    }

    pub fn to_checkout_request(&self, user_id: UserId) -> CheckoutRequest {
        self.cart.to_checkout_request(user_id)
    }

    fn persist(&self) -> Result<(), CacheError> {
        self.store.set(&self.id, &self.cart)
    }
}
