//! Cart and cart item types.

use crate::cart::{compute_totals, OrderTotals};
use crate::catalog::Product;
use crate::checkout::{CheckoutRequest, OrderLine};
use crate::error::CommerceError;
use crate::ids::{ProductId, UserId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A shopping cart.
///
/// Holds at most one line per product. Serializes as a bare array of items so
/// the stored form stays stable across versions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct Cart {
    /// Items in the cart, in the order they were first added.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product to the cart.
    ///
    /// Adding a product that is already present increases its quantity.
    /// A quantity of zero is treated as one. Returns the resulting quantity
    /// of the line.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> u32 {
        let quantity = quantity.max(1);

        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return existing.quantity;
        }

        self.items.push(CartItem {
            product_id: product.id,
            quantity,
            product: product.clone(),
        });
        quantity
    }

    /// Remove a product from the cart. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() < len_before
    }

    /// Set the quantity of a line.
    ///
    /// Quantities below one are rejected and leave the line untouched; use
    /// [`Cart::remove_item`] to drop a line.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        let quantity =
            u32::try_from(quantity).map_err(|_| CommerceError::InvalidQuantity(quantity))?;

        let item = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product_id)
            .ok_or(CommerceError::ItemNotInCart(product_id))?;
        item.quantity = quantity;
        Ok(())
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of snapshot unit price times quantity over all lines.
    pub fn subtotal(&self) -> Money {
        let currency = self
            .items
            .first()
            .map(|i| i.product.price.currency)
            .unwrap_or_default();
        self.items
            .iter()
            .fold(Money::zero(currency), |acc, item| acc.saturating_add(&item.line_total()))
    }

    /// Subtotal, tax and total for display and checkout.
    pub fn totals(&self) -> OrderTotals {
        compute_totals(self.subtotal())
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Get number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the line for a product.
    pub fn get_item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Build the checkout submission for this cart.
    ///
    /// Each line carries its snapshot price and the total is the
    /// tax-inclusive total shown to the customer.
    pub fn to_checkout_request(&self, user_id: UserId) -> CheckoutRequest {
        CheckoutRequest {
            user_id,
            total: self.totals().total,
            items: self
                .items
                .iter()
                .map(|item| OrderLine {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    price: item.unit_price(),
                })
                .collect(),
        }
    }
}

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Quantity, always at least one.
    pub quantity: u32,
    /// Product as it looked when added; its price is the snapshot price.
    pub product: Product,
}

impl CartItem {
    /// Snapshot unit price.
    pub fn unit_price(&self) -> Money {
        self.product.price
    }

    /// Snapshot unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.saturating_multiply(i64::from(self.quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{NewProduct, ProductType};
    use crate::ids::CategoryId;

    fn product(id: u64, cents: i64) -> Product {
        NewProduct {
            name: format!("Product {id}"),
            slug: format!("product-{id}"),
            description: String::new(),
            price: Money::from_cents(cents),
            image_url: String::new(),
            category_id: CategoryId::new(1),
            product_type: ProductType::Template,
            is_bestseller: false,
            is_featured: false,
        }
        .with_id(ProductId::new(id))
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert!(cart.subtotal().is_zero());
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_item(&product(1, 1000), 2), 2);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new();
        let p = product(1, 1000);
        for q in [1, 2, 4] {
            cart.add_item(&p, q);
        }
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get_item(p.id).unwrap().quantity, 7);
    }

    #[test]
    fn test_add_zero_counts_as_one() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_item(&product(1, 1000), 0), 1);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        let p = product(1, 1000);
        cart.add_item(&p, 1);
        cart.update_quantity(p.id, 5).unwrap();
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_update_quantity_below_one_is_rejected() {
        let mut cart = Cart::new();
        let p = product(1, 1000);
        cart.add_item(&p, 3);

        for q in [0, -1, i64::MIN] {
            assert_eq!(
                cart.update_quantity(p.id, q),
                Err(CommerceError::InvalidQuantity(q))
            );
            assert_eq!(cart.get_item(p.id).unwrap().quantity, 3);
        }
    }

    #[test]
    fn test_update_unknown_item() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.update_quantity(ProductId::new(9), 2),
            Err(CommerceError::ItemNotInCart(ProductId::new(9)))
        );
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        let p = product(1, 1000);
        cart.add_item(&p, 1);
        assert!(cart.remove_item(p.id));
        assert!(!cart.remove_item(p.id));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subtotal_uses_snapshot_price() {
        let mut cart = Cart::new();
        let mut p = product(1, 1000);
        cart.add_item(&p, 2);
        cart.add_item(&product(2, 2000), 1);

        // A later catalog price change does not affect the cart
        p.price = Money::from_cents(5000);
        assert_eq!(cart.subtotal().amount_cents, 4000);
    }

    #[test]
    fn test_checkout_request() {
        let mut cart = Cart::new();
        cart.add_item(&product(2, 9900), 1);
        cart.add_item(&product(7, 14900), 3);

        let req = cart.to_checkout_request(UserId::new(1));
        assert_eq!(req.items.len(), 2);
        assert_eq!(req.items[1].quantity, 3);
        assert_eq!(req.items[1].price.amount_cents, 14900);
        assert_eq!(req.total, cart.totals().total);
        assert!(req.total_matches_items());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 1000), 1);
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_serializes_as_array() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 1000), 1);
        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["productId"], 1);
        assert_eq!(json[0]["product"]["slug"], "product-1");
    }
}
