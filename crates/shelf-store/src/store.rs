//! The repository trait.

use shelf_commerce::catalog::{Category, NewCategory, NewProduct, NewReview, Product, Review};
use shelf_commerce::checkout::{
    NewOrder, NewOrderItem, Order, OrderDetails, OrderItem, OrderLine, OrderStatus,
};
use shelf_commerce::ids::{CategoryId, OrderId, ProductId, UserId};
use shelf_commerce::user::{NewUser, User};

use crate::StoreResult;

/// Storefront persistence.
///
/// Every method is atomic with respect to the others. Lookups that may miss
/// return `Ok(None)`; `Err` is reserved for rejected writes and for a store
/// that cannot serve requests.
pub trait Store: Send + Sync {
    // Users

    fn get_user(&self, id: UserId) -> StoreResult<Option<User>>;

    fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Create a user. Usernames are unique.
    fn create_user(&self, user: NewUser) -> StoreResult<User>;

    // Categories

    fn list_categories(&self) -> StoreResult<Vec<Category>>;

    fn get_category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>>;

    /// Create a category. Slugs are unique.
    fn create_category(&self, category: NewCategory) -> StoreResult<Category>;

    // Products

    fn list_products(&self) -> StoreResult<Vec<Product>>;

    fn get_product(&self, id: ProductId) -> StoreResult<Option<Product>>;

    fn get_product_by_slug(&self, slug: &str) -> StoreResult<Option<Product>>;

    fn products_by_category(&self, category_id: CategoryId) -> StoreResult<Vec<Product>>;

    fn featured_products(&self) -> StoreResult<Vec<Product>>;

    fn bestseller_products(&self) -> StoreResult<Vec<Product>>;

    /// Create a product with no reviews. Slugs are unique.
    fn create_product(&self, product: NewProduct) -> StoreResult<Product>;

    // Reviews

    fn reviews_by_product(&self, product_id: ProductId) -> StoreResult<Vec<Review>>;

    /// Create a review and recompute the product's rating and review count
    /// from all of its reviews.
    fn create_review(&self, review: NewReview) -> StoreResult<Review>;

    // Orders

    fn list_orders(&self) -> StoreResult<Vec<Order>>;

    fn get_order_by_id(&self, id: OrderId) -> StoreResult<Option<Order>>;

    fn orders_by_user(&self, user_id: UserId) -> StoreResult<Vec<Order>>;

    fn create_order(&self, order: NewOrder) -> StoreResult<Order>;

    /// Change an order's status. Returns `Ok(None)` for an unknown order.
    fn update_order_status(&self, id: OrderId, status: OrderStatus)
        -> StoreResult<Option<Order>>;

    fn order_items_by_order(&self, order_id: OrderId) -> StoreResult<Vec<OrderItem>>;

    /// Create a single order item. The order is not checked.
    fn create_order_item(&self, item: NewOrderItem) -> StoreResult<OrderItem>;

    /// Create an order and one item per line as a single unit.
    fn place_order(&self, order: NewOrder, lines: Vec<OrderLine>) -> StoreResult<OrderDetails>;

    /// An order together with its items.
    fn order_details(&self, id: OrderId) -> StoreResult<Option<OrderDetails>> {
        let Some(order) = self.get_order_by_id(id)? else {
            return Ok(None);
        };
        let items = self.order_items_by_order(id)?;
        Ok(Some(OrderDetails { order, items }))
    }
}
