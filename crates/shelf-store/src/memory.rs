//! In-memory store.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use shelf_commerce::catalog::{Category, NewCategory, NewProduct, NewReview, Product, Review};
use shelf_commerce::checkout::{
    NewOrder, NewOrderItem, Order, OrderDetails, OrderItem, OrderLine, OrderStatus,
};
use shelf_commerce::ids::{CategoryId, OrderId, OrderItemId, ProductId, ReviewId, UserId};
use shelf_commerce::user::{NewUser, User};

use crate::{Store, StoreError, StoreResult};

/// Hands out ids 1, 2, 3, ...
#[derive(Debug)]
pub(crate) struct IdSequence(u64);

impl Default for IdSequence {
    fn default() -> Self {
        Self(1)
    }
}

impl IdSequence {
    pub(crate) fn next(&mut self) -> u64 {
        let id = self.0;
        self.0 += 1;
        id
    }
}

/// All maps and counters, guarded together by one lock.
///
/// Maps are keyed by id; ids only grow, so iteration order is creation order.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) users: BTreeMap<UserId, User>,
    pub(crate) categories: BTreeMap<CategoryId, Category>,
    pub(crate) products: BTreeMap<ProductId, Product>,
    pub(crate) reviews: BTreeMap<ReviewId, Review>,
    pub(crate) orders: BTreeMap<OrderId, Order>,
    pub(crate) order_items: BTreeMap<OrderItemId, OrderItem>,

    user_ids: IdSequence,
    category_ids: IdSequence,
    product_ids: IdSequence,
    review_ids: IdSequence,
    order_ids: IdSequence,
    order_item_ids: IdSequence,
}

impl Tables {
    pub(crate) fn insert_user(&mut self, new: NewUser) -> StoreResult<User> {
        if self.users.values().any(|u| u.username == new.username) {
            return Err(StoreError::conflict("user", &new.username));
        }
        let user = new.with_id(UserId::new(self.user_ids.next()));
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    pub(crate) fn insert_category(&mut self, new: NewCategory) -> StoreResult<Category> {
        if self.categories.values().any(|c| c.slug == new.slug) {
            return Err(StoreError::conflict("category", &new.slug));
        }
        let category = new.with_id(CategoryId::new(self.category_ids.next()));
        self.categories.insert(category.id, category.clone());
        Ok(category)
    }

    pub(crate) fn insert_product(&mut self, new: NewProduct) -> StoreResult<Product> {
        if self.products.values().any(|p| p.slug == new.slug) {
            return Err(StoreError::conflict("product", &new.slug));
        }
        let product = new.with_id(ProductId::new(self.product_ids.next()));
        self.products.insert(product.id, product.clone());
        Ok(product)
    }

    /// Insert a review without touching the product's cached rating.
    pub(crate) fn insert_review(&mut self, new: NewReview) -> Review {
        let review = new.with_id(ReviewId::new(self.review_ids.next()), Utc::now());
        self.reviews.insert(review.id, review.clone());
        review
    }

    fn insert_order(&mut self, new: NewOrder) -> Order {
        let order = new.with_id(OrderId::new(self.order_ids.next()), Utc::now());
        self.orders.insert(order.id, order.clone());
        order
    }

    fn insert_order_item(&mut self, new: NewOrderItem) -> OrderItem {
        let item = new.with_id(OrderItemId::new(self.order_item_ids.next()));
        self.order_items.insert(item.id, item.clone());
        item
    }

    fn refresh_product_rating(&mut self, product_id: ProductId) {
        let Some(product) = self.products.get_mut(&product_id) else {
            return;
        };
        product.refresh_rating(
            self.reviews
                .values()
                .filter(|r| r.product_id == product_id)
                .map(|r| &r.rating),
        );
    }
}

/// A [`Store`] that keeps everything in process memory.
///
/// All state is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemStore {
    tables: RwLock<Tables>,
}

impl MemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store loaded with the storefront catalog.
    pub fn seeded() -> Self {
        let mut tables = Tables::default();
        crate::seed::load(&mut tables);
        tracing::debug!(
            products = tables.products.len(),
            categories = tables.categories.len(),
            "Loaded catalog seed"
        );
        Self {
            tables: RwLock::new(tables),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    fn products_where(&self, pred: impl Fn(&Product) -> bool) -> StoreResult<Vec<Product>> {
        Ok(self
            .read()?
            .products
            .values()
            .filter(|p| pred(p))
            .cloned()
            .collect())
    }
}

impl Store for MemStore {
    fn get_user(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    fn create_user(&self, user: NewUser) -> StoreResult<User> {
        self.write()?.insert_user(user)
    }

    fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.read()?.categories.values().cloned().collect())
    }

    fn get_category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>> {
        Ok(self
            .read()?
            .categories
            .values()
            .find(|c| c.slug == slug)
            .cloned())
    }

    fn create_category(&self, category: NewCategory) -> StoreResult<Category> {
        self.write()?.insert_category(category)
    }

    fn list_products(&self) -> StoreResult<Vec<Product>> {
        self.products_where(|_| true)
    }

    fn get_product(&self, id: ProductId) -> StoreResult<Option<Product>> {
        Ok(self.read()?.products.get(&id).cloned())
    }

    fn get_product_by_slug(&self, slug: &str) -> StoreResult<Option<Product>> {
        Ok(self
            .read()?
            .products
            .values()
            .find(|p| p.slug == slug)
            .cloned())
    }

    fn products_by_category(&self, category_id: CategoryId) -> StoreResult<Vec<Product>> {
        self.products_where(|p| p.in_category(category_id))
    }

    fn featured_products(&self) -> StoreResult<Vec<Product>> {
        self.products_where(|p| p.is_featured)
    }

    fn bestseller_products(&self) -> StoreResult<Vec<Product>> {
        self.products_where(|p| p.is_bestseller)
    }

    fn create_product(&self, product: NewProduct) -> StoreResult<Product> {
        let product = self.write()?.insert_product(product)?;
        tracing::debug!(product_id = %product.id, slug = %product.slug, "Created product");
        Ok(product)
    }

    fn reviews_by_product(&self, product_id: ProductId) -> StoreResult<Vec<Review>> {
        Ok(self
            .read()?
            .reviews
            .values()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect())
    }

    fn create_review(&self, review: NewReview) -> StoreResult<Review> {
        let mut tables = self.write()?;
        if !tables.products.contains_key(&review.product_id) {
            return Err(StoreError::not_found("product", review.product_id));
        }
        let review = tables.insert_review(review);
        tables.refresh_product_rating(review.product_id);
        tracing::debug!(
            review_id = %review.id,
            product_id = %review.product_id,
            rating = review.rating.get(),
            "Created review"
        );
        Ok(review)
    }

    fn list_orders(&self) -> StoreResult<Vec<Order>> {
        Ok(self.read()?.orders.values().cloned().collect())
    }

    fn get_order_by_id(&self, id: OrderId) -> StoreResult<Option<Order>> {
        Ok(self.read()?.orders.get(&id).cloned())
    }

    fn orders_by_user(&self, user_id: UserId) -> StoreResult<Vec<Order>> {
        Ok(self
            .read()?
            .orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    fn create_order(&self, order: NewOrder) -> StoreResult<Order> {
        Ok(self.write()?.insert_order(order))
    }

    fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> StoreResult<Option<Order>> {
        let mut tables = self.write()?;
        let Some(order) = tables.orders.get_mut(&id) else {
            return Ok(None);
        };
        let from = order.status;
        order.transition_to(status, Utc::now())?;
        tracing::info!(order_id = %id, %from, to = %status, "Order status updated");
        Ok(Some(order.clone()))
    }

    fn order_items_by_order(&self, order_id: OrderId) -> StoreResult<Vec<OrderItem>> {
        Ok(self
            .read()?
            .order_items
            .values()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect())
    }

    fn create_order_item(&self, item: NewOrderItem) -> StoreResult<OrderItem> {
        Ok(self.write()?.insert_order_item(item))
    }

    fn place_order(&self, order: NewOrder, lines: Vec<OrderLine>) -> StoreResult<OrderDetails> {
        let mut tables = self.write()?;
        let order = tables.insert_order(order);
        let items: Vec<OrderItem> = lines
            .into_iter()
            .map(|line| tables.insert_order_item(line.for_order(order.id)))
            .collect();
        tracing::info!(
            order_id = %order.id,
            user_id = %order.user_id,
            items = items.len(),
            total = %order.total,
            "Order placed"
        );
        Ok(OrderDetails { order, items })
    }
}
