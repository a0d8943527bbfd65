//! HTTP client for the Shelf storefront API.
//!
//! Wraps every REST endpoint in a typed async method with the API's JSON
//! shapes decoded into `shelf-commerce` types.
//!
//! # Example
//!
//! ```rust,ignore
//! use shelf_client::ApiClient;
//!
//! let client = ApiClient::new("http://127.0.0.1:5000")?;
//!
//! let featured = client.featured_products().await?;
//! let details = client.place_order(&cart.to_checkout_request(DEMO_USER_ID)).await?;
//! println!("Order #{} is {}", details.order.id, details.order.status.display_name());
//! ```

mod error;
mod response;

pub use error::ClientError;

use reqwest::{Client, Url};
use serde::Deserialize;
use shelf_commerce::catalog::{Category, Product, Review, ReviewSubmission};
use shelf_commerce::checkout::{CheckoutRequest, Order, OrderDetails, OrderStatus};
use shelf_commerce::ids::{CategoryId, OrderId, ProductId, UserId};

/// Where the API listens unless configured otherwise.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Response of the liveness endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Health {
    pub status: String,
}

/// Typed client for the storefront REST API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// Create a client for the API at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_http_client(base_url, Client::new())
    }

    /// Create a client reusing an existing `reqwest` client.
    pub fn with_http_client(
        base_url: impl Into<String>,
        http: Client,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(base_url));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// The API root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build an endpoint URL from path segments, percent-encoding each one so
    /// user input such as a slug cannot change the route or add a query.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let invalid = || ClientError::InvalidUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        tracing::debug!(path, "GET");
        response::json(self.http.get(self.url(path)).send().await?).await
    }

    async fn get_optional<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<Option<T>, ClientError> {
        tracing::debug!(path = url.path(), "GET");
        response::json_optional(self.http.get(url).send().await?).await
    }

    /// Check that the API is up.
    pub async fn health(&self) -> Result<Health, ClientError> {
        self.get("/health").await
    }

    // Catalog

    pub async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        self.get("/api/categories").await
    }

    pub async fn category(&self, slug: &str) -> Result<Option<Category>, ClientError> {
        self.get_optional(self.endpoint(&["api", "categories", slug])?)
            .await
    }

    /// All products, or those in one category.
    pub async fn products(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<Product>, ClientError> {
        match category {
            Some(id) => self.get(&format!("/api/products?categoryId={id}")).await,
            None => self.get("/api/products").await,
        }
    }

    pub async fn featured_products(&self) -> Result<Vec<Product>, ClientError> {
        self.get("/api/products/featured").await
    }

    pub async fn bestseller_products(&self) -> Result<Vec<Product>, ClientError> {
        self.get("/api/products/bestsellers").await
    }

    pub async fn product(&self, slug: &str) -> Result<Option<Product>, ClientError> {
        self.get_optional(self.endpoint(&["api", "products", slug])?)
            .await
    }

    // Reviews

    pub async fn reviews(&self, product_id: ProductId) -> Result<Vec<Review>, ClientError> {
        self.get(&format!("/api/products/{product_id}/reviews")).await
    }

    pub async fn create_review(
        &self,
        product_id: ProductId,
        review: &ReviewSubmission,
    ) -> Result<Review, ClientError> {
        let response = self
            .http
            .post(self.url(&format!("/api/products/{product_id}/reviews")))
            .json(review)
            .send()
            .await?;
        response::json(response).await
    }

    // Orders

    /// Submit a checkout. Returns the created order and its items.
    pub async fn place_order(
        &self,
        request: &CheckoutRequest,
    ) -> Result<OrderDetails, ClientError> {
        tracing::debug!(items = request.items.len(), total = %request.total, "Placing order");
        let response = self
            .http
            .post(self.url("/api/orders"))
            .json(request)
            .send()
            .await?;
        response::json(response).await
    }

    pub async fn order(&self, id: OrderId) -> Result<Option<OrderDetails>, ClientError> {
        self.get_optional(self.endpoint(&["api", "orders", &id.to_string()])?)
            .await
    }

    pub async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>, ClientError> {
        self.get(&format!("/api/orders?userId={user_id}")).await
    }

    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, ClientError> {
        let response = self
            .http
            .patch(self.url(&format!("/api/orders/{id}/status")))
            .json(&serde_json::json!({ "status": status.as_str() }))
            .send()
            .await?;
        response::json(response).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiClient, ClientError, Health, DEFAULT_API_URL};
}
