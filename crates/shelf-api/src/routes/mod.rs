//! HTTP routes.

use std::str::FromStr;

use axum::{
    routing::{get, patch},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{ApiError, AppState};

mod catalog;
mod health;
mod orders;
mod reviews;

/// Build the API router over the given state.
///
/// Static product paths are matched before `{product}`, so `featured` and
/// `bestsellers` never resolve as slugs.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        // Catalog
        .route("/api/categories", get(catalog::list_categories))
        .route("/api/categories/{slug}", get(catalog::get_category))
        .route("/api/products", get(catalog::list_products))
        .route("/api/products/featured", get(catalog::featured_products))
        .route("/api/products/bestsellers", get(catalog::bestseller_products))
        .route("/api/products/{product}", get(catalog::get_product))
        // Reviews; `{product}` is the product id here
        .route(
            "/api/products/{product}/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        // Orders
        .route(
            "/api/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .route("/api/orders/{id}", get(orders::get_order))
        .route("/api/orders/{id}/status", patch(orders::update_status))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

/// Parse a path or query identifier, rejecting anything but a positive integer.
fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid {what} id")))
}
