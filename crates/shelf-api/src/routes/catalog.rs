//! Category and product lookups.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shelf_commerce::catalog::{Category, Product};
use shelf_commerce::ids::CategoryId;

use super::parse_id;
use crate::error::StoreResultExt;
use crate::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ProductQuery {
    #[serde(rename = "categoryId")]
    category_id: Option<String>,
}

pub(super) async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state
        .store
        .list_categories()
        .or_internal("Error fetching categories")?;
    Ok(Json(categories))
}

pub(super) async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Category>, ApiError> {
    state
        .store
        .get_category_by_slug(&slug)
        .or_internal("Error fetching category")?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))
}

/// All products, or one category's when `categoryId` is given. An empty
/// `categoryId` counts as absent.
pub(super) async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = match query.category_id.as_deref().filter(|raw| !raw.is_empty()) {
        Some(raw) => {
            let category_id: CategoryId = parse_id(raw, "category")?;
            state.store.products_by_category(category_id)
        }
        None => state.store.list_products(),
    };
    Ok(Json(products.or_internal("Error fetching products")?))
}

pub(super) async fn featured_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state
        .store
        .featured_products()
        .or_internal("Error fetching featured products")?;
    Ok(Json(products))
}

pub(super) async fn bestseller_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state
        .store
        .bestseller_products()
        .or_internal("Error fetching bestseller products")?;
    Ok(Json(products))
}

pub(super) async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Product>, ApiError> {
    state
        .store
        .get_product_by_slug(&slug)
        .or_internal("Error fetching product")?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))
}
