//! Product reviews.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use shelf_commerce::catalog::{Review, ReviewSubmission};
use shelf_commerce::ids::ProductId;

use super::parse_id;
use crate::error::StoreResultExt;
use crate::{ApiError, AppState};

/// Reviews of a product. An unknown product simply has none.
pub(super) async fn list_reviews(
    State(state): State<AppState>,
    Path(product): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let product_id: ProductId = parse_id(&product, "product")?;
    let reviews = state
        .store
        .reviews_by_product(product_id)
        .or_internal("Error fetching reviews")?;
    Ok(Json(reviews))
}

/// Add a review; the product's rating and review count follow.
pub(super) async fn create_review(
    State(state): State<AppState>,
    Path(product): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let product_id: ProductId = parse_id(&product, "product")?;
    let Json(body) = payload?;
    let submission: ReviewSubmission = serde_json::from_value(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid review data: {e}")))?;

    let review = state
        .store
        .create_review(submission.for_product(product_id))
        .or_internal("Error creating review")?;
    tracing::info!(
        review_id = %review.id,
        product_id = %product_id,
        rating = review.rating.get(),
        "Review created"
    );
    Ok((StatusCode::CREATED, Json(review)))
}
