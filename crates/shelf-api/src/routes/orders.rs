//! Checkout and order tracking.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use shelf_commerce::checkout::{
    CheckoutRequest, FieldError, NewOrder, Order, OrderDetails, OrderStatus,
};
use shelf_commerce::ids::{OrderId, UserId};

use super::parse_id;
use crate::error::StoreResultExt;
use crate::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct OrderQuery {
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

/// Order history: one user's orders, or every order without `userId`.
pub(super) async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = match query.user_id.as_deref() {
        Some(raw) => {
            let user_id: UserId = parse_id(raw, "user")?;
            state.store.orders_by_user(user_id)
        }
        None => state.store.list_orders(),
    };
    Ok(Json(orders.or_internal("Error fetching orders")?))
}

/// Place an order from a checkout submission.
///
/// The submitted total is stored as given; a total that disagrees with the
/// items is only logged.
pub(super) async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderDetails>), ApiError> {
    let Json(body) = payload.map_err(|rejection| ApiError::Validation {
        message: "Invalid order data".to_string(),
        errors: vec![FieldError {
            field: String::new(),
            message: rejection.body_text(),
        }],
    })?;
    let request = CheckoutRequest::from_json(&body).map_err(ApiError::invalid_order)?;

    if !request.total_matches_items() {
        tracing::warn!(
            user_id = %request.user_id,
            submitted = %request.total,
            expected = %request.expected_total(),
            "Order total does not match its items"
        );
    }

    let details = state
        .store
        .place_order(
            NewOrder::pending(request.user_id, request.total),
            request.items,
        )
        .or_internal("Error creating order")?;
    Ok((StatusCode::CREATED, Json(details)))
}

pub(super) async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderDetails>, ApiError> {
    let order_id: OrderId = parse_id(&id, "order")?;
    state
        .store
        .order_details(order_id)
        .or_internal("Error fetching order")?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))
}

/// Move an order to `{"status": ...}`.
pub(super) async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Order>, ApiError> {
    let order_id: OrderId = parse_id(&id, "order")?;
    let status = payload
        .ok()
        .and_then(|Json(body)| body.get("status")?.as_str()?.parse::<OrderStatus>().ok())
        .ok_or_else(|| ApiError::BadRequest("Invalid status".to_string()))?;

    state
        .store
        .update_order_status(order_id, status)
        .or_internal("Error updating order status")?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))
}
