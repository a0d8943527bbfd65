//! Router-level tests against the seeded in-memory store.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use shelf_api::{router, AppState};
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::seeded())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

async fn place_order(app: &Router, body: Value) -> (StatusCode, Value) {
    send(app, "POST", "/api/orders", Some(body)).await
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(&app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_catalog_listing() {
    let app = app();

    let (status, categories) = get(&app, "/api/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(categories.as_array().unwrap().len(), 3);

    let (_, products) = get(&app, "/api/products").await;
    assert_eq!(products.as_array().unwrap().len(), 16);

    let (_, featured) = get(&app, "/api/products/featured").await;
    assert!(featured
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["isFeatured"] == json!(true)));

    let (_, bestsellers) = get(&app, "/api/products/bestsellers").await;
    assert!(bestsellers
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["isBestseller"] == json!(true)));
}

#[tokio::test]
async fn test_products_by_category() {
    let app = app();
    let (_, category) = get(&app, "/api/categories/programming").await;
    let id = category["id"].as_u64().unwrap();

    let (status, products) = get(&app, &format!("/api/products?categoryId={id}")).await;
    assert_eq!(status, StatusCode::OK);
    let products = products.as_array().unwrap();
    assert!(!products.is_empty());
    assert!(products.iter().all(|p| p["categoryId"] == json!(id)));

    let (status, _) = get(&app, "/api/products?categoryId=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_category_filter_lists_everything() {
    let (status, products) = get(&app(), "/api/products?categoryId=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(products.as_array().unwrap().len(), 16);
}

#[tokio::test]
async fn test_product_by_slug() {
    let (status, product) = get(&app(), "/api/products/python-for-beginners").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["price"], json!(99));
    assert_eq!(product["type"], json!("ebook"));
}

#[tokio::test]
async fn test_not_found_messages() {
    let app = app();
    let cases = [
        ("/api/categories/no-such-category", "Category not found"),
        ("/api/products/no-such-product", "Product not found"),
        ("/api/orders/999", "Order not found"),
        ("/api/nowhere", "Not found"),
    ];
    for (uri, message) in cases {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["message"], json!(message), "{uri}");
    }
}

#[tokio::test]
async fn test_non_numeric_order_id_is_bad_request() {
    let (status, body) = get(&app(), "/api/orders/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Invalid order id"));
}

#[tokio::test]
async fn test_submitted_total_is_stored_as_given() {
    let app = app();
    let (status, created) = place_order(
        &app,
        json!({
            "userId": 1,
            "total": 150,
            "items": [
                {"productId": 2, "quantity": 1, "price": 99},
                {"productId": 7, "quantity": 1, "price": 149}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["order"]["total"], json!(150));
    assert_eq!(created["order"]["status"], json!("pending"));
    assert_eq!(created["items"].as_array().unwrap().len(), 2);

    let id = created["order"]["id"].as_u64().unwrap();
    let (status, fetched) = get(&app, &format!("/api/orders/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_order_items_keep_submitted_quantities_and_prices() {
    let app = app();
    let (status, created) = place_order(
        &app,
        json!({
            "userId": 1,
            "total": 627.9,
            "items": [
                {"productId": 2, "quantity": 1, "price": 99},
                {"productId": 7, "quantity": 3, "price": 149}
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let items = created["items"].as_array().unwrap();
    let order_id = &created["order"]["id"];
    assert_eq!(items[0]["productId"], json!(2));
    assert_eq!(items[0]["quantity"], json!(1));
    assert_eq!(items[0]["price"], json!(99));
    assert_eq!(items[1]["productId"], json!(7));
    assert_eq!(items[1]["quantity"], json!(3));
    assert_eq!(items[1]["price"], json!(149));
    assert!(items.iter().all(|item| &item["orderId"] == order_id));
    assert_eq!(created["order"]["total"], json!(627.9));
}

#[tokio::test]
async fn test_invalid_order_lists_fields_and_creates_nothing() {
    let app = app();
    let (status, body) = place_order(
        &app,
        json!({
            "userId": "one",
            "items": [{"productId": 2, "quantity": 0, "price": 99}]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Invalid order data"));
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"userId"));
    assert!(fields.contains(&"total"));
    assert!(fields.contains(&"items.0.quantity"));

    let (_, orders) = get(&app, "/api/orders").await;
    assert_eq!(orders, json!([]));
}

#[tokio::test]
async fn test_malformed_order_body_is_invalid_order_data() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/orders")
        .header("content-type", "application/json")
        .body(Body::from("{\"userId\": 1,"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_transitions() {
    let app = app();
    let (_, created) = place_order(
        &app,
        json!({
            "userId": 1,
            "total": 113.85,
            "items": [{"productId": 2, "quantity": 1, "price": 99}],
        }),
    )
    .await;
    let id = created["order"]["id"].as_u64().unwrap();
    let uri = format!("/api/orders/{id}/status");

    // Unknown status leaves the order untouched
    let (status, body) = send(&app, "PATCH", &uri, Some(json!({"status": "shipped"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Invalid status"));
    let (_, fetched) = get(&app, &format!("/api/orders/{id}")).await;
    assert_eq!(fetched["order"]["status"], json!("pending"));

    let (status, order) = send(&app, "PATCH", &uri, Some(json!({"status": "completed"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], json!("completed"));

    // Terminal orders only accept their current status
    let (status, _) = send(&app, "PATCH", &uri, Some(json!({"status": "cancelled"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, _) = send(&app, "PATCH", &uri, Some(json!({"status": "completed"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, fetched) = get(&app, &format!("/api/orders/{id}")).await;
    assert_eq!(fetched["order"]["status"], json!("completed"));
}

#[tokio::test]
async fn test_status_of_unknown_order() {
    let (status, body) = send(
        &app(),
        "PATCH",
        "/api/orders/999/status",
        Some(json!({"status": "completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Order not found"));
}

#[tokio::test]
async fn test_orders_by_user() {
    let app = app();
    for user_id in [1, 1, 2] {
        let (status, _) = place_order(
            &app,
            json!({"userId": user_id, "total": 0, "items": []}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, mine) = get(&app, "/api/orders?userId=1").await;
    assert_eq!(mine.as_array().unwrap().len(), 2);
    let (_, all) = get(&app, "/api/orders").await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_reviews_recompute_product_rating() {
    let app = app();
    let (_, reviews) = get(&app, "/api/products/1/reviews").await;
    assert_eq!(reviews.as_array().unwrap().len(), 1);

    let (status, review) = send(
        &app,
        "POST",
        "/api/products/1/reviews",
        Some(json!({"userId": 1, "rating": 3, "comment": "Good but long"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(review["productId"], json!(1));
    assert_eq!(review["rating"], json!(3));

    let (_, product) = get(&app, "/api/products/javascript-from-zero-to-hero").await;
    assert_eq!(product["reviewCount"], json!(2));
    assert_eq!(product["rating"], json!(4.0));
}

#[tokio::test]
async fn test_invalid_reviews() {
    let app = app();
    let (status, _) = send(
        &app,
        "POST",
        "/api/products/1/reviews",
        Some(json!({"userId": 1, "rating": 6})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/products/1/reviews",
        Some(json!({"userId": 0, "rating": 4})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, reviews) = get(&app, "/api/products/1/reviews").await;
    assert_eq!(reviews.as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        "POST",
        "/api/products/999/reviews",
        Some(json!({"userId": 1, "rating": 4})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Product not found"));

    let (status, _) = get(&app, "/api/products/abc/reviews").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
