//! The typed client against a live server on an ephemeral port.

use shelf_api::{AppState, Server, ServerConfig};
use shelf_client::{ApiClient, ClientError};
use shelf_commerce::prelude::*;
use tokio::sync::oneshot;

async fn spawn_server() -> (ApiClient, oneshot::Sender<()>) {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    };
    let server = Server::bind(&config, AppState::seeded()).await.unwrap();
    let addr = server.local_addr().unwrap();

    let (stop, stopped) = oneshot::channel::<()>();
    tokio::spawn(server.run_until(async {
        let _ = stopped.await;
    }));

    (ApiClient::new(format!("http://{addr}")).unwrap(), stop)
}

#[tokio::test]
async fn test_cart_checkout_round_trip() {
    let (client, _stop) = spawn_server().await;
    assert_eq!(client.health().await.unwrap().status, "ok");

    let python = client.product("python-for-beginners").await.unwrap().unwrap();
    let template = client
        .product("professional-ecommerce-template")
        .await
        .unwrap()
        .unwrap();

    let mut cart = Cart::new();
    cart.add_item(&python, 1);
    cart.add_item(&template, 3);
    assert_eq!(cart.totals().total.amount_cents, 62790);

    let details = client
        .place_order(&cart.to_checkout_request(DEMO_USER_ID))
        .await
        .unwrap();
    assert_eq!(details.order.status, OrderStatus::Pending);
    assert_eq!(details.order.total.amount_cents, 62790);
    assert_eq!(details.item_count(), 4);

    let fetched = client.order(details.order.id).await.unwrap().unwrap();
    assert_eq!(fetched, details);

    let cancelled = client
        .update_order_status(details.order.id, OrderStatus::Cancelled)
        .await
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    let history = client.orders_for_user(DEMO_USER_ID).await.unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn test_client_surfaces_server_errors() {
    let (client, _stop) = spawn_server().await;

    assert_eq!(client.product("missing").await.unwrap(), None);
    assert_eq!(client.order(OrderId::new(42)).await.unwrap(), None);

    // Slugs are sent as one path segment, never as a query or extra segments
    assert_eq!(client.product("python-for-beginners?x=1").await.unwrap(), None);
    assert_eq!(client.product("python-for-beginners/reviews").await.unwrap(), None);
    assert_eq!(client.category("programming?").await.unwrap(), None);

    let err = client
        .update_order_status(OrderId::new(42), OrderStatus::Completed)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = client
        .place_order(&CheckoutRequest {
            user_id: DEMO_USER_ID,
            total: Money::from_cents(0),
            items: vec![OrderLine {
                product_id: ProductId::new(1),
                quantity: 0,
                price: Money::from_cents(8900),
            }],
        })
        .await
        .unwrap_err();
    match err {
        ClientError::HttpError {
            status,
            message,
            errors,
        } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid order data");
            assert_eq!(errors[0].field, "items.0.quantity");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_client_reviews() {
    let (client, _stop) = spawn_server().await;
    let review = client
        .create_review(
            ProductId::new(9),
            &ReviewSubmission {
                user_id: DEMO_USER_ID,
                rating: Rating::new(3).unwrap(),
                comment: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(review.product_id, ProductId::new(9));

    let reviews = client.reviews(ProductId::new(9)).await.unwrap();
    assert_eq!(reviews.len(), 2);
}
