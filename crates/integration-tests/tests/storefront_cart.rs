//! Cart and checkout endpoints through the full router.

#![allow(clippy::unwrap_used)]

use agrimart_integration_tests::TestClient;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_add_twice_merges_into_one_line() {
    let mut client = TestClient::new();

    for _ in 0..2 {
        let res = client
            .post_json("/cart/add", json!({ "productId": "1", "size": "5kg" }))
            .await;
        assert_eq!(res.status, StatusCode::OK);
    }

    let cart = client.get("/cart/items").await.json();
    let items = cart["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 2);
    assert_eq!(items[0]["productId"], "1");
    assert_eq!(cart["totalItems"], 2);
    assert_eq!(cart["totalPrice"], "2598");
    assert_eq!(cart["formattedTotal"], "₹2598.00");
}

#[tokio::test]
async fn test_add_rejects_unknown_product_and_size() {
    let mut client = TestClient::new();

    let res = client
        .post_json("/cart/add", json!({ "productId": "404", "size": "5kg" }))
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json()["success"], false);

    let res = client
        .post_json("/cart/add", json!({ "productId": "3", "size": "5kg" }))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let count = client.get("/cart/count").await.json();
    assert_eq!(count["count"], 0);
}

#[tokio::test]
async fn test_update_remove_and_clear() {
    let mut client = TestClient::new();
    client
        .post_json("/cart/add", json!({ "productId": "1", "size": "5kg" }))
        .await;
    client
        .post_json("/cart/add", json!({ "productId": "2", "size": "10kg" }))
        .await;

    let cart = client
        .post_json(
            "/cart/update",
            json!({ "productId": "1", "size": "5kg", "quantity": 5 }),
        )
        .await
        .json();
    assert_eq!(cart["totalItems"], 6);

    // Quantities below one are ignored
    let cart = client
        .post_json(
            "/cart/update",
            json!({ "productId": "1", "size": "5kg", "quantity": 0 }),
        )
        .await
        .json();
    assert_eq!(cart["totalItems"], 6);

    let cart = client
        .post_json("/cart/remove", json!({ "productId": "2", "size": "10kg" }))
        .await
        .json();
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);

    let cart = client.post("/cart/clear").await.json();
    assert_eq!(cart["totalItems"], 0);
    assert_eq!(client.get("/cart/count").await.json()["count"], 0);
}

#[tokio::test]
async fn test_carts_are_per_session() {
    let mut alice = TestClient::new();
    let mut bob = alice.fresh_visitor();

    alice
        .post_json("/cart/add", json!({ "productId": "1", "size": "1kg" }))
        .await;

    assert_eq!(alice.get("/cart/count").await.json()["count"], 1);
    assert_eq!(bob.get("/cart/count").await.json()["count"], 0);
}

#[tokio::test]
async fn test_checkout_requires_items_and_keeps_cart() {
    let mut client = TestClient::new();

    let res = client.post("/checkout").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    client
        .post_json("/cart/add", json!({ "productId": "3", "size": "Basic Set" }))
        .await;

    let res = client.post("/checkout").await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["message"], "Checkout functionality coming soon");
    assert_eq!(body["order"]["totalItems"], 1);
    assert_eq!(body["order"]["items"][0]["size"], "Basic Set");

    assert_eq!(client.get("/cart/count").await.json()["count"], 1);
}

#[tokio::test]
async fn test_cart_page_renders_lines() {
    let mut client = TestClient::new();

    let res = client.get("/cart").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("Your cart is empty"));

    client
        .post_json("/cart/add", json!({ "productId": "2", "size": "25kg" }))
        .await;

    let res = client.get("/cart").await;
    assert!(res.body.contains("Organic Fertilizer"));
    assert!(res.body.contains("₹1999.00"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_on_one_session_all_land() {
    let mut client = TestClient::new();
    client
        .post_json("/cart/add", json!({ "productId": "1", "size": "1kg" }))
        .await;

    // Several tabs of the same visitor adding at once
    let tabs: Vec<_> = (0..16)
        .map(|_| {
            let mut tab = client.same_session();
            tokio::spawn(async move {
                tab.post_json("/cart/add", json!({ "productId": "1", "size": "1kg" }))
                    .await
                    .status
            })
        })
        .collect();
    for tab in tabs {
        assert_eq!(tab.await.unwrap(), StatusCode::OK);
    }

    let cart = client.get("/cart/items").await.json();
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["totalItems"], 17);
}

#[tokio::test]
async fn test_update_and_remove_interleaved_on_one_session() {
    let mut client = TestClient::new();
    client
        .post_json("/cart/add", json!({ "productId": "1", "size": "5kg" }))
        .await;
    client
        .post_json("/cart/add", json!({ "productId": "2", "size": "10kg" }))
        .await;

    let mut tab = client.same_session();
    let (updated, removed) = tokio::join!(
        client.post_json(
            "/cart/update",
            json!({ "productId": "1", "size": "5kg", "quantity": 4 }),
        ),
        tab.post_json("/cart/remove", json!({ "productId": "2", "size": "10kg" })),
    );
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(removed.status, StatusCode::OK);

    let cart = client.get("/cart/items").await.json();
    let items = cart["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 4);
}

#[tokio::test]
async fn test_fractional_quantity_is_rejected() {
    let mut client = TestClient::new();
    client
        .post_json("/cart/add", json!({ "productId": "1", "size": "5kg" }))
        .await;

    let res = client
        .post_json(
            "/cart/update",
            json!({ "productId": "1", "size": "5kg", "quantity": 2.5 }),
        )
        .await;
    assert!(res.status.is_client_error());
    assert_eq!(client.get("/cart/count").await.json()["count"], 1);
}
