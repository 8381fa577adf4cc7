//! Router-level tests for the checkout endpoint.

mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use common::TestApp;
use http_body_util::BodyExt;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

async fn send_json(app: &TestApp, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");

    let response = app.router().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body bytes")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

fn checkout_body(user_id: Uuid, total: Option<&str>) -> Value {
    let mut body = json!({
        "user_id": user_id.to_string(),
        "shipping_address": {
            "line1": "Rua Augusta 100",
            "city": "Lisbon",
            "postal_code": "1100-053",
            "country": "PT"
        },
        "payment_id": Uuid::new_v4().to_string(),
    });
    if let Some(total) = total {
        body["total"] = json!(total);
    }
    body
}

#[tokio::test]
async fn post_checkout_returns_created_summary() {
    let app = TestApp::new().await;
    let user_id = Uuid::new_v4();
    let cart_id = app.seed_cart(user_id).await;
    let (_, variant_id) = app.seed_supplier_variant("HTTP-1", dec!(4.99)).await;
    app.seed_cart_item(cart_id, variant_id, 2, dec!(4.99), dec!(0)).await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/v1/checkout",
        checkout_body(user_id, None),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["grand_total"], json!("9.98"));
    assert_eq!(body["data"]["items_count"], json!(1));
    assert_eq!(
        body["data"]["supplier_order_ids"].as_array().unwrap().len(),
        1
    );
}

#[tokio::test]
async fn post_checkout_total_mismatch_returns_unprocessable() {
    let app = TestApp::new().await;
    let user_id = Uuid::new_v4();
    let cart_id = app.seed_cart(user_id).await;
    let (_, variant_id) = app.seed_supplier_variant("HTTP-2", dec!(4.99)).await;
    app.seed_cart_item(cart_id, variant_id, 4, dec!(4.99), dec!(0)).await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/v1/checkout",
        checkout_body(user_id, Some("999.99")),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["expected_total"], json!("19.96"));
    assert_eq!(body["details"]["received_total"], json!("999.99"));
}

#[tokio::test]
async fn post_checkout_without_cart_returns_not_found() {
    let app = TestApp::new().await;

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/v1/checkout",
        checkout_body(Uuid::new_v4(), None),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_endpoint_reports_up() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .expect("request");
    let response = app.router().oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::OK);
}
