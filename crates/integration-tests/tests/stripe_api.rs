//! End-to-end tests for the Stripe facade endpoints.
//!
//! Requests go through the full router (request id, tracing, JSON
//! extraction, error mapping) and out over HTTP to a mocked Stripe API.

#![allow(clippy::unwrap_used)]

use httpmock::Method::{GET, POST};
use paybridge_integration_tests::{TEST_SECRET_KEY, TestApp};
use reqwest::StatusCode;
use serde_json::{Value, json};

fn add_customer_body() -> Value {
    json!({
        "email": "ada@example.com",
        "name": "Ada Lovelace",
        "creditCard": {
            "name": "A. Lovelace",
            "cardNumber": "4242424242424242",
            "expirationYear": "2030",
            "expirationMonth": "12",
            "cvc": "314"
        }
    })
}

fn add_payment_body() -> Value {
    json!({
        "customerId": "cus_123",
        "receiptEmail": "receipts@example.com",
        "description": "Order #1001",
        "currency": "USD",
        "amount": 1999
    })
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::spawn().await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_inbound_request_id_is_echoed() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .get(app.url("/health"))
        .header("x-request-id", "trace-42")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.headers()["x-request-id"], "trace-42");
}

// ============================================================================
// POST /api/stripe/customer/add
// ============================================================================

#[tokio::test]
async fn test_add_customer() {
    let app = TestApp::spawn().await;
    let token_mock = app
        .stripe
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/tokens")
                .header("authorization", format!("Bearer {TEST_SECRET_KEY}"))
                .x_www_form_urlencoded_tuple("card[name]", "Ada Lovelace")
                .x_www_form_urlencoded_tuple("card[number]", "4242424242424242")
                .x_www_form_urlencoded_tuple("card[cvc]", "314");
            then.status(200)
                .json_body(json!({"id": "tok_visa", "object": "token"}));
        })
        .await;
    let customer_mock = app
        .stripe
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/customers")
                .x_www_form_urlencoded_tuple("email", "ada@example.com")
                .x_www_form_urlencoded_tuple("name", "Ada Lovelace")
                .x_www_form_urlencoded_tuple("source", "tok_visa");
            then.status(200).json_body(json!({
                "id": "cus_new",
                "object": "customer",
                "name": "Ada Lovelace",
                "email": "ada@example.com"
            }));
        })
        .await;

    let resp = app
        .client
        .post(app.url("/api/stripe/customer/add"))
        .json(&add_customer_body())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    token_mock.assert_async().await;
    customer_mock.assert_async().await;
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "customerId": "cus_new"
        })
    );
}

#[tokio::test]
async fn test_add_customer_declined_card_is_bad_request() {
    let app = TestApp::spawn().await;
    app.stripe
        .mock_async(|when, then| {
            when.method(POST).path("/v1/tokens");
            then.status(402).json_body(json!({
                "error": {
                    "type": "card_error",
                    "code": "card_declined",
                    "decline_code": "insufficient_funds",
                    "message": "Your card has insufficient funds."
                }
            }));
        })
        .await;
    let customer_mock = app
        .stripe
        .mock_async(|when, then| {
            when.method(POST).path("/v1/customers");
            then.status(200).json_body(json!({"id": "cus_never"}));
        })
        .await;

    let resp = app
        .client
        .post(app.url("/api/stripe/customer/add"))
        .json(&add_customer_body())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await.unwrap(), "Your card has insufficient funds.");
    customer_mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_add_customer_forwards_idempotency_key() {
    let app = TestApp::spawn().await;
    let token_mock = app
        .stripe
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/tokens")
                .header("idempotency-key", "signup-9-token");
            then.status(200).json_body(json!({"id": "tok_1"}));
        })
        .await;
    let customer_mock = app
        .stripe
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/customers")
                .header("idempotency-key", "signup-9-customer");
            then.status(200).json_body(json!({"id": "cus_1"}));
        })
        .await;

    let resp = app
        .client
        .post(app.url("/api/stripe/customer/add"))
        .header("Idempotency-Key", "signup-9")
        .json(&add_customer_body())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    token_mock.assert_async().await;
    customer_mock.assert_async().await;
}

#[tokio::test]
async fn test_add_customer_invalid_json_never_reaches_stripe() {
    let app = TestApp::spawn().await;
    let token_mock = app
        .stripe
        .mock_async(|when, then| {
            when.method(POST).path("/v1/tokens");
            then.status(200).json_body(json!({"id": "tok_1"}));
        })
        .await;

    let mut body = add_customer_body();
    body["email"] = json!("not-an-email");

    let resp = app
        .client
        .post(app.url("/api/stripe/customer/add"))
        .json(&body)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    token_mock.assert_hits_async(0).await;
}

// ============================================================================
// POST /api/stripe/payment/add
// ============================================================================

#[tokio::test]
async fn test_add_payment() {
    let app = TestApp::spawn().await;
    let charge_mock = app
        .stripe
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/charges")
                .x_www_form_urlencoded_tuple("customer", "cus_123")
                .x_www_form_urlencoded_tuple("currency", "usd")
                .x_www_form_urlencoded_tuple("amount", "1999");
            then.status(200).json_body(json!({
                "id": "ch_1",
                "object": "charge",
                "customer": "cus_123",
                "receipt_email": "receipts@example.com",
                "description": "Order #1001",
                "currency": "usd",
                "amount": 1999,
                "status": "succeeded"
            }));
        })
        .await;

    let resp = app
        .client
        .post(app.url("/api/stripe/payment/add"))
        .json(&add_payment_body())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    charge_mock.assert_async().await;
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({
            "customerId": "cus_123",
            "receiptEmail": "receipts@example.com",
            "description": "Order #1001",
            "currency": "usd",
            "amount": 1999,
            "paymentId": "ch_1"
        })
    );
}

#[tokio::test]
async fn test_add_payment_unknown_customer_is_bad_request() {
    let app = TestApp::spawn().await;
    app.stripe
        .mock_async(|when, then| {
            when.method(POST).path("/v1/charges");
            then.status(400).json_body(json!({
                "error": {
                    "type": "invalid_request_error",
                    "code": "resource_missing",
                    "param": "customer",
                    "message": "No such customer: 'cus_123'"
                }
            }));
        })
        .await;

    let resp = app
        .client
        .post(app.url("/api/stripe/payment/add"))
        .json(&add_payment_body())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await.unwrap(), "No such customer: 'cus_123'");
}

#[tokio::test]
async fn test_add_payment_provider_outage_is_bad_request_with_generic_message() {
    let app = TestApp::spawn().await;
    app.stripe
        .mock_async(|when, then| {
            when.method(POST).path("/v1/charges");
            then.status(500).json_body(json!({
                "error": {"type": "api_error", "message": "Internal details"}
            }));
        })
        .await;

    let resp = app
        .client
        .post(app.url("/api/stripe/payment/add"))
        .json(&add_payment_body())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.text().await.unwrap(),
        "An error occurred while processing the payment."
    );
}

#[tokio::test]
async fn test_add_payment_rejects_non_positive_amount() {
    let app = TestApp::spawn().await;
    let charge_mock = app
        .stripe
        .mock_async(|when, then| {
            when.method(POST).path("/v1/charges");
            then.status(200).json_body(json!({"id": "ch_never"}));
        })
        .await;

    let mut body = add_payment_body();
    body["amount"] = json!(0);

    let resp = app
        .client
        .post(app.url("/api/stripe/payment/add"))
        .json(&body)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    charge_mock.assert_hits_async(0).await;
}

// ============================================================================
// GET /api/stripe/customer/{customerId}
// ============================================================================

#[tokio::test]
async fn test_get_customer() {
    let app = TestApp::spawn().await;
    app.stripe
        .mock_async(|when, then| {
            when.method(GET).path("/v1/customers/cus_123");
            then.status(200).json_body(json!({
                "id": "cus_123",
                "object": "customer",
                "name": null,
                "email": "ada@example.com"
            }));
        })
        .await;

    let resp = app
        .client
        .get(app.url("/api/stripe/customer/cus_123"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({"name": null, "email": "ada@example.com", "customerId": "cus_123"})
    );
}

#[tokio::test]
async fn test_get_customer_missing_is_bad_request() {
    let app = TestApp::spawn().await;
    app.stripe
        .mock_async(|when, then| {
            when.method(GET).path("/v1/customers/cus_missing");
            then.status(404).json_body(json!({
                "error": {
                    "type": "invalid_request_error",
                    "code": "resource_missing",
                    "param": "id",
                    "message": "No such customer: 'cus_missing'"
                }
            }));
        })
        .await;

    let resp = app
        .client
        .get(app.url("/api/stripe/customer/cus_missing"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await.unwrap(), "No such customer: 'cus_missing'");
}

// ============================================================================
// GET /api/stripe/paymentIntent/{paymentIntentId}
// ============================================================================

#[tokio::test]
async fn test_get_payment_intent() {
    let app = TestApp::spawn().await;
    app.stripe
        .mock_async(|when, then| {
            when.method(GET).path("/v1/payment_intents/pi_9");
            then.status(200).json_body(json!({
                "id": "pi_9",
                "object": "payment_intent",
                "amount": 5000,
                "amount_received": 0,
                "currency": "eur",
                "status": "requires_payment_method",
                "customer": null,
                "description": null,
                "receipt_email": null,
                "created": 1_700_000_000,
                "client_secret": "pi_9_secret_shh"
            }));
        })
        .await;

    let resp = app
        .client
        .get(app.url("/api/stripe/paymentIntent/pi_9"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.json::<Value>().await.unwrap();
    assert_eq!(body["paymentIntentId"], "pi_9");
    assert_eq!(body["amount"], 5000);
    assert_eq!(body["amountReceived"], 0);
    assert_eq!(body["currency"], "eur");
    assert_eq!(body["status"], "requires_payment_method");
    assert_eq!(body["created"], "2023-11-14T22:13:20Z");
    assert!(body.get("clientSecret").is_none());
}

#[tokio::test]
async fn test_get_payment_intent_bad_key_is_bad_request() {
    let app = TestApp::spawn().await;
    app.stripe
        .mock_async(|when, then| {
            when.method(GET).path("/v1/payment_intents/pi_9");
            then.status(401).json_body(json!({
                "error": {
                    "type": "invalid_request_error",
                    "message": "Invalid API Key provided: sk_test_****"
                }
            }));
        })
        .await;

    let resp = app
        .client
        .get(app.url("/api/stripe/paymentIntent/pi_9"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.text().await.unwrap(),
        "Authentication with the payment provider failed."
    );
}
