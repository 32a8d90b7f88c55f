use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use coinramp_common::services::{
    BoxFuture, EphemeralKey, PaymentIntentParams, PaymentIntentResult, PaymentsGateway,
    ProviderCustomer,
};
use coinramp_config::{AppConfig, ServerConfig, StripeConfig, DEFAULT_STRIPE_API_BASE_URL};
use coinramp_stripe::{routes, routes_with_gateway, StripeError};
use hmac::{Hmac, Mac};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sha2::Sha256;
use std::sync::Arc;
use tower::ServiceExt;

const WEBHOOK_SECRET: &str = "whsec_api_test";

/// Answers every call successfully, or with a Stripe error when `decline` is set.
struct FakeGateway {
    decline: bool,
}

impl PaymentsGateway for FakeGateway {
    type Error = StripeError;

    fn create_customer(&self) -> BoxFuture<'_, ProviderCustomer, Self::Error> {
        Box::pin(async {
            Ok(ProviderCustomer {
                id: "cus_fake".to_string(),
            })
        })
    }

    fn create_ephemeral_key(
        &self,
        _customer_id: &str,
        _api_version: &str,
    ) -> BoxFuture<'_, EphemeralKey, Self::Error> {
        Box::pin(async {
            Ok(EphemeralKey {
                id: "ephkey_fake".to_string(),
                secret: "ek_fake_secret".to_string(),
            })
        })
    }

    fn create_payment_intent(
        &self,
        params: PaymentIntentParams,
    ) -> BoxFuture<'_, PaymentIntentResult, Self::Error> {
        let decline = self.decline;
        Box::pin(async move {
            if decline {
                return Err(StripeError::ApiError {
                    status_code: 402,
                    message: "Your card was declined.".to_string(),
                });
            }
            Ok(PaymentIntentResult {
                id: "pi_fake".to_string(),
                status: "requires_payment_method".to_string(),
                amount: params.amount,
                currency: params.currency,
                client_secret: Some("pi_fake_secret_xyz".to_string()),
            })
        })
    }
}

fn stripe_config(webhook_secret: Option<&str>) -> StripeConfig {
    StripeConfig {
        secret_key: "sk_test_123".to_string(),
        publishable_key: "pk_test_456".to_string(),
        webhook_secret: webhook_secret.map(String::from),
        api_base_url: DEFAULT_STRIPE_API_BASE_URL.to_string(),
        api_version: "2020-08-27".to_string(),
    }
}

fn app(decline: bool, webhook_secret: Option<&str>) -> Router {
    routes_with_gateway(
        stripe_config(webhook_secret),
        Arc::new(FakeGateway { decline }),
    )
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn sign(payload: &str, timestamp: i64) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(WEBHOOK_SECRET.as_bytes()).unwrap();
    mac.update(format!("{}.{}", timestamp, payload).as_bytes());
    format!(
        "t={},v1={}",
        timestamp,
        hex::encode(mac.finalize().into_bytes())
    )
}

#[tokio::test]
async fn test_purchase_intent_success() {
    let response = app(false, None)
        .oneshot(json_request(
            "/stripe/purchase-intent",
            json!({"amount": 19.99, "currency": "USD", "cryptoSymbol": "BTC", "cryptoAmount": 0.001}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "clientSecret": "pi_fake_secret_xyz",
            "ephemeralSecret": "ek_fake_secret",
            "customerId": "cus_fake",
            "publishableKey": "pk_test_456"
        })
    );
}

#[tokio::test]
async fn test_purchase_intent_invalid_amount() {
    let response = app(false, None)
        .oneshot(json_request(
            "/stripe/purchase-intent",
            json!({"amount": 0, "currency": "USD", "cryptoSymbol": "BTC", "cryptoAmount": 0.001}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Amount must be greater than 0");
    assert_eq!(body["error"]["code"], 400);
}

#[tokio::test]
async fn test_purchase_intent_missing_crypto_details() {
    let response = app(false, None)
        .oneshot(json_request(
            "/stripe/purchase-intent",
            json!({"amount": 10, "currency": "eur"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Crypto symbol and amount are required");
}

#[tokio::test]
async fn test_purchase_intent_unsupported_currency() {
    let response = app(false, None)
        .oneshot(json_request(
            "/stripe/purchase-intent",
            json!({"amount": 10, "currency": "JPY", "cryptoSymbol": "BTC", "cryptoAmount": 1}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Currency must be one of USD, EUR, GBP");
}

#[tokio::test]
async fn test_purchase_intent_zero_amount_wins_over_unsupported_currency() {
    let response = app(false, None)
        .oneshot(json_request(
            "/stripe/purchase-intent",
            json!({"amount": 0, "currency": "JPY", "cryptoSymbol": "BTC", "cryptoAmount": 1}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Amount must be greater than 0");
}

#[tokio::test]
async fn test_purchase_intent_malformed_body() {
    let response = app(false, None)
        .oneshot(json_request(
            "/stripe/purchase-intent",
            json!({"amount": "lots", "currency": "USD"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_purchase_intent_stripe_error_status_passes_through() {
    let response = app(true, None)
        .oneshot(json_request(
            "/stripe/purchase-intent",
            json!({"amount": 10, "currency": "USD", "cryptoSymbol": "BTC", "cryptoAmount": 1}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    let body = body_json(response).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Your card was declined."));
}

#[tokio::test]
async fn test_webhook_with_valid_signature() {
    let payload = json!({
        "id": "evt_1",
        "type": "payment_intent.succeeded",
        "created": 1_700_000_000,
        "livemode": false,
        "data": { "object": {
            "id": "pi_fake",
            "amount": 1999,
            "currency": "usd",
            "status": "succeeded",
            "metadata": { "type": "crypto_purchase", "cryptoSymbol": "BTC", "cryptoAmount": "0.001" }
        }}
    })
    .to_string();
    let signature = sign(&payload, chrono::Utc::now().timestamp());

    let response = app(false, Some(WEBHOOK_SECRET))
        .oneshot(
            Request::post("/stripe/webhook")
                .header("Stripe-Signature", signature)
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "received": true }));
}

#[tokio::test]
async fn test_webhook_with_bad_signature() {
    let response = app(false, Some(WEBHOOK_SECRET))
        .oneshot(
            Request::post("/stripe/webhook")
                .header("Stripe-Signature", "t=1,v1=deadbeef")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_webhook_with_malformed_payload() {
    let payload = "not an event";
    let response = app(false, Some(WEBHOOK_SECRET))
        .oneshot(
            Request::post("/stripe/webhook")
                .header("Stripe-Signature", sign(payload, chrono::Utc::now().timestamp()))
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_webhook_without_configured_secret() {
    // An unresolved env marker counts as not configured
    let response = app(false, Some("secret_from_env"))
        .oneshot(
            Request::post("/stripe/webhook")
                .header("Stripe-Signature", "t=1,v1=deadbeef")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_routes_require_stripe_section() {
    let config = AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        },
        logging: Default::default(),
        use_stripe: true,
        stripe: None,
    };

    assert!(matches!(
        routes(Arc::new(config)),
        Err(StripeError::ConfigError(_))
    ));
}
