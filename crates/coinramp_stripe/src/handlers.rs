// --- File: crates/coinramp_stripe/src/handlers.rs ---
use axum::{
    extract::State,
    http::HeaderMap,
    response::Json,
};
use coinramp_common::{map_json_error, CoinrampError};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::StripeError;
use crate::logic::{CreatePurchaseIntentRequest, CreatePurchaseIntentResponse, PurchaseIntentService};
use crate::webhook::{process_stripe_webhook, verify_stripe_signature, StripeEvent};

const STRIPE_SIGNATURE_HEADER: &str = "Stripe-Signature";

// --- State for Stripe Handlers ---
pub struct StripeState {
    pub service: Arc<PurchaseIntentService>,
    /// `None` when no usable signing secret is configured; webhooks are then rejected.
    pub webhook_secret: Option<String>,
}

/// Axum handler to create a payment intent for a crypto purchase.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/stripe/purchase-intent", // Path relative to /api
    request_body = CreatePurchaseIntentRequest,
    responses(
        (status = 200, description = "Payment intent created", body = CreatePurchaseIntentResponse),
        (status = 400, description = "Invalid amount, missing crypto details or unsupported currency"),
        (status = 422, description = "Malformed request body"),
        (status = 502, description = "Stripe could not be reached")
    ),
    tag = "Stripe"
))]
pub async fn create_purchase_intent_handler(
    State(state): State<Arc<StripeState>>,
    Json(payload): Json<CreatePurchaseIntentRequest>,
) -> Result<Json<CreatePurchaseIntentResponse>, CoinrampError> {
    map_json_error(state.service.create_purchase_intent(payload).await)
}

/// Receives server-to-server notifications from Stripe.
///
/// The raw body is needed for signature verification, so it is only parsed
/// as a [`StripeEvent`] after the signature checks out.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/stripe/webhook", // Path relative to /api
    responses(
        (status = 200, description = "Webhook received and acknowledged"),
        (status = 400, description = "Bad Request (e.g., invalid signature, bad payload)"),
        (status = 500, description = "Webhook signing secret not configured")
    ),
    tag = "Stripe Webhooks"
))]
pub async fn stripe_webhook_handler(
    State(state): State<Arc<StripeState>>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<Value>, CoinrampError> {
    info!("[Stripe Webhook] Received Stripe webhook");

    let webhook_secret = state.webhook_secret.as_deref().ok_or_else(|| {
        StripeError::ConfigError("webhook signing secret is not configured".to_string())
    })?;

    let sig_header = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|h| h.to_str().ok());

    if let Err(e) = verify_stripe_signature(
        body.as_bytes(),
        sig_header,
        webhook_secret,
        chrono::Utc::now().timestamp(),
    ) {
        warn!("[Stripe Webhook] {}", e);
        return Err(e.into());
    }

    let event: StripeEvent = serde_json::from_str(&body).map_err(|e| {
        StripeError::WebhookProcessingError(format!("Invalid payload format: {}", e))
    })?;

    let outcome = process_stripe_webhook(event)?;
    info!("[Stripe Webhook] Processed: {:?}", outcome);

    Ok(Json(json!({ "received": true })))
}
