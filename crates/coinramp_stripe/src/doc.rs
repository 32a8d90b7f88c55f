// --- File: crates/coinramp_stripe/src/doc.rs ---
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{CreatePurchaseIntentRequest, CreatePurchaseIntentResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::create_purchase_intent_handler,
        crate::handlers::stripe_webhook_handler
    ),
    components(schemas(CreatePurchaseIntentRequest, CreatePurchaseIntentResponse)),
    tags(
        (name = "Stripe", description = "Stripe payment intents for crypto purchases"),
        (name = "Stripe Webhooks", description = "Stripe Server-to-Server Webhooks")
    )
)]
pub struct StripeApiDoc;
