// --- File: crates/coinramp_stripe/src/routes.rs ---

use crate::client::StripeClient;
use crate::error::StripeError;
use crate::handlers::{create_purchase_intent_handler, stripe_webhook_handler, StripeState};
use crate::logic::PurchaseIntentService;
use axum::{routing::post, Router};
use coinramp_common::services::PaymentsGateway;
use coinramp_config::{AppConfig, StripeConfig, SECRET_FROM_ENV};
use std::sync::Arc;
use tracing::warn;

/// Creates a router containing all routes for the Stripe feature.
///
/// Fails when the config has no `stripe` section.
pub fn routes(config: Arc<AppConfig>) -> Result<Router, StripeError> {
    let stripe_config = config
        .stripe
        .clone()
        .ok_or_else(|| StripeError::ConfigError("missing [stripe] section".to_string()))?;

    let gateway = Arc::new(StripeClient::new(&stripe_config));
    Ok(routes_with_gateway(stripe_config, gateway))
}

/// Same as [`routes`] but with the Stripe calls going to `gateway`.
pub fn routes_with_gateway(
    stripe_config: StripeConfig,
    gateway: Arc<dyn PaymentsGateway<Error = StripeError>>,
) -> Router {
    let webhook_secret = stripe_config
        .webhook_secret
        .clone()
        .filter(|secret| !secret.is_empty() && secret != SECRET_FROM_ENV);
    if webhook_secret.is_none() {
        warn!("Stripe webhook secret is not set; webhooks will be rejected");
    }

    let service = Arc::new(PurchaseIntentService::new(gateway, Arc::new(stripe_config)));
    let stripe_state = Arc::new(StripeState {
        service,
        webhook_secret,
    });

    Router::new()
        .route("/stripe/purchase-intent", post(create_purchase_intent_handler))
        .route("/stripe/webhook", post(stripe_webhook_handler))
        .with_state(stripe_state)
}
