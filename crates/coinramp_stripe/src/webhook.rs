// --- File: crates/coinramp_stripe/src/webhook.rs ---
use std::collections::HashMap;

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use tracing::{debug, info, warn};

use crate::error::StripeError;
use crate::logic::PURCHASE_TYPE;

type HmacSha256 = Hmac<Sha256>;

/// Maximum age of a signed webhook, in seconds.
pub const TOLERANCE_SECONDS: i64 = 300;

/// Represents the `data` field within a Stripe Event.
#[derive(Deserialize, Debug, Clone)]
pub struct StripeEventData {
    /// The object the event is about; its shape depends on the event type.
    pub object: serde_json::Value,
}

/// Represents the outer Stripe Event object.
#[derive(Deserialize, Debug, Clone)]
pub struct StripeEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String, // e.g., "payment_intent.succeeded"
    pub created: i64,
    #[serde(default)]
    pub livemode: bool,
    pub data: StripeEventData,
}

/// The fields of a PaymentIntent object we care about.
#[derive(Deserialize, Debug, Clone)]
pub struct StripePaymentIntentObject {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub status: Option<String>,
    pub customer: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// What a processed webhook amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    PurchaseSucceeded {
        payment_intent_id: String,
        crypto_symbol: Option<String>,
        crypto_amount: Option<String>,
    },
    PurchaseFailed {
        payment_intent_id: String,
    },
    Ignored,
}

/// Verifies the `Stripe-Signature` header of an incoming webhook.
///
/// The header looks like `t=1492774577,v1=5257a8...,v1=...`; the request is accepted
/// when any `v1` entry is the HMAC-SHA256 of `"{t}.{payload}"` under `secret` and
/// `t` lies within [`TOLERANCE_SECONDS`] of `now`.
pub fn verify_stripe_signature(
    payload_bytes: &[u8],
    sig_header: Option<&str>,
    secret: &str,
    now: i64,
) -> Result<(), StripeError> {
    let sig_header_value = sig_header.ok_or_else(|| {
        StripeError::WebhookSignatureError("Missing Stripe-Signature header".to_string())
    })?;

    let mut timestamp_str: Option<&str> = None;
    let mut v1_signatures_hex: Vec<&str> = Vec::new();

    for item in sig_header_value.split(',') {
        match item.trim().split_once('=') {
            Some(("t", value)) => timestamp_str = Some(value),
            Some(("v1", value)) => v1_signatures_hex.push(value),
            _ => {} // v0 and unknown schemes are ignored
        }
    }

    let timestamp_str = timestamp_str.ok_or_else(|| {
        StripeError::WebhookSignatureError("Missing timestamp 't' in Stripe-Signature".to_string())
    })?;
    let timestamp = timestamp_str.parse::<i64>().map_err(|_| {
        StripeError::WebhookSignatureError(
            "Invalid timestamp format in Stripe-Signature".to_string(),
        )
    })?;

    if v1_signatures_hex.is_empty() {
        return Err(StripeError::WebhookSignatureError(
            "Missing v1 signature in Stripe-Signature".to_string(),
        ));
    }

    if now.abs_diff(timestamp) > TOLERANCE_SECONDS.unsigned_abs() {
        warn!(
            "[Stripe Webhook] Timestamp outside tolerance. Current: {}, Event: {}",
            now, timestamp
        );
        return Err(StripeError::WebhookSignatureError(
            "Timestamp outside tolerance".to_string(),
        ));
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| {
        StripeError::WebhookSignatureError("Invalid webhook secret format for HMAC".to_string())
    })?;
    mac.update(timestamp_str.as_bytes());
    mac.update(b".");
    mac.update(payload_bytes);

    // verify_slice compares in constant time
    let matched = v1_signatures_hex.iter().any(|provided_hex| {
        hex::decode(provided_hex)
            .map(|provided| mac.clone().verify_slice(&provided).is_ok())
            .unwrap_or(false)
    });

    if matched {
        Ok(())
    } else {
        Err(StripeError::WebhookSignatureError(
            "Signature mismatch".to_string(),
        ))
    }
}

/// Processes a verified Stripe webhook event.
pub fn process_stripe_webhook(event: StripeEvent) -> Result<WebhookOutcome, StripeError> {
    info!(
        "[Stripe Webhook] Processing event {} of type {} (livemode: {})",
        event.id, event.event_type, event.livemode
    );

    match event.event_type.as_str() {
        "payment_intent.succeeded" | "payment_intent.payment_failed" => {
            let intent: StripePaymentIntentObject = serde_json::from_value(event.data.object)
                .map_err(|e| {
                    StripeError::WebhookProcessingError(format!(
                        "Failed to parse payment intent object: {}",
                        e
                    ))
                })?;

            if intent.metadata.get("type").map(String::as_str) != Some(PURCHASE_TYPE) {
                debug!(
                    "[Stripe Webhook] Payment intent {} is not a crypto purchase",
                    intent.id
                );
                return Ok(WebhookOutcome::Ignored);
            }

            if event.event_type == "payment_intent.succeeded" {
                let crypto_symbol = intent.metadata.get("cryptoSymbol").cloned();
                let crypto_amount = intent.metadata.get("cryptoAmount").cloned();
                info!(
                    "[Stripe Webhook] Crypto purchase paid: intent {}, {} {}, {:?} {:?}, customer {:?}",
                    intent.id, intent.amount, intent.currency, crypto_amount, crypto_symbol, intent.customer
                );
                Ok(WebhookOutcome::PurchaseSucceeded {
                    payment_intent_id: intent.id,
                    crypto_symbol,
                    crypto_amount,
                })
            } else {
                warn!(
                    "[Stripe Webhook] Crypto purchase payment failed: intent {}, status {:?}",
                    intent.id, intent.status
                );
                Ok(WebhookOutcome::PurchaseFailed {
                    payment_intent_id: intent.id,
                })
            }
        }
        other => {
            debug!("[Stripe Webhook] Received unhandled event type: {}", other);
            Ok(WebhookOutcome::Ignored)
        }
    }
}
