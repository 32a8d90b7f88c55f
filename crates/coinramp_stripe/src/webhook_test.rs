#[cfg(test)]
mod tests {
    use crate::error::StripeError;
    use crate::webhook::{
        process_stripe_webhook, verify_stripe_signature, StripeEvent, WebhookOutcome,
        TOLERANCE_SECONDS,
    };
    use hmac::{Hmac, Mac};
    use serde_json::json;
    use sha2::Sha256;

    const SECRET: &str = "whsec_test_secret";
    const NOW: i64 = 1_700_000_000;

    fn sign(payload: &str, timestamp: i64, secret: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{}.{}", timestamp, payload).as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn event(event_type: &str, metadata: serde_json::Value) -> StripeEvent {
        serde_json::from_value(json!({
            "id": "evt_1",
            "type": event_type,
            "created": NOW,
            "livemode": false,
            "data": {
                "object": {
                    "id": "pi_1",
                    "object": "payment_intent",
                    "amount": 1999,
                    "currency": "usd",
                    "status": "succeeded",
                    "customer": "cus_1",
                    "metadata": metadata
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_signature_is_accepted() {
        let payload = r#"{"id":"evt_1"}"#;
        let header = format!("t={},v1={}", NOW, sign(payload, NOW, SECRET));

        assert!(verify_stripe_signature(payload.as_bytes(), Some(&header), SECRET, NOW).is_ok());
    }

    #[test]
    fn test_any_matching_v1_is_enough() {
        let payload = r#"{"id":"evt_1"}"#;
        let header = format!(
            "t={},v1={},v0=ignored,v1={}",
            NOW,
            sign(payload, NOW, "whsec_rotated_out"),
            sign(payload, NOW, SECRET)
        );

        assert!(verify_stripe_signature(payload.as_bytes(), Some(&header), SECRET, NOW).is_ok());
    }

    #[test]
    fn test_missing_header_is_rejected() {
        let result = verify_stripe_signature(b"{}", None, SECRET, NOW);
        assert!(matches!(result, Err(StripeError::WebhookSignatureError(_))));
    }

    #[test]
    fn test_malformed_headers_are_rejected() {
        for header in ["v1=abcdef", "t=notanumber,v1=abcdef", "t=1700000000", ""] {
            let result = verify_stripe_signature(b"{}", Some(header), SECRET, NOW);
            assert!(
                matches!(result, Err(StripeError::WebhookSignatureError(_))),
                "header {:?} should be rejected",
                header
            );
        }
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let header = format!("t={},v1={}", NOW, sign(r#"{"amount":1}"#, NOW, SECRET));
        let result =
            verify_stripe_signature(br#"{"amount":1000}"#, Some(&header), SECRET, NOW);
        assert!(matches!(result, Err(StripeError::WebhookSignatureError(_))));
    }

    #[test]
    fn test_non_hex_signature_is_rejected() {
        let header = format!("t={},v1=zzzz", NOW);
        let result = verify_stripe_signature(b"{}", Some(&header), SECRET, NOW);
        assert!(matches!(result, Err(StripeError::WebhookSignatureError(_))));
    }

    #[test]
    fn test_timestamp_tolerance() {
        let payload = "{}";
        let old = NOW - TOLERANCE_SECONDS - 1;
        let stale = format!("t={},v1={}", old, sign(payload, old, SECRET));
        assert!(verify_stripe_signature(payload.as_bytes(), Some(&stale), SECRET, NOW).is_err());

        let edge = NOW - TOLERANCE_SECONDS;
        let fresh = format!("t={},v1={}", edge, sign(payload, edge, SECRET));
        assert!(verify_stripe_signature(payload.as_bytes(), Some(&fresh), SECRET, NOW).is_ok());
    }

    #[test]
    fn test_extreme_timestamps_are_rejected_without_overflow() {
        for header in [
            "t=-9223372036854775808,v1=00",
            "t=9223372036854775807,v1=00",
        ] {
            let result = verify_stripe_signature(b"{}", Some(header), SECRET, NOW);
            assert!(matches!(result, Err(StripeError::WebhookSignatureError(_))));
        }

        let result = verify_stripe_signature(
            b"{}",
            Some("t=9223372036854775807,v1=00"),
            SECRET,
            i64::MIN,
        );
        assert!(matches!(result, Err(StripeError::WebhookSignatureError(_))));
    }

    #[test]
    fn test_succeeded_crypto_purchase() {
        let outcome = process_stripe_webhook(event(
            "payment_intent.succeeded",
            json!({"type": "crypto_purchase", "cryptoSymbol": "BTC", "cryptoAmount": "0.001"}),
        ))
        .unwrap();

        assert_eq!(
            outcome,
            WebhookOutcome::PurchaseSucceeded {
                payment_intent_id: "pi_1".to_string(),
                crypto_symbol: Some("BTC".to_string()),
                crypto_amount: Some("0.001".to_string()),
            }
        );
    }

    #[test]
    fn test_failed_crypto_purchase() {
        let outcome = process_stripe_webhook(event(
            "payment_intent.payment_failed",
            json!({"type": "crypto_purchase"}),
        ))
        .unwrap();

        assert_eq!(
            outcome,
            WebhookOutcome::PurchaseFailed {
                payment_intent_id: "pi_1".to_string(),
            }
        );
    }

    #[test]
    fn test_other_intents_and_events_are_ignored() {
        let foreign = process_stripe_webhook(event("payment_intent.succeeded", json!({})));
        let unrelated = process_stripe_webhook(event("customer.created", json!({})));

        assert_eq!(foreign.unwrap(), WebhookOutcome::Ignored);
        assert_eq!(unrelated.unwrap(), WebhookOutcome::Ignored);
    }

    #[test]
    fn test_unparseable_intent_object_is_an_error() {
        let event: StripeEvent = serde_json::from_value(json!({
            "id": "evt_2",
            "type": "payment_intent.succeeded",
            "created": NOW,
            "data": { "object": { "id": "pi_2" } }
        }))
        .unwrap();

        assert!(matches!(
            process_stripe_webhook(event),
            Err(StripeError::WebhookProcessingError(_))
        ));
    }
}
