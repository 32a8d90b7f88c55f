// --- File: crates/coinramp_stripe/src/client.rs ---
//! Minimal Stripe REST client covering the calls the purchase flow needs.

use coinramp_common::services::{
    BoxFuture, EphemeralKey, PaymentIntentParams, PaymentIntentResult, PaymentsGateway,
    ProviderCustomer,
};
use coinramp_common::HTTP_CLIENT;
use coinramp_config::StripeConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{error, info};

use crate::error::StripeError;

const CUSTOMERS_PATH: &str = "/v1/customers";
const EPHEMERAL_KEYS_PATH: &str = "/v1/ephemeral_keys";
const PAYMENT_INTENTS_PATH: &str = "/v1/payment_intents";

/// Talks to the Stripe API with form-encoded requests and the secret key as basic auth.
#[derive(Clone)]
pub struct StripeClient {
    http: Client,
    api_base_url: String,
    secret_key: String,
}

impl StripeClient {
    /// Create a client from the Stripe config, sharing the process-wide HTTP client.
    pub fn new(config: &StripeConfig) -> Self {
        Self {
            http: HTTP_CLIENT.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
        }
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(String, String)],
        stripe_version: Option<&str>,
    ) -> Result<T, StripeError> {
        let api_url = format!("{}{}", self.api_base_url, path);
        info!("[Stripe Client] Sending request to Stripe API: {}", api_url);

        let mut request = self
            .http
            .post(&api_url)
            .basic_auth(&self.secret_key, None::<&str>)
            .form(form);
        if let Some(version) = stripe_version {
            request = request.header("Stripe-Version", version);
        }

        let response = request.send().await?;
        let status = response.status();
        let body_text = response.text().await?;

        info!("[Stripe Client] Stripe API response status: {}", status);

        if status.is_success() {
            Ok(serde_json::from_str(&body_text)?)
        } else {
            let message = extract_error_message(&body_text);
            error!(
                "[Stripe Client] Stripe API request to {} failed with HTTP status: {}. Message: {}",
                path, status, message
            );
            Err(StripeError::ApiError {
                status_code: status.as_u16(),
                message,
            })
        }
    }
}

/// Pulls `error.message` out of a Stripe error body, falling back to the raw body.
fn extract_error_message(body_text: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body_text)
        .ok()
        .and_then(|json_body| {
            json_body
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body_text.to_string())
}

/// Form body for `POST /v1/payment_intents`.
fn payment_intent_form(params: &PaymentIntentParams) -> Vec<(String, String)> {
    let mut form_body: Vec<(String, String)> = vec![
        ("amount".to_string(), params.amount.to_string()),
        ("currency".to_string(), params.currency.clone()),
        ("customer".to_string(), params.customer_id.clone()),
        (
            "automatic_payment_methods[enabled]".to_string(),
            params.automatic_payment_methods.to_string(),
        ),
    ];
    for (key, value) in &params.metadata {
        form_body.push((format!("metadata[{}]", key), value.clone()));
    }
    form_body
}

impl PaymentsGateway for StripeClient {
    type Error = StripeError;

    fn create_customer(&self) -> BoxFuture<'_, ProviderCustomer, Self::Error> {
        Box::pin(async move { self.post_form(CUSTOMERS_PATH, &[], None).await })
    }

    fn create_ephemeral_key(
        &self,
        customer_id: &str,
        api_version: &str,
    ) -> BoxFuture<'_, EphemeralKey, Self::Error> {
        // Owned copies so the future only borrows `self`
        let form_body = vec![("customer".to_string(), customer_id.to_string())];
        let api_version = api_version.to_string();

        Box::pin(async move {
            self.post_form(EPHEMERAL_KEYS_PATH, &form_body, Some(&api_version))
                .await
        })
    }

    fn create_payment_intent(
        &self,
        params: PaymentIntentParams,
    ) -> BoxFuture<'_, PaymentIntentResult, Self::Error> {
        Box::pin(async move {
            self.post_form(PAYMENT_INTENTS_PATH, &payment_intent_form(&params), None)
                .await
        })
    }
}
