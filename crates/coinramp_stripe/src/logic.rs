// --- File: crates/coinramp_stripe/src/logic.rs ---
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use coinramp_common::log_result;
use coinramp_common::services::{PaymentIntentParams, PaymentsGateway};
use coinramp_config::StripeConfig;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::error::{PurchaseError, StripeError};

/// Value of the `type` metadata entry on every intent created here.
pub const PURCHASE_TYPE: &str = "crypto_purchase";

// --- Data Structures ---

/// Fiat currencies accepted for crypto purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiatCurrency {
    Usd,
    Eur,
    Gbp,
}

impl FiatCurrency {
    pub fn as_str(&self) -> &'static str {
        match self {
            FiatCurrency::Usd => "USD",
            FiatCurrency::Eur => "EUR",
            FiatCurrency::Gbp => "GBP",
        }
    }

    /// Lower-case code as Stripe expects it.
    pub fn stripe_code(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl FromStr for FiatCurrency {
    type Err = PurchaseError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(FiatCurrency::Usd),
            "EUR" => Ok(FiatCurrency::Eur),
            "GBP" => Ok(FiatCurrency::Gbp),
            _ => Err(PurchaseError::UnsupportedCurrency),
        }
    }
}

impl fmt::Display for FiatCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request from the app to start paying for a crypto purchase.
///
/// Amount, currency and crypto fields are optional on the wire so that missing values are
/// reported with the flow's own errors rather than a generic JSON rejection.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseIntentRequest {
    /// Fiat amount in major units.
    #[cfg_attr(feature = "openapi", schema(value_type = Option<f64>, example = 19.99))]
    pub amount: Option<Decimal>,
    /// One of `USD`, `EUR`, `GBP`, in any case. Checked after the amounts.
    #[cfg_attr(feature = "openapi", schema(example = "USD"))]
    pub currency: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "BTC"))]
    pub crypto_symbol: Option<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<f64>, example = 0.001))]
    pub crypto_amount: Option<Decimal>,
    /// Existing Stripe customer; a new one is created when absent.
    #[cfg_attr(feature = "openapi", schema(example = "cus_NffrFeUfNV2Hib"))]
    pub customer_id: Option<String>,
}

/// Everything the mobile payment sheet needs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseIntentResponse {
    #[cfg_attr(feature = "openapi", schema(example = "pi_3MtwBwLkdIwHu7ix28a3tqPa_secret_YrKJUKribcBjcG8HVhfZluoGH"))]
    pub client_secret: String,
    #[cfg_attr(feature = "openapi", schema(example = "ek_test_YWNjdF8xTTJKVGtMa2RJd0h1N2l4"))]
    pub ephemeral_secret: String,
    #[cfg_attr(feature = "openapi", schema(example = "cus_NffrFeUfNV2Hib"))]
    pub customer_id: String,
    #[cfg_attr(feature = "openapi", schema(example = "pk_test_TYooMQauvdEDq54NiTphI7jx"))]
    pub publishable_key: String,
}

// --- Core Logic ---

/// Converts a fiat amount to minor units, rounding down: `19.999` becomes `1999`.
///
/// Returns `None` when the result does not fit an `i64`.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)?
        .floor()
        .to_i64()
}

/// Metadata recorded on the payment intent.
pub fn purchase_metadata(crypto_symbol: &str, crypto_amount: Decimal) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();
    metadata.insert("type".to_string(), PURCHASE_TYPE.to_string());
    metadata.insert("cryptoSymbol".to_string(), crypto_symbol.to_string());
    metadata.insert("cryptoAmount".to_string(), crypto_amount.to_string());
    metadata
}

/// Creates Stripe payment intents for crypto purchases.
///
/// The Stripe config is fixed at construction; the gateway is shared and may be
/// swapped for a fake in tests.
pub struct PurchaseIntentService {
    gateway: Arc<dyn PaymentsGateway<Error = StripeError>>,
    config: Arc<StripeConfig>,
}

impl PurchaseIntentService {
    pub fn new(
        gateway: Arc<dyn PaymentsGateway<Error = StripeError>>,
        config: Arc<StripeConfig>,
    ) -> Self {
        Self { gateway, config }
    }

    /// Runs the purchase flow:
    ///
    /// 1. `amount` must be present and positive ([`PurchaseError::InvalidAmount`]).
    /// 2. `cryptoSymbol` must be non-blank and `cryptoAmount` positive
    ///    ([`PurchaseError::MissingCryptoDetails`]).
    /// 3. `currency` must be USD, EUR or GBP ([`PurchaseError::UnsupportedCurrency`]).
    /// 4. Without a `customerId` a new Stripe customer is created.
    /// 5. An ephemeral key is created for the customer at the configured API version.
    /// 6. A payment intent is created for `floor(amount * 100)` minor units.
    ///
    /// The Stripe calls run strictly one after another and are never retried. If a
    /// later call fails, a customer created in step 4 is left in place.
    pub async fn create_purchase_intent(
        &self,
        request: CreatePurchaseIntentRequest,
    ) -> Result<CreatePurchaseIntentResponse, PurchaseError> {
        let amount = request
            .amount
            .filter(|amount| *amount > Decimal::ZERO)
            .ok_or(PurchaseError::InvalidAmount)?;
        let minor_units = to_minor_units(amount).ok_or(PurchaseError::InvalidAmount)?;

        let crypto_symbol = request
            .crypto_symbol
            .as_deref()
            .map(str::trim)
            .filter(|symbol| !symbol.is_empty())
            .ok_or(PurchaseError::MissingCryptoDetails)?;
        let crypto_amount = request
            .crypto_amount
            .filter(|amount| *amount > Decimal::ZERO)
            .ok_or(PurchaseError::MissingCryptoDetails)?;
        let currency: FiatCurrency = request
            .currency
            .as_deref()
            .ok_or(PurchaseError::UnsupportedCurrency)?
            .parse()?;

        info!(
            "[Stripe Logic] Creating purchase intent: {} {} for {} {}",
            amount, currency, crypto_amount, crypto_symbol
        );

        let customer_id = match request.customer_id.filter(|id| !id.trim().is_empty()) {
            Some(existing) => existing,
            None => {
                let customer = log_result(
                    self.gateway.create_customer().await,
                    "[Stripe Logic] Created Stripe customer",
                    "[Stripe Logic] Failed to create Stripe customer",
                )?;
                customer.id
            }
        };

        let ephemeral_key = log_result(
            self.gateway
                .create_ephemeral_key(&customer_id, &self.config.api_version)
                .await,
            "[Stripe Logic] Created ephemeral key",
            "[Stripe Logic] Failed to create ephemeral key",
        )?;

        let params = PaymentIntentParams {
            amount: minor_units,
            currency: currency.stripe_code(),
            customer_id: customer_id.clone(),
            automatic_payment_methods: true,
            metadata: purchase_metadata(crypto_symbol, crypto_amount),
        };
        let intent = log_result(
            self.gateway.create_payment_intent(params).await,
            "[Stripe Logic] Created payment intent",
            "[Stripe Logic] Failed to create payment intent",
        )?;

        info!(
            "[Stripe Logic] Payment intent {} ({} {}) ready for customer {}",
            intent.id, intent.amount, intent.currency, customer_id
        );

        let client_secret = intent.client_secret.ok_or_else(|| {
            StripeError::InternalError(format!(
                "payment intent {} has no client_secret",
                intent.id
            ))
        })?;

        Ok(CreatePurchaseIntentResponse {
            client_secret,
            ephemeral_secret: ephemeral_key.secret,
            customer_id,
            publishable_key: self.config.publishable_key.clone(),
        })
    }
}
