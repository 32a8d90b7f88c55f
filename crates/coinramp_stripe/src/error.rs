use coinramp_common::{
    config_error, external_service_error, internal_error, validation_error, CoinrampError,
};
use thiserror::Error;

/// Stripe-specific error types.
#[derive(Error, Debug)]
pub enum StripeError {
    /// Error occurred during a Stripe API request
    #[error("Stripe API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Stripe API
    #[error("Stripe API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Error parsing Stripe API response
    #[error("Failed to parse Stripe API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or incomplete Stripe configuration
    #[error("Stripe configuration missing or incomplete: {0}")]
    ConfigError(String),

    /// Webhook signature verification failed
    #[error("Stripe webhook signature verification failed: {0}")]
    WebhookSignatureError(String),

    /// Webhook payload could not be processed
    #[error("Stripe webhook event processing error: {0}")]
    WebhookProcessingError(String),

    /// Stripe answered successfully but without a field we rely on
    #[error("Internal processing error: {0}")]
    InternalError(String),
}

/// Errors of the crypto purchase flow.
///
/// The local variants are raised before Stripe is contacted; everything Stripe
/// reports is passed through untouched as `Provider`.
#[derive(Error, Debug)]
pub enum PurchaseError {
    #[error("Amount must be greater than 0")]
    InvalidAmount,

    #[error("Crypto symbol and amount are required")]
    MissingCryptoDetails,

    #[error("Currency must be one of USD, EUR, GBP")]
    UnsupportedCurrency,

    #[error(transparent)]
    Provider(#[from] StripeError),
}

/// Convert StripeError to CoinrampError
impl From<StripeError> for CoinrampError {
    fn from(err: StripeError) -> Self {
        match err {
            StripeError::RequestError(e) => CoinrampError::HttpError(format!("Stripe request error: {}", e)),
            StripeError::ApiError { status_code, message } => {
                external_service_error("Stripe API", Some(status_code), message)
            }
            StripeError::ParseError(e) => CoinrampError::ParseError(format!("Stripe response parse error: {}", e)),
            StripeError::ConfigError(msg) => config_error(format!("Stripe: {}", msg)),
            StripeError::WebhookSignatureError(msg) => validation_error(format!("Invalid signature: {}", msg)),
            StripeError::WebhookProcessingError(msg) => validation_error(format!("Invalid webhook payload: {}", msg)),
            StripeError::InternalError(msg) => internal_error(format!("Stripe internal error: {}", msg)),
        }
    }
}

impl From<PurchaseError> for CoinrampError {
    fn from(err: PurchaseError) -> Self {
        match err {
            PurchaseError::InvalidAmount
            | PurchaseError::MissingCryptoDetails
            | PurchaseError::UnsupportedCurrency => {
                validation_error(err)
            }
            PurchaseError::Provider(e) => e.into(),
        }
    }
}
