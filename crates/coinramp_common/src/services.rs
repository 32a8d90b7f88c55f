// --- File: crates/coinramp_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! The traits here decouple the application logic from a specific provider so
//! that handlers can be exercised with in-memory fakes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Operations consumed from an external payments provider.
///
/// Identifiers and secrets returned by the provider are opaque strings; this
/// application never stores them.
pub trait PaymentsGateway: Send + Sync {
    /// Error type returned by payment provider operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a new customer record.
    fn create_customer(&self) -> BoxFuture<'_, ProviderCustomer, Self::Error>;

    /// Create a short-lived key scoped to one customer, pinned to `api_version`.
    fn create_ephemeral_key(
        &self,
        customer_id: &str,
        api_version: &str,
    ) -> BoxFuture<'_, EphemeralKey, Self::Error>;

    /// Create a payment intent.
    fn create_payment_intent(
        &self,
        params: PaymentIntentParams,
    ) -> BoxFuture<'_, PaymentIntentResult, Self::Error>;
}

/// A customer as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCustomer {
    pub id: String,
}

/// An ephemeral key as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EphemeralKey {
    pub id: String,
    pub secret: String,
}

/// Parameters for creating a payment intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntentParams {
    /// Amount in minor units (e.g. cents).
    pub amount: i64,
    /// Lower-case ISO currency code.
    pub currency: String,
    pub customer_id: String,
    /// Let the provider pick the payment methods enabled in its dashboard.
    pub automatic_payment_methods: bool,
    pub metadata: BTreeMap<String, String>,
}

/// Represents the result of a payment intent operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntentResult {
    /// The ID of the payment intent.
    pub id: String,
    /// The status of the payment intent.
    pub status: String,
    /// The amount of the payment intent in minor units.
    pub amount: i64,
    /// The currency of the payment intent.
    pub currency: String,
    /// The client secret for the payment intent.
    pub client_secret: Option<String>,
}
