// --- File: crates/coinramp_stripe/src/lib.rs ---

pub mod client;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod routes;
pub mod webhook;

#[cfg(test)]
mod webhook_test;

// Re-export for main backend
pub use client::StripeClient;
pub use error::{PurchaseError, StripeError};
pub use handlers::StripeState;
pub use logic::{
    to_minor_units, CreatePurchaseIntentRequest, CreatePurchaseIntentResponse, FiatCurrency,
    PurchaseIntentService,
};
pub use routes::{routes, routes_with_gateway};
pub use webhook::{process_stripe_webhook, verify_stripe_signature, StripeEvent, WebhookOutcome};
