// --- File: crates/coinramp_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod features; // Feature flag handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod routes; // Shared route definitions
pub mod services; // Service abstractions


// Re-export the routes function to be used by the main backend service
pub use routes::routes;

// Re-export error types and utilities for easier access
pub use error::{
    config_error, external_service_error, internal_error, validation_error, CoinrampError,
    HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::{client::HTTP_CLIENT, map_json_error, IntoHttpResponse};

// Re-export logging utilities for easier access
pub use logging::{init_from_config, log_result};

// Re-export feature flag handling utilities for easier access
pub use features::is_feature_enabled;

#[cfg(feature = "stripe")]
pub use features::is_stripe_enabled;
