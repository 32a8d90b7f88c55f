// --- File: crates/coinramp_config/src/models.rs ---

use serde::{Deserialize, Serialize};

/// Stripe API version pinned for ephemeral key creation.
pub const DEFAULT_STRIPE_API_VERSION: &str = "2020-08-27";
pub const DEFAULT_STRIPE_API_BASE_URL: &str = "https://api.stripe.com";

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Minimum level for the `coinramp` targets (e.g. "info", "debug").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

// --- Stripe Config ---
// Secrets are usually written as "secret_from_env" in the config file and
// resolved from STRIPE_SECRET_KEY / STRIPE_PUBLISHABLE_KEY / STRIPE_WEBHOOK_SECRET.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    /// Handed to mobile clients verbatim; never validated here.
    #[serde(default)]
    pub publishable_key: String,
    #[serde(default)]
    pub webhook_secret: Option<String>,
    #[serde(default = "default_stripe_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_stripe_api_version")]
    pub api_version: String,
}

fn default_stripe_api_base_url() -> String {
    DEFAULT_STRIPE_API_BASE_URL.to_string()
}

fn default_stripe_api_version() -> String {
    DEFAULT_STRIPE_API_VERSION.to_string()
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_stripe: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub stripe: Option<StripeConfig>,
}
