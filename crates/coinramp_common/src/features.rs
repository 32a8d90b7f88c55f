//! Feature flag handling for the Coinramp application.
//!
//! Features are switched twice: at compile time through cargo features
//! (`stripe`, `openapi`) and at runtime through `use_*` flags in the config.
//! A runtime feature counts as enabled only when its flag is set and its
//! config section is present.

#[cfg(feature = "stripe")]
use coinramp_config::AppConfig;

/// Check if a feature is enabled at runtime based on configuration.
pub fn is_feature_enabled<T>(use_feature: bool, feature_config: Option<&T>) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the Stripe feature is enabled at runtime.
#[cfg(feature = "stripe")]
pub fn is_stripe_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_stripe, config.stripe.as_ref())
}
