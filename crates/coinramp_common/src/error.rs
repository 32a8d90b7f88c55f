// --- File: crates/coinramp_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Coinramp errors.
///
/// Each crate keeps its own error enum and implements `From<SpecificError> for CoinrampError`
/// so handlers can answer with one response shape.
#[derive(Error, Debug)]
pub enum CoinrampError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Client supplied invalid input
    #[error("{0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
        /// Status reported by the external service, if it answered at all.
        status_code: Option<u16>,
    },

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// This trait can be implemented by error types to provide a consistent way
/// to convert errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for CoinrampError {
    fn status_code(&self) -> u16 {
        match self {
            CoinrampError::HttpError(_) => 502,
            CoinrampError::ParseError(_) => 502,
            CoinrampError::ConfigError(_) => 500,
            CoinrampError::ValidationError(_) => 400,
            CoinrampError::ExternalServiceError { status_code, .. } => status_code.unwrap_or(502),
            CoinrampError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for CoinrampError {
    fn from(err: reqwest::Error) -> Self {
        CoinrampError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for CoinrampError {
    fn from(err: serde_json::Error) -> Self {
        CoinrampError::ParseError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> CoinrampError {
    CoinrampError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> CoinrampError {
    CoinrampError::ValidationError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(
    service_name: &str,
    status_code: Option<u16>,
    message: T,
) -> CoinrampError {
    CoinrampError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
        status_code,
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> CoinrampError {
    CoinrampError::InternalError(message.to_string())
}
