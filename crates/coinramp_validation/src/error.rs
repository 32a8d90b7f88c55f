use serde::Serialize;
use thiserror::Error;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// One failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct FieldViolation {
    /// The property that failed validation.
    pub property: String,
    /// Name of the rule that rejected it.
    pub rule: String,
    pub message: String,
}

/// Validation pipeline errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// One or more constraints rejected the payload
    #[error("Validation failed: {}", summarize(.0))]
    Invalid(Vec<FieldViolation>),

    /// A constraint names a rule that was never registered
    #[error("No validation rule registered under '{0}'")]
    UnknownRule(String),

    /// The value could not be turned into JSON for inspection
    #[error("Failed to serialize value for validation: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
