// --- File: crates/coinramp_validation/src/lib.rs ---

pub mod error;
pub mod extract;
pub mod match_account;
pub mod pipeline;
pub mod registry;
pub mod routes;
pub mod rule;

#[cfg(test)]
mod match_account_proptest;

pub use error::{FieldViolation, ValidationError};
pub use extract::{ValidatedJson, ValidationRejection};
pub use match_account::{
    matches_account_field, AccountReference, MatchAccountFieldRule, MATCH_ACCOUNT_FIELD,
};
pub use pipeline::{validate_with, FieldConstraint, Validate};
pub use registry::RuleRegistry;
pub use routes::routes;
pub use rule::{ValidationContext, ValidationRule};
