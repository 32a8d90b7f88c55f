// --- File: crates/coinramp_validation/src/match_account.rs ---
//! Cross-field rule: a property must echo a value held in a nested account object.
//!
//! Typical use is a "confirm account number" field that must repeat either the
//! account number or the routing number of the account the request refers to.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::rule::{ValidationContext, ValidationRule};

/// Name the rule is registered under by `RuleRegistry::with_defaults`.
pub const MATCH_ACCOUNT_FIELD: &str = "match_account_field";

const ACCOUNT_NUMBER_KEY: &str = "account_number";
const ROUTING_NUMBER_KEY: &str = "routing_number";

/// The nested account object the rule compares against.
///
/// Absent numbers are skipped on serialization so they stay absent for the rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AccountReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(example = "000123456789"))]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(example = "110000000"))]
    pub routing_number: Option<String>,
}

/// Returns `true` iff `subject` equals `related.account_number` or `related.routing_number`.
///
/// Equality is strict JSON equality: `"123"` never matches `123`. A missing related
/// object, a related value that is not an object, and missing keys never match.
/// Empty strings are compared like any other value.
pub fn matches_account_field(subject: &Value, related: Option<&Value>) -> bool {
    let Some(related) = related else {
        return false;
    };

    [ACCOUNT_NUMBER_KEY, ROUTING_NUMBER_KEY]
        .iter()
        .any(|key| related.get(key).is_some_and(|candidate| candidate == subject))
}

/// `ValidationRule` wrapper around [`matches_account_field`].
///
/// The constraint must name the related property holding the account object;
/// without one the rule always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchAccountFieldRule;

impl ValidationRule for MatchAccountFieldRule {
    fn validate(&self, value: &Value, context: &ValidationContext<'_>) -> bool {
        matches_account_field(value, context.related_value())
    }

    fn default_message(&self, context: &ValidationContext<'_>) -> String {
        format!(
            "{} must match the value provided in the nested account object.",
            context.property
        )
    }
}
