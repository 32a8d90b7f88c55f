// --- File: crates/coinramp_validation/src/rule.rs ---
use serde_json::Value;

/// Everything a rule may look at besides the value under test.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// The whole object being validated, as JSON.
    pub object: &'a Value,
    /// Name of the property being validated.
    pub property: &'a str,
    /// Name of the property the rule compares against, if the constraint names one.
    pub related_property: Option<&'a str>,
}

impl<'a> ValidationContext<'a> {
    /// Value of the related property, `None` when it is not configured or absent.
    pub fn related_value(&self) -> Option<&'a Value> {
        self.related_property
            .and_then(|property| self.object.get(property))
    }
}

/// A named check the validation pipeline can run against a single property.
///
/// Rules must be pure: the same value and context always give the same answer.
pub trait ValidationRule: Send + Sync {
    fn validate(&self, value: &Value, context: &ValidationContext<'_>) -> bool;

    /// Message reported when `validate` returns `false` and the constraint has none of its own.
    fn default_message(&self, context: &ValidationContext<'_>) -> String;
}
