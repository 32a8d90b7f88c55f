// --- File: crates/coinramp_validation/src/pipeline.rs ---
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{FieldViolation, ValidationError};
use crate::registry::RuleRegistry;
use crate::rule::ValidationContext;

/// Binds one property of a DTO to a named rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConstraint {
    pub property: &'static str,
    pub rule: &'static str,
    pub related_property: Option<&'static str>,
    /// Overrides the rule's default message.
    pub message: Option<&'static str>,
}

impl FieldConstraint {
    pub fn new(property: &'static str, rule: &'static str) -> Self {
        Self {
            property,
            rule,
            related_property: None,
            message: None,
        }
    }

    /// Names the property the rule compares against.
    pub fn related_to(mut self, related_property: &'static str) -> Self {
        self.related_property = Some(related_property);
        self
    }

    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// Implemented by request types that declare constraints.
pub trait Validate {
    fn constraints() -> Vec<FieldConstraint>;
}

/// Runs every constraint of `T` against `dto`.
///
/// All constraints are evaluated; the error lists every violation in declaration order.
/// A missing property is validated as JSON `null`.
pub fn validate_with<T>(registry: &RuleRegistry, dto: &T) -> Result<(), ValidationError>
where
    T: Validate + Serialize,
{
    let object = serde_json::to_value(dto)?;
    let mut violations = Vec::new();

    for constraint in T::constraints() {
        let rule = registry
            .get(constraint.rule)
            .ok_or_else(|| ValidationError::UnknownRule(constraint.rule.to_string()))?;

        let context = ValidationContext {
            object: &object,
            property: constraint.property,
            related_property: constraint.related_property,
        };
        let value = object.get(constraint.property).unwrap_or(&Value::Null);

        if !rule.validate(value, &context) {
            debug!(
                "Constraint '{}' failed on property '{}'",
                constraint.rule, constraint.property
            );
            violations.push(FieldViolation {
                property: constraint.property.to_string(),
                rule: constraint.rule.to_string(),
                message: constraint
                    .message
                    .map(str::to_string)
                    .unwrap_or_else(|| rule.default_message(&context)),
            });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Invalid(violations))
    }
}
