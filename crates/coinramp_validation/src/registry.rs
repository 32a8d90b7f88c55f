// --- File: crates/coinramp_validation/src/registry.rs ---
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::match_account::{MatchAccountFieldRule, MATCH_ACCOUNT_FIELD};
use crate::rule::ValidationRule;

/// Maps rule names to rule instances.
///
/// Built once at startup and shared read-only (usually as `Arc<RuleRegistry>` in router state).
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<String, Arc<dyn ValidationRule>>,
}

impl RuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in rule.
    pub fn with_defaults() -> Self {
        Self::new().with_rule(MATCH_ACCOUNT_FIELD, MatchAccountFieldRule)
    }

    /// Registers `rule` under `name`, replacing any rule already registered under it.
    pub fn with_rule<R>(mut self, name: impl Into<String>, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        let name = name.into();
        debug!("Registering validation rule '{}'", name);
        self.rules.insert(name, Arc::new(rule));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn ValidationRule>> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered rule names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}
