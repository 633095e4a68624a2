//! Validation result types.

use serde::{Deserialize, Serialize};

/// A single violated deck-building rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleViolation {
    /// Stable machine-readable rule identifier (e.g. `"character_count"`).
    pub rule: String,
    /// Human-readable message rendered by the UI.
    pub message: String,
}

impl RuleViolation {
    pub fn new(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Aggregated result of validating one deck composition.
///
/// `total_threat` is always computed, legal or not, and is never cached
/// anywhere: every read of a deck's derived state reruns the validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_legal: bool,
    pub total_threat: i32,
    pub errors: Vec<RuleViolation>,
}

impl ValidationReport {
    /// Whether any violation of the given rule was recorded.
    pub fn has_rule(&self, rule: &str) -> bool {
        self.errors.iter().any(|e| e.rule == rule)
    }
}
