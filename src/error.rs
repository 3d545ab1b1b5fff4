//! Engine error types

use thiserror::Error;

/// Errors surfaced by lexicon loading and analysis
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No lexicon exists for the requested language
    #[error("unsupported language '{language}' (supported: ru, en)")]
    UnsupportedLanguage { language: String },

    /// A lexicon rule is malformed; detected at load time
    #[error("invalid rule '{rule}': {reason}")]
    InvalidRule { rule: String, reason: String },

    /// Engine options (weights, thresholds, rule overrides) are out of range
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl EngineError {
    pub(crate) fn invalid_rule(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::InvalidRule {
            rule: rule.into(),
            reason: reason.into(),
        }
    }
}
