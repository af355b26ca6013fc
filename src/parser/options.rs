//! Parsing options and configuration.

use serde::{Deserialize, Serialize};

/// Options for parsing HTML into a node tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// What to do with tags outside the supported set
    pub unsupported_tags: UnsupportedTagPolicy,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable strict mode (reject malformed markup).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Enable lenient mode (coerce malformed markup).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the unsupported tag policy.
    pub fn with_unsupported_tags(mut self, policy: UnsupportedTagPolicy) -> Self {
        self.unsupported_tags = policy;
        self
    }

    /// Check whether malformed markup should abort parsing.
    pub fn is_strict(&self) -> bool {
        self.error_mode == ErrorMode::Strict
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMode {
    /// Fail on malformed markup
    Strict,
    /// Coerce malformed markup into a valid tree and continue
    #[default]
    Lenient,
}

/// Handling of tags outside the supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedTagPolicy {
    /// Drop the tag but keep its children in place
    #[default]
    Transparent,
    /// Drop the tag together with its content
    Strip,
}
