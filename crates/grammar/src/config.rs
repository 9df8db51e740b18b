//! Grammar configuration.
//!
//! Defaults reproduce the permissive behavior callers rely on; a TOML
//! document can override individual keys.

use serde::{Deserialize, Serialize};

use crate::error::{GrammarError, GrammarResult};

/// Compiler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    /// Reject unrecognized leaf types instead of emitting `{}` (default: false).
    pub strict_leaf_types: bool,

    /// Marker separating a nested object path from the field inside it (default: '@').
    pub nested_marker: char,

    /// `type` emitted on `multi_match` clauses (default: "phrase").
    pub multi_match_type: String,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            strict_leaf_types: false,
            nested_marker: '@',
            multi_match_type: "phrase".to_string(),
        }
    }
}

impl GrammarConfig {
    /// Parse configuration from a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(input: &str) -> GrammarResult<Self> {
        let config: Self =
            toml::from_str(input).map_err(|e| GrammarError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings can produce well-formed clauses.
    pub fn validate(&self) -> GrammarResult<()> {
        if self.nested_marker == '.' || self.nested_marker.is_whitespace() {
            return Err(GrammarError::Config(format!(
                "nested_marker {:?} collides with engine field paths",
                self.nested_marker
            )));
        }
        if self.multi_match_type.trim().is_empty() {
            return Err(GrammarError::Config(
                "multi_match_type must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Enable or disable strict leaf-type checking.
    pub fn with_strict_leaf_types(mut self, strict: bool) -> Self {
        self.strict_leaf_types = strict;
        self
    }
}
