//! Injector configuration types

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Settings applied to every bootstrap of an injector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectorConfig {
    /// Value overrides keyed by provider token
    ///
    /// Each entry is shallow-merged over the root factory's value provider of
    /// the same token, or added as a plain value provider when the factory
    /// declares none.
    pub overrides: IndexMap<String, serde_json::Value>,

    /// Report missing optional dependencies at `warn` instead of `debug`
    pub strict_optional: bool,
}

impl InjectorConfig {
    /// Add a value override for `token`
    pub fn with_override(mut self, token: impl Into<String>, value: serde_json::Value) -> Self {
        self.overrides.insert(token.into(), value);
        self
    }

    /// Set [`InjectorConfig::strict_optional`]
    pub fn with_strict_optional(mut self, strict: bool) -> Self {
        self.strict_optional = strict;
        self
    }
}
