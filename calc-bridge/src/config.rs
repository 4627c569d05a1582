//! Bridge configuration types
//!
//! The only knob the bridge exposes is how its bindings are named in the
//! host namespace.

use crate::ops::Operation;
use crate::types::{BridgeError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for binding registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Prefix prepended to each binding name (default: "go")
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_prefix() -> String {
    "go".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

impl BridgeConfig {
    /// Create a new bridge configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the binding name prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Name under which `op` is installed in the host namespace
    ///
    /// With the default prefix this yields `goAdd`, `goSub`, `goMul` and
    /// `goDiv`. An empty prefix yields the bare operation names.
    pub fn binding_name(&self, op: Operation) -> String {
        if self.prefix.is_empty() {
            return op.name().to_string();
        }

        let name = op.name();
        let mut out = String::with_capacity(self.prefix.len() + name.len());
        out.push_str(&self.prefix);
        let mut chars = name.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
        out
    }

    /// Check that every binding name is a valid host identifier
    pub fn validate(&self) -> Result<()> {
        let mut chars = self.prefix.chars();
        let Some(first) = chars.next() else {
            return Ok(());
        };

        if !(first.is_ascii_alphabetic() || first == '_' || first == '$') {
            return Err(BridgeError::InvalidConfig(format!(
                "prefix must start with a letter, '_' or '$': {:?}",
                self.prefix
            )));
        }
        if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '$')) {
            return Err(BridgeError::InvalidConfig(format!(
                "prefix contains invalid character {:?}: {:?}",
                bad, self.prefix
            )));
        }
        Ok(())
    }
}
