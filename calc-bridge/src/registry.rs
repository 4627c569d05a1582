//! Callback registry
//!
//! Installs the four bindings into a host namespace. The namespace is passed
//! in explicitly so the binding surface can be exercised without a live host:
//! tests and the native harness use [`BindingTable`], the browser build uses
//! the global object.

use crate::config::BridgeConfig;
use crate::ops::{Binding, Operation};
use crate::types::{BindingValue, BridgeError, Result};
use std::collections::HashMap;

/// A namespace reachable by the host that bindings can be installed into
pub trait Namespace {
    /// Install `binding` under `name`
    fn set(&mut self, name: &str, binding: Binding) -> Result<()>;
}

/// Register every operation into `namespace` under its configured name
///
/// This is the only mutation the bridge performs. Returns the installed
/// names in registration order.
pub fn register_callbacks(
    namespace: &mut dyn Namespace,
    config: &BridgeConfig,
) -> Result<Vec<String>> {
    config.validate()?;

    let mut installed = Vec::with_capacity(Operation::ALL.len());
    for op in Operation::ALL {
        let name = config.binding_name(op);
        namespace.set(&name, op.binding())?;
        log::debug!("Installed binding {} ({})", name, op);
        installed.push(name);
    }

    log::info!("Registered {} bindings", installed.len());
    Ok(installed)
}

/// In-memory namespace mapping binding names to bindings
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    bindings: HashMap<String, Binding>,
}

impl BindingTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with every operation registered under `config`
    pub fn with_callbacks(config: &BridgeConfig) -> Result<Self> {
        let mut table = Self::new();
        register_callbacks(&mut table, config)?;
        Ok(table)
    }

    /// Invoke the binding registered under `name`
    ///
    /// # Returns
    /// * `Ok(BindingValue)` - the binding's result, sentinels included
    /// * `Err(BridgeError::UnknownBinding)` - nothing registered under `name`
    pub fn call(&self, name: &str, args: &[f64]) -> Result<BindingValue> {
        let binding = self
            .get(name)
            .ok_or_else(|| BridgeError::UnknownBinding(name.to_string()))?;
        let value = binding(args);
        log::trace!("{}({:?}) -> {}", name, args, value);
        Ok(value)
    }

    /// Look up the binding registered under `name`
    pub fn get(&self, name: &str) -> Option<Binding> {
        self.bindings.get(name).copied()
    }

    /// Check whether a binding is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Namespace for BindingTable {
    fn set(&mut self, name: &str, binding: Binding) -> Result<()> {
        if self.bindings.contains_key(name) {
            return Err(BridgeError::DuplicateBinding(name.to_string()));
        }
        self.bindings.insert(name.to_string(), binding);
        Ok(())
    }
}
