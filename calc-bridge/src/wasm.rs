//! Browser host entry point
//!
//! Installs the bindings as properties of `globalThis` when the module is
//! instantiated. The closures are leaked on purpose: they must outlive the
//! start function for the page to keep calling them, which is what keeps the
//! module resident on this target.

use crate::config::BridgeConfig;
use crate::ops::{host_args, Binding, HostArg};
use crate::registry::{register_callbacks, Namespace};
use crate::types::{BindingValue, BridgeError, Result};
use wasm_bindgen::prelude::*;

/// The JS global object viewed as a binding namespace
pub struct GlobalNamespace {
    global: js_sys::Object,
}

impl GlobalNamespace {
    pub fn new() -> Self {
        Self {
            global: js_sys::global(),
        }
    }
}

impl Default for GlobalNamespace {
    fn default() -> Self {
        Self::new()
    }
}

impl Namespace for GlobalNamespace {
    fn set(&mut self, name: &str, binding: Binding) -> Result<()> {
        let callback = Closure::<dyn Fn(JsValue, JsValue) -> JsValue>::new(
            move |a: JsValue, b: JsValue| to_js(binding(&host_args([host_arg(&a), host_arg(&b)]))),
        );

        js_sys::Reflect::set(&self.global, &JsValue::from_str(name), callback.as_ref())
            .map_err(|e| BridgeError::Host(format!("failed to set {}: {:?}", name, e)))?;

        callback.forget();
        Ok(())
    }
}

fn host_arg(value: &JsValue) -> HostArg {
    if value.is_undefined() {
        HostArg::Missing
    } else {
        value.as_f64().map_or(HostArg::Other, HostArg::Number)
    }
}

fn to_js(value: BindingValue) -> JsValue {
    match value {
        BindingValue::Number(v) => JsValue::from_f64(v),
        BindingValue::Integer(v) => JsValue::from_f64(v as f64),
        BindingValue::Text(s) => JsValue::from_str(s),
    }
}

/// Module start: install the default bindings on `globalThis`
#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    console_error_panic_hook::set_once();
    register_with_prefix(&BridgeConfig::default().prefix)
}

/// Install the bindings again under a different prefix
#[wasm_bindgen(js_name = registerCallbacks)]
pub fn register_with_prefix(prefix: &str) -> std::result::Result<(), JsValue> {
    let config = BridgeConfig::new().with_prefix(prefix);
    let mut namespace = GlobalNamespace::new();
    register_callbacks(&mut namespace, &config)
        .map(|_| ())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Version of the bridge library
#[wasm_bindgen]
pub fn version() -> String {
    crate::VERSION.to_string()
}
