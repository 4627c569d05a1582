//! Calc Bridge Library
//!
//! Exposes four arithmetic operations (add, sub, mul, div) to a host
//! scripting environment as named bindings, then keeps them reachable for
//! as long as the host needs them.
//!
//! # Architecture
//!
//! - `ops` holds the four bindings. They never fail: missing arguments and
//!   a zero divisor come back as sentinel values (`0`, `"NaN"`, `"∞"`).
//! - `registry` installs the bindings into an explicit [`Namespace`]. The
//!   in-memory [`BindingTable`] serves tests and native hosts; on `wasm32`
//!   the bindings go onto `globalThis`.
//! - `lifecycle` keeps a native host resident until it signals shutdown.
//!
//! # Example Usage
//!
//! ```
//! use calc_bridge::{BindingTable, BindingValue, BridgeConfig};
//!
//! let table = BindingTable::with_callbacks(&BridgeConfig::default()).unwrap();
//!
//! assert_eq!(table.call("goAdd", &[2.0, 3.0]).unwrap(), BindingValue::Number(5.0));
//! assert_eq!(table.call("goDiv", &[10.0, 0.0]).unwrap(), BindingValue::Text("∞"));
//! ```

// Public modules
pub mod config;
pub mod lifecycle;
pub mod ops;
pub mod registry;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export main types for convenience
pub use config::BridgeConfig;
pub use lifecycle::{Resident, ShutdownHandle, ShutdownReason};
pub use ops::{host_args, Binding, HostArg, Operation};
pub use registry::{register_callbacks, BindingTable, Namespace};
pub use types::{BindingValue, BridgeError, Result, INFINITY_SENTINEL, NAN_SENTINEL};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
