//! Core types for the calc bridge
//!
//! This module defines the value a binding hands back to its host and the
//! errors the host-facing side of the library can raise. The bindings
//! themselves never fail: anomalies come back as sentinel values.

use serde::Serialize;
use std::fmt;

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Returned by `div` when called with fewer than two arguments
pub const NAN_SENTINEL: &str = "NaN";

/// Returned by `div` when the divisor is zero
pub const INFINITY_SENTINEL: &str = "∞";

/// Value returned by a binding to its host
///
/// The host sees a number in the normal case, the integer `0` when
/// add/sub/mul are called short of arguments, and a string sentinel for
/// division anomalies. Callers branch on the variant to detect the
/// anomalous outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BindingValue {
    /// Floating-point result of a completed operation
    Number(f64),
    /// Integer sentinel (only ever `0`, for missing arguments)
    Integer(i64),
    /// String sentinel (`"NaN"` or `"∞"` from `div`)
    Text(&'static str),
}

impl BindingValue {
    /// Read the value back as a number for a follow-up calculation
    ///
    /// Matches what a host gets by parsing the displayed text: numbers are
    /// kept exactly and string sentinels read as `NaN`.
    pub fn as_f64(&self) -> f64 {
        match self {
            BindingValue::Number(v) => *v,
            BindingValue::Integer(v) => *v as f64,
            BindingValue::Text(_) => f64::NAN,
        }
    }

    /// True for the integer and string sentinels
    pub fn is_sentinel(&self) -> bool {
        !matches!(self, BindingValue::Number(_))
    }
}

impl fmt::Display for BindingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingValue::Number(v) => write_js_number(f, *v),
            BindingValue::Integer(v) => write!(f, "{}", v),
            BindingValue::Text(s) => f.write_str(s),
        }
    }
}

/// Format a float the way a JS host converts a number to a string
fn write_js_number(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        f.write_str("NaN")
    } else if v.is_infinite() {
        f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" })
    } else if v == 0.0 {
        // Covers -0.0 as well
        f.write_str("0")
    } else {
        // `{:e}` gives the shortest round-trip mantissa, e.g. "-9.999999997e29"
        let scientific = format!("{:e}", v);
        let parts = scientific
            .split_once('e')
            .and_then(|(mantissa, exp)| exp.parse::<i32>().ok().map(|exp| (mantissa, exp)));

        match parts {
            // Positional notation for 1e-6 <= |v| < 1e21
            Some((_, exp)) if (-6..21).contains(&exp) => write!(f, "{}", v),
            Some((mantissa, exp)) => {
                let sign = if exp < 0 { '-' } else { '+' };
                write!(f, "{}e{}{}", mantissa, sign, exp.unsigned_abs())
            }
            None => write!(f, "{}", v),
        }
    }
}

/// Errors raised on the host side of the bridge
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("No binding registered under name: {0}")]
    UnknownBinding(String),

    #[error("Binding already registered under name: {0}")]
    DuplicateBinding(String),

    #[error("Invalid bridge configuration: {0}")]
    InvalidConfig(String),

    #[error("Host error: {0}")]
    Host(String),
}
