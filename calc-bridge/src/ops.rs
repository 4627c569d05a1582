//! The four arithmetic bindings
//!
//! Each binding reads the first two caller-supplied arguments and returns a
//! single value. Extra arguments are ignored. Missing arguments and a zero
//! divisor degrade to sentinel values instead of failing.

use crate::types::{BindingValue, INFINITY_SENTINEL, NAN_SENTINEL};
use std::fmt;

/// Signature shared by every binding
pub type Binding = fn(&[f64]) -> BindingValue;

/// `args[0] + args[1]`, or `0` if short of arguments
pub fn add(args: &[f64]) -> BindingValue {
    match args {
        [a, b, ..] => BindingValue::Number(a + b),
        _ => BindingValue::Integer(0),
    }
}

/// `args[0] - args[1]`, or `0` if short of arguments
pub fn sub(args: &[f64]) -> BindingValue {
    match args {
        [a, b, ..] => BindingValue::Number(a - b),
        _ => BindingValue::Integer(0),
    }
}

/// `args[0] * args[1]`, or `0` if short of arguments
pub fn mul(args: &[f64]) -> BindingValue {
    match args {
        [a, b, ..] => BindingValue::Number(a * b),
        _ => BindingValue::Integer(0),
    }
}

/// `args[0] / args[1]`
///
/// Returns `"NaN"` if short of arguments and `"∞"` for any zero divisor,
/// whatever the dividend (including a `NaN` dividend).
pub fn div(args: &[f64]) -> BindingValue {
    match args {
        [_, b, ..] if *b == 0.0 => BindingValue::Text(INFINITY_SENTINEL),
        [a, b, ..] => BindingValue::Number(a / b),
        _ => BindingValue::Text(NAN_SENTINEL),
    }
}

/// An argument as the host passed it, before numeric conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostArg {
    /// Left out by the caller (`undefined` on a JS host)
    Missing,
    Number(f64),
    /// Present but not a number
    Other,
}

/// Collect binding arguments from what the host passed
///
/// Arguments count up to the first missing one. Values that are not
/// numbers read as `NaN`.
pub fn host_args<I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = HostArg>,
{
    values
        .into_iter()
        .map_while(|arg| match arg {
            HostArg::Missing => None,
            HostArg::Number(v) => Some(v),
            HostArg::Other => Some(f64::NAN),
        })
        .collect()
}

/// One of the four exposed operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operation {
    /// Every operation, in registration order
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Sub,
        Operation::Mul,
        Operation::Div,
    ];

    /// Lowercase operation name (`add`, `sub`, `mul`, `div`)
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Sub => "sub",
            Operation::Mul => "mul",
            Operation::Div => "div",
        }
    }

    /// Keypad symbol for the operation
    pub fn symbol(&self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Sub => '-',
            Operation::Mul => '*',
            Operation::Div => '/',
        }
    }

    /// Look up an operation by keypad symbol
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Look up an operation by its lowercase name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    /// The binding implementing this operation
    pub fn binding(&self) -> Binding {
        match self {
            Operation::Add => add,
            Operation::Sub => sub,
            Operation::Mul => mul,
            Operation::Div => div,
        }
    }

    /// Apply the operation directly
    pub fn apply(&self, args: &[f64]) -> BindingValue {
        (self.binding())(args)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenarios() {
        assert_eq!(add(&[2.0, 3.0]), BindingValue::Number(5.0));
        assert_eq!(sub(&[2.0, 3.0]), BindingValue::Number(-1.0));
        assert_eq!(mul(&[4.0, 5.0]), BindingValue::Number(20.0));
        assert_eq!(div(&[10.0, 2.0]), BindingValue::Number(5.0));
        assert_eq!(div(&[10.0, 0.0]), BindingValue::Text("∞"));
        assert_eq!(div(&[]), BindingValue::Text("NaN"));
    }

    #[test]
    fn test_missing_arguments() {
        for binding in [add, sub, mul] {
            assert_eq!(binding(&[]), BindingValue::Integer(0));
            assert_eq!(binding(&[7.0]), BindingValue::Integer(0));
        }
        assert_eq!(div(&[7.0]), BindingValue::Text(NAN_SENTINEL));
    }

    #[test]
    fn test_zero_divisor_ignores_dividend() {
        assert_eq!(div(&[0.0, 0.0]), BindingValue::Text(INFINITY_SENTINEL));
        assert_eq!(div(&[-3.0, -0.0]), BindingValue::Text(INFINITY_SENTINEL));
        assert_eq!(div(&[f64::NAN, 0.0]), BindingValue::Text(INFINITY_SENTINEL));
    }

    #[test]
    fn test_extra_arguments_ignored() {
        assert_eq!(add(&[1.0, 2.0, 100.0]), BindingValue::Number(3.0));
        assert_eq!(div(&[9.0, 3.0, 0.0]), BindingValue::Number(3.0));
    }

    #[test]
    fn test_host_args_stop_at_first_missing() {
        use HostArg::*;

        assert_eq!(host_args([Number(2.0), Number(3.0)]), vec![2.0, 3.0]);
        assert_eq!(host_args([Number(2.0), Missing]), vec![2.0]);
        assert_eq!(host_args([Missing, Number(3.0)]), Vec::<f64>::new());

        // A gap makes the call short, so add falls back to its sentinel
        assert_eq!(add(&host_args([Missing, Number(3.0)])), BindingValue::Integer(0));
        assert_eq!(div(&host_args([Number(1.0), Missing])), BindingValue::Text(NAN_SENTINEL));
    }

    #[test]
    fn test_host_args_non_numbers_read_as_nan() {
        let args = host_args([HostArg::Other, HostArg::Number(1.0)]);
        assert_eq!(args.len(), 2);
        assert!(args[0].is_nan());
        assert!(add(&args).as_f64().is_nan());
        // A zero divisor still wins over a non-numeric dividend
        assert_eq!(
            div(&host_args([HostArg::Other, HostArg::Number(0.0)])),
            BindingValue::Text(INFINITY_SENTINEL)
        );
    }

    #[test]
    fn test_operation_lookup() {
        assert_eq!(Operation::from_symbol('*'), Some(Operation::Mul));
        assert_eq!(Operation::from_symbol('%'), None);
        assert_eq!(Operation::from_name("div"), Some(Operation::Div));
        assert_eq!(Operation::from_name("pow"), None);
        assert_eq!(Operation::Sub.apply(&[1.0, 1.5]), BindingValue::Number(-0.5));
    }
}
