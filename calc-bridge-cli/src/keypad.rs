//! Keypad calculator session
//!
//! Drives the registered bindings the way a four-function keypad does:
//! digits build the current entry, an operator folds the pending operation
//! into the left operand, equals finishes it. Results are kept as binding
//! values so sentinels such as `∞` can be chained (they read back as `NaN`).

use calc_bridge::{BindingTable, BindingValue, BridgeConfig, BridgeError, Operation};

/// Shown when the operator's binding is not registered yet
const NOT_READY: &str = "...";

/// Shown when an operator is chained without a pending operation
const NO_OPERATOR: BindingValue = BindingValue::Text("Err");

/// A single keypad key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// `0`-`9` or `.`
    Digit(char),
    Operator(Operation),
    Equals,
    Clear,
}

impl Key {
    /// Map a typed character to a key
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' | '.' => Some(Key::Digit(c)),
            '=' => Some(Key::Equals),
            'c' | 'C' => Some(Key::Clear),
            _ => Operation::from_symbol(c).map(Key::Operator),
        }
    }

    /// Map a named key (as a keyboard reports it) to a key
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Enter" => Some(Key::Equals),
            "Escape" | "Backspace" | "Delete" => Some(Key::Clear),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_char(c),
                    _ => None,
                }
            }
        }
    }
}

/// Parse a key sequence such as `"12+3="` or `"12 + 3 Enter"`
///
/// Whitespace separates tokens. A token that names a key is taken whole,
/// anything else is read character by character. Unknown characters are
/// skipped.
pub fn parse_keys(input: &str) -> Vec<Key> {
    let mut keys = Vec::new();
    for token in input.split_whitespace() {
        if token.chars().count() > 1 {
            if let Some(key) = Key::from_name(token) {
                keys.push(key);
                continue;
            }
        }
        keys.extend(token.chars().filter_map(Key::from_char));
    }
    keys
}

/// Left operand of the pending operation
#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Empty,
    /// Digits moved over from the current entry
    Entry(String),
    /// Result of the previous evaluation
    Value(BindingValue),
}

impl Operand {
    fn is_empty(&self) -> bool {
        matches!(self, Operand::Empty)
    }

    fn as_f64(&self) -> f64 {
        match self {
            Operand::Empty => f64::NAN,
            Operand::Entry(text) => parse_float(text),
            Operand::Value(value) => value.as_f64(),
        }
    }
}

/// Keypad state over a binding table
pub struct KeypadSession<'a> {
    table: &'a BindingTable,
    bridge: &'a BridgeConfig,
    max_digits: usize,
    current: String,
    operator: Option<Operation>,
    operand: Operand,
    waiting_for_operand: bool,
    display: String,
}

impl<'a> KeypadSession<'a> {
    pub fn new(table: &'a BindingTable, bridge: &'a BridgeConfig, max_digits: usize) -> Self {
        let mut session = Self {
            table,
            bridge,
            max_digits,
            current: String::new(),
            operator: None,
            operand: Operand::Empty,
            waiting_for_operand: false,
            display: String::new(),
        };
        session.clear();
        session
    }

    /// Current display text
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Press every key in order and return the final display
    pub fn press_all(&mut self, keys: &[Key]) -> &str {
        for key in keys {
            self.press(*key);
        }
        &self.display
    }

    /// Press a single key
    pub fn press(&mut self, key: Key) {
        log::trace!("key {:?}", key);
        match key {
            Key::Digit(c) => self.enter_digit(c),
            Key::Operator(op) => self.enter_operator(op),
            Key::Equals => self.equals(),
            Key::Clear => self.clear(),
        }
    }

    fn clear(&mut self) {
        self.current.clear();
        self.operator = None;
        self.operand = Operand::Empty;
        self.waiting_for_operand = false;
        self.display = "0".to_string();
    }

    fn enter_digit(&mut self, c: char) {
        if self.waiting_for_operand {
            self.current.clear();
            self.waiting_for_operand = false;
        }
        if c == '.' && self.current.contains('.') {
            return;
        }
        if self.current.chars().count() < self.max_digits {
            self.current.push(c);
            self.display = self.current.clone();
        }
    }

    fn enter_operator(&mut self, op: Operation) {
        if self.current.is_empty() && self.operand.is_empty() {
            return;
        }

        if !self.operand.is_empty() && !self.current.is_empty() {
            let Some(result) = self.evaluate() else {
                self.display = NOT_READY.to_string();
                return;
            };
            self.display = result.to_string();
            self.operand = Operand::Value(result);
            self.current.clear();
        } else if !self.current.is_empty() {
            self.operand = Operand::Entry(std::mem::take(&mut self.current));
        }

        self.operator = Some(op);
        self.waiting_for_operand = true;
    }

    fn equals(&mut self) {
        if self.operator.is_none() || self.operand.is_empty() || self.current.is_empty() {
            return;
        }

        let Some(result) = self.evaluate() else {
            self.display = NOT_READY.to_string();
            return;
        };
        self.display = result.to_string();
        self.operand = Operand::Value(result);
        self.current.clear();
        self.operator = None;
        self.waiting_for_operand = false;
    }

    /// Apply the pending operator to `operand` and `current`
    ///
    /// Returns `None` when the operator's binding is not registered.
    fn evaluate(&self) -> Option<BindingValue> {
        let Some(op) = self.operator else {
            return Some(NO_OPERATOR);
        };

        let name = self.bridge.binding_name(op);
        let args = [self.operand.as_f64(), parse_float(&self.current)];
        match self.table.call(&name, &args) {
            Ok(value) => Some(value),
            Err(BridgeError::UnknownBinding(_)) => None,
            Err(e) => {
                log::warn!("Binding {} failed: {}", name, e);
                None
            }
        }
    }
}

/// Read the longest leading decimal literal in `text`, or `NaN`
///
/// Mirrors how a JS host parses an operand: leading whitespace is skipped,
/// `Infinity` is recognised, trailing garbage is ignored.
pub fn parse_float(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut i = fraction_start;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        mantissa_digits += i - fraction_start;
        end = i;
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts if it carries at least one digit
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut i = end + 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i > exp_start {
            end = i;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}
