use crate::error::BridgeError;
use serde_json::Value;
use std::fmt;

/// Key of the only field the bridge looks at by name.
pub const LOGGED_IN: &str = "loggedIn";

/// A single response field. Scalars get their own variant; arrays and objects
/// are kept whole.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
    Null,
    Composite(Value),
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => FieldValue::String(s),
            Value::Number(n) => FieldValue::Number(n),
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Null => FieldValue::Null,
            composite => FieldValue::Composite(composite),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Number(n) => match n.as_f64() {
                Some(x) => f.write_str(&number_to_string(x)),
                None => write!(f, "{}", n),
            },
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => f.write_str("null"),
            FieldValue::Composite(v) => write!(f, "{}", v),
        }
    }
}

/// Renders a double the way string concatenation does: plain notation for
/// decimal exponents in `-6..=20`, `d.ddde±x` outside of it, and no `-0`.
fn number_to_string(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    if !x.is_finite() {
        return if x.is_nan() {
            "NaN".to_string()
        } else if x > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }
    if x < 0.0 {
        return format!("-{}", number_to_string(-x));
    }

    // Shortest round-trip digits, e.g. "1.2345e3".
    let sci = format!("{:e}", x);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let k = digits.len() as i32;
    let n = exp + 1;

    if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{}.{}", int, frac)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let sign = if n - 1 < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, sign, (n - 1).abs())
        } else {
            format!("{}.{}e{}{}", first, rest, sign, (n - 1).abs())
        }
    }
}

/// Decoded identity provider response. No schema is assumed; fields keep the
/// order the response sent them in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    fields: Vec<(String, FieldValue)>,
}

impl Payload {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key, value))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `loggedIn` as it should appear in the log, `undefined` when absent.
    pub fn logged_in(&self) -> String {
        self.get(LOGGED_IN)
            .map(ToString::to_string)
            .unwrap_or_else(|| "undefined".to_string())
    }
}

impl TryFrom<Value> for Payload {
    type Error = BridgeError;

    /// Objects map key by key. Arrays are keyed by index, so they never carry
    /// a `loggedIn` field. Scalars and `null` have no fields to walk.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let fields = match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| (key, FieldValue::from(value)))
                .collect(),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, value)| (index.to_string(), FieldValue::from(value)))
                .collect(),
            _ => return Err(BridgeError::NotAnObject),
        };

        Ok(Payload { fields })
    }
}
