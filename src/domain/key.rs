//! Hashable identifiers derived from JSON values.

use std::fmt;

use serde_json::{Number, Value};

/// Identifier of a node in the hierarchy.
///
/// JSON values are not hashable, so identifier and parent-identifier values
/// are normalised into this type before lookup. Whole numbers compare equal
/// regardless of their JSON spelling (`1`, `1.0`), while numbers and strings
/// never match each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKey {
    Bool(bool),
    Integer(i128),
    /// Non-integral number, kept in its canonical textual form
    Decimal(String),
    Text(String),
}

impl NodeKey {
    /// Convert an identifier value. Returns `None` for null, arrays and objects.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => Some(Self::from_number(n)),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn from_number(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            return Self::Integer(i128::from(i));
        }
        if let Some(u) = n.as_u64() {
            return Self::Integer(i128::from(u));
        }
        match n.as_f64() {
            // Bound keeps the cast exact: i128::MAX is about 1.7014e38
            Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1.7e38 => {
                Self::Integer(f as i128)
            }
            _ => Self::Decimal(n.to_string()),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

impl From<i64> for NodeKey {
    fn from(value: i64) -> Self {
        Self::Integer(i128::from(value))
    }
}

impl From<&str> for NodeKey {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
