//! Typed values produced by query translation.
//!
//! Filter and include trees are built out of [`Value`] nodes keyed by
//! insertion-ordered maps ([`Tree`]). Numbers are kept as `f64` so a failed
//! numeric coercion can be carried through as NaN instead of being rejected.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Nested, insertion-ordered mapping used for `where` and `include` trees.
pub type Tree = IndexMap<String, Value>;

/// Largest integer an `f64` represents exactly (2^53).
pub(crate) const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Tree),
}

impl Value {
    /// Build an object value from key/value pairs.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&Tree> {
        match self {
            Self::Object(tree) => Some(tree),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Tree> {
        match self {
            Self::Object(tree) => Some(tree),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Short type name used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
                    #[allow(clippy::cast_possible_truncation)]
                    let integral = *n as i64;
                    serializer.serialize_i64(integral)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => items.serialize(serializer),
            Self::Object(tree) => tree.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Tree> for Value {
    fn from(value: Tree) -> Self {
        Self::Object(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

/// Numeric coercion with the leniency of a browser/Node `Number()` call.
///
/// Surrounding whitespace is ignored, the empty string is `0`, `0x` prefixes
/// are read as hexadecimal and anything else that does not parse is NaN.
#[must_use]
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        #[allow(clippy::cast_precision_loss)]
        let parsed = u64::from_str_radix(hex, 16).map_or(f64::NAN, |n| n as f64);
        return parsed;
    }
    // Rust's float parser also accepts "inf" and "nan" spellings.
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}
