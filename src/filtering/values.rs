use regex::Regex;
use std::sync::LazyLock;

use crate::modifier::QueryModifier;
use crate::value::{Value, parse_number};

type Decoder = fn(&str) -> Value;

/// Inline type tags, tried in order; the first match wins.
///
/// Each pattern captures the wrapped literal in group 1.
static SPECIAL_VALUES: LazyLock<[(Regex, Decoder); 2]> = LazyLock::new(|| {
    [
        (
            Regex::new(r"^bool\((true|false)\)$").expect("Invalid regex"),
            decode_bool,
        ),
        (
            Regex::new(r"^num\(([0-9]+)\)$").expect("Invalid regex"),
            decode_num,
        ),
    ]
});

fn decode_bool(inner: &str) -> Value {
    Value::Bool(inner == "true")
}

fn decode_num(inner: &str) -> Value {
    Value::Number(parse_number(inner))
}

/// Decode `bool(true|false)` and `num(<digits>)` wrappers.
///
/// Returns `None` when the value is not an exact match for either wrapper.
#[must_use]
pub fn parse_special_value(raw: &str) -> Option<Value> {
    SPECIAL_VALUES.iter().find_map(|(pattern, decode)| {
        pattern
            .captures(raw)
            .and_then(|caps| caps.get(1))
            .map(|inner| decode(inner.as_str()))
    })
}

/// Convert a raw query value into a typed value.
///
/// Priority: the literal `null`, then the modifier's numeric fields, then its
/// boolean fields (only for `true` / `false`, other input falls through), then
/// inline wrappers, and finally the string itself.
///
/// # Example
/// ```rust
/// use querycrate::filtering::parse_value;
/// use querycrate::modifier::QueryModifier;
/// use querycrate::value::Value;
///
/// let modifier = QueryModifier::new().numeric(["id"]);
/// assert_eq!(parse_value("id", "1", Some(&modifier)), Value::Number(1.0));
/// assert_eq!(parse_value("x", "num(12)", None), Value::Number(12.0));
/// assert_eq!(parse_value("x", "null", None), Value::Null);
/// ```
#[must_use]
pub fn parse_value(key: &str, raw: &str, modifier: Option<&QueryModifier>) -> Value {
    if raw == "null" {
        return Value::Null;
    }
    if let Some(modifier) = modifier {
        if modifier.is_numeric(key) {
            return Value::Number(parse_number(raw));
        }
        if modifier.is_boolean(key) {
            match raw {
                "true" => return Value::Bool(true),
                "false" => return Value::Bool(false),
                _ => {}
            }
        }
    }
    parse_special_value(raw).unwrap_or_else(|| Value::String(raw.to_string()))
}
