//! Non-destructive deep merge of [`Tree`]s.
//!
//! Object values present on both sides are merged recursively. Arrays and
//! scalars from `source` replace whatever `target` holds, and an object in
//! `source` replaces a non-object in `target`. Neither input is modified.

use crate::value::{Tree, Value};

/// Merge `source` into a copy of `target`.
///
/// # Example
/// ```rust
/// use querycrate::{merge::merge, value::Value};
///
/// let target = Value::object([("person", Value::object([("name", "name1".into())]))]);
/// let source = Value::object([("person", Value::object([("age", 22.0.into())]))]);
/// let merged = merge(target.as_object(), source.as_object());
///
/// let person = merged["person"].as_object().unwrap();
/// assert_eq!(person["name"], Value::from("name1"));
/// assert_eq!(person["age"], Value::from(22.0));
/// ```
#[must_use]
pub fn merge(target: Option<&Tree>, source: Option<&Tree>) -> Tree {
    let mut merged = target.cloned().unwrap_or_default();
    let Some(source) = source else {
        return merged;
    };

    for (key, value) in source {
        let next = match (merged.get(key), value) {
            (Some(existing), Value::Object(_)) => merge_values(existing, value),
            _ => value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    merged
}

/// Merge two values, recursing only when both are objects.
#[must_use]
pub fn merge_values(target: &Value, source: &Value) -> Value {
    match (target, source) {
        (Value::Object(t), Value::Object(s)) => Value::Object(merge(Some(t), Some(s))),
        _ => source.clone(),
    }
}
