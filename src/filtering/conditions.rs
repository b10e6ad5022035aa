use crate::errors::QueryError;
use crate::modifier::QueryModifier;
use crate::query::{QueryMap, QueryValue};
use crate::value::{Tree, Value};

use super::nested::transform_dot_keys;
use super::values::parse_value;

/// Case-insensitive matching flag attached to `_like` conditions.
const INSENSITIVE: &str = "insensitive";

/// Comparison operators recognised as key suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Greater than or equal (`_gte`)
    Gte,
    /// Less than or equal (`_lte`)
    Lte,
    /// Greater than (`_gt`)
    Gt,
    /// Less than (`_lt`)
    Lt,
    /// Not equal (`_ne`)
    Ne,
    /// Case-insensitive substring, prefix or suffix match (`_like`)
    Like,
}

impl FilterOperator {
    /// Parse the part of a key after its first `_`.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "gte" => Some(Self::Gte),
            "lte" => Some(Self::Lte),
            "gt" => Some(Self::Gt),
            "lt" => Some(Self::Lt),
            "ne" => Some(Self::Ne),
            "like" => Some(Self::Like),
            _ => None,
        }
    }

    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Gte => "gte",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Lt => "lt",
            Self::Ne => "ne",
            Self::Like => "like",
        }
    }

    /// Wrap a parsed value in this operator's condition object.
    ///
    /// # Errors
    /// `Like` fails with [`QueryError::UnsupportedLikeValue`] on numbers and
    /// booleans.
    pub fn apply(self, field: &str, value: Value) -> Result<Tree, QueryError> {
        let mut condition = Tree::new();
        match self {
            Self::Gte | Self::Lte | Self::Gt | Self::Lt => {
                condition.insert(self.suffix().to_string(), value);
            }
            Self::Ne => {
                condition.insert("not".to_string(), value);
            }
            Self::Like => {
                let pattern = match value {
                    Value::String(s) => s,
                    // A literal null is matched as the text "null"
                    Value::Null => "null".to_string(),
                    other => return Err(QueryError::unsupported_like(field, other.kind())),
                };
                let (op, operand) = like_condition(&pattern);
                condition.insert(op.to_string(), Value::from(operand));
                condition.insert("mode".to_string(), Value::from(INSENSITIVE));
            }
        }
        Ok(condition)
    }
}

/// `^abc` matches a prefix, `abc$` a suffix, anything else a substring.
fn like_condition(pattern: &str) -> (&'static str, &str) {
    if let Some(rest) = pattern.strip_prefix('^') {
        ("startsWith", rest)
    } else if let Some(rest) = pattern.strip_suffix('$') {
        ("endsWith", rest)
    } else {
        ("contains", pattern)
    }
}

/// Build the `where` tree from filter parameters.
///
/// - Repeated keys become `{in: [...]}` under the key as written.
/// - `field_op=value` with a known operator becomes `{field: {op: value}}`;
///   several operators on one field share one object.
/// - Anything else is stored under the full key.
///
/// Dotted keys are finally expanded into nested objects.
///
/// # Errors
/// Returns [`QueryError::UnsupportedLikeValue`] when a `_like` filter holds a
/// number or boolean.
///
/// # Example
/// ```rust
/// use querycrate::filtering::process_filtering;
/// use querycrate::query::QueryMap;
/// use serde_json::json;
///
/// let filters = QueryMap::parse("guests.fans_gt=num(21000)&name_like=^Jo");
/// let tree = process_filtering(&filters, None).unwrap();
/// assert_eq!(
///     serde_json::to_value(&tree).unwrap(),
///     json!({
///         "guests": {"fans": {"gt": 21000}},
///         "name": {"startsWith": "Jo", "mode": "insensitive"}
///     })
/// );
/// ```
pub fn process_filtering(
    filters: &QueryMap,
    modifier: Option<&QueryModifier>,
) -> Result<Tree, QueryError> {
    let mut conditions = Tree::new();

    for (key, value) in filters.iter() {
        match value {
            QueryValue::Many(values) => {
                let parsed = values
                    .iter()
                    .map(|raw| parse_value(key, raw, modifier))
                    .collect();
                conditions.insert(key.to_string(), Value::object([("in", Value::Array(parsed))]));
            }
            QueryValue::Single(raw) => {
                let (field, suffix) = key
                    .split_once('_')
                    .map_or((key, None), |(field, suffix)| (field, Some(suffix)));
                let parsed = parse_value(field, raw, modifier);

                let Some(operator) = suffix.and_then(FilterOperator::from_suffix) else {
                    conditions.insert(key.to_string(), parsed);
                    continue;
                };

                let condition = operator.apply(field, parsed)?;
                match conditions.get_mut(field).and_then(Value::as_object_mut) {
                    Some(existing) => existing.extend(condition),
                    None => {
                        conditions.insert(field.to_string(), Value::Object(condition));
                    }
                }
            }
        }
    }

    Ok(transform_dot_keys(&conditions))
}
