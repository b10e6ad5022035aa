use crate::merge::merge;
use crate::value::{Tree, Value};

/// Expand a dot-separated key into nested objects.
///
/// `"eventSchedule.type"` with `"festive"` becomes
/// `{eventSchedule: {type: "festive"}}`; a key without dots maps directly.
#[must_use]
pub fn nest_dotted_key(key: &str, value: Value) -> Tree {
    let mut tree = Tree::new();
    match key.split_once('.') {
        None => {
            tree.insert(key.to_string(), value);
        }
        Some((first, rest)) => {
            tree.insert(first.to_string(), Value::Object(nest_dotted_key(rest, value)));
        }
    }
    tree
}

/// Nest every dotted key of `flat` and deep-merge the results.
///
/// `{"a.b": 1, "a.c": 2}` becomes `{a: {b: 1, c: 2}}`. Trees without dotted
/// keys come back unchanged.
#[must_use]
pub fn transform_dot_keys(flat: &Tree) -> Tree {
    flat.iter().fold(Tree::new(), |acc, (key, value)| {
        merge(Some(&acc), Some(&nest_dotted_key(key, value.clone())))
    })
}
