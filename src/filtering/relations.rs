use crate::merge::merge;
use crate::query::QueryValue;
use crate::value::{Tree, Value};

const INCLUDE: &str = "include";

/// Turn one relation path into an include wrapper.
///
/// `"events.eventCategories"` becomes
/// `{include: {events: {include: {eventCategories: true}}}}`.
#[must_use]
pub fn process_expand_string(path: &str) -> Tree {
    let relation = match path.split_once('.') {
        None => Value::object([(path, Value::Bool(true))]),
        Some((first, rest)) => Value::object([(first, Value::Object(process_expand_string(rest)))]),
    };
    let mut wrapper = Tree::new();
    wrapper.insert(INCLUDE.to_string(), relation);
    wrapper
}

/// Build the include tree from `_embed` and `_expand`.
///
/// Every value of both parameters is split on `,`; the resulting paths (embed
/// first, then expand) are expanded and deep-merged so that several paths
/// through the same relation accumulate. Returns `None` when neither parameter
/// was given.
#[must_use]
pub fn process_relationships(embed: Option<&QueryValue>, expand: Option<&QueryValue>) -> Option<Tree> {
    if embed.is_none() && expand.is_none() {
        return None;
    }

    let include = embed
        .into_iter()
        .chain(expand)
        .flat_map(QueryValue::comma_separated)
        .fold(Tree::new(), |acc, path| {
            let expanded = process_expand_string(path);
            merge(Some(&acc), expanded.get(INCLUDE).and_then(Value::as_object))
        });
    Some(include)
}
