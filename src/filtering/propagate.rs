use crate::value::{Tree, Value};

/// Position of the first key addressing `relation` through a dotted path.
fn prefix_index(query_keys: &[&str], relation: &str) -> Option<usize> {
    query_keys.iter().position(|key| {
        key.strip_prefix(relation)
            .is_some_and(|rest| rest.starts_with('.'))
    })
}

/// Whether the relation's filter was written before `control` in the query.
fn precedes(query_keys: &[&str], filter_index: Option<usize>, control: &str) -> bool {
    let control_index = query_keys.iter().position(|key| *key == control);
    matches!((filter_index, control_index), (Some(f), Some(c)) if f < c)
}

/// Move filters on included relations into the relation's own `where`.
///
/// For every relation present in both trees, the filter is moved into
/// `include[relation].where` and removed from `filter`, unless a key starting
/// with `relation.` appears before `_expand` or `_embed` in `query_keys`. In
/// that case the filter stays at the top level and scopes the parent records.
///
/// `_expand=hosts&hosts.name_like=X` filters the included hosts, while
/// `hosts.every.name_like=X&_expand=hosts` filters the parent by its hosts.
pub fn propagate(filter: &mut Tree, include: &mut Tree, query_keys: &[&str]) {
    for (relation, included) in include.iter_mut() {
        if !filter.contains_key(relation) {
            continue;
        }

        let filter_index = prefix_index(query_keys, relation);
        if precedes(query_keys, filter_index, "_expand") || precedes(query_keys, filter_index, "_embed") {
            tracing::debug!(
                relation = %relation,
                "Filter precedes expansion, keeping it on the parent"
            );
            continue;
        }

        let Some(relation_filter) = filter.shift_remove(relation) else {
            continue;
        };
        tracing::debug!(relation = %relation, "Moving filter into included relation");

        match included {
            Value::Object(nested) => {
                nested.insert("where".to_string(), relation_filter);
            }
            _ => {
                *included = Value::object([("where", relation_filter)]);
            }
        }
    }
}
