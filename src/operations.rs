//! Query assembly: raw query map in, structured query description out.
//!
//! ```rust
//! use querycrate::{QueryMap, QueryModifier, find_all_query};
//! use serde_json::json;
//!
//! let query = QueryMap::parse("_expand=guests&guests.name_like=John&_sort=id&_page=2&_limit=5");
//! let modifier = QueryModifier::new().numeric(["id", "duration"]);
//! let options = find_all_query(&query, Some(&modifier)).unwrap();
//!
//! assert_eq!(serde_json::to_value(&options).unwrap(), json!({
//!     "include": {"guests": {"where": {"name": {"contains": "John", "mode": "insensitive"}}}},
//!     "orderBy": [{"id": "asc"}],
//!     "skip": 5,
//!     "take": 5
//! }));
//! ```

use crate::errors::QueryError;
use crate::filtering::{
    process_filtering, process_relationships, process_sorting, propagate, resolve_window,
};
use crate::models::{FindOneOptions, QueryOptions};
use crate::modifier::QueryModifier;
use crate::query::{QueryMap, ReservedParams, split_reserved};
use crate::value::Tree;

/// Filters and includes with relation filters already moved into place.
fn filters_and_includes(
    query: &QueryMap,
    reserved: &ReservedParams,
    filters: &QueryMap,
    modifier: Option<&QueryModifier>,
) -> Result<(Option<Tree>, Option<Tree>), QueryError> {
    let mut filter = process_filtering(filters, modifier)?;
    let mut include = process_relationships(reserved.embed.as_ref(), reserved.expand.as_ref());

    if let Some(include) = include.as_mut() {
        let query_keys: Vec<&str> = query.keys().collect();
        propagate(&mut filter, include, &query_keys);
    }

    let filter = (!filter.is_empty()).then_some(filter);
    Ok((filter, include))
}

/// Translate a list query.
///
/// Reserved keys are split off, the rest become filters parsed with
/// `modifier`, relation filters are propagated into `include`, and sorting
/// and pagination are resolved. An empty `where` is reported as `None`.
///
/// # Errors
/// Returns [`QueryError::UnsupportedLikeValue`] when a `_like` filter holds a
/// number or boolean.
pub fn find_all_query(
    query: &QueryMap,
    modifier: Option<&QueryModifier>,
) -> Result<QueryOptions, QueryError> {
    let (reserved, filters) = split_reserved(query);
    tracing::debug!(filters = filters.len(), "Translating list query");

    let (filter, include) = filters_and_includes(query, &reserved, &filters, modifier)?;
    let window = resolve_window(&reserved);
    if let Some(window) = window {
        tracing::debug!(skip = ?window.skip, take = ?window.take, "Resolved pagination window");
    }

    Ok(QueryOptions {
        filter,
        include,
        order_by: process_sorting(reserved.sort.as_ref(), reserved.order.as_ref()),
        skip: window.and_then(|w| w.skip),
        take: window.and_then(|w| w.take),
    })
}

/// Translate a single-record query.
///
/// Only the include tree is returned. Filters are still parsed and propagated,
/// so relation filters written after `_expand` land in `include`, but any
/// filter left at the top level is dropped, as are sorting and pagination.
///
/// # Errors
/// Returns [`QueryError::UnsupportedLikeValue`] when a `_like` filter holds a
/// number or boolean.
pub fn find_one_query(query: &QueryMap) -> Result<FindOneOptions, QueryError> {
    let (reserved, filters) = split_reserved(query);

    let (filter, include) = filters_and_includes(query, &reserved, &filters, None)?;
    if let Some(filter) = filter {
        // TODO: decide whether detail routes should honour top-level filters
        tracing::debug!(fields = filter.len(), "Dropping top-level filters on single-record query");
    }

    Ok(FindOneOptions { include })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn find_all(raw: &str, modifier: Option<&QueryModifier>) -> serde_json::Value {
        serde_json::to_value(find_all_query(&QueryMap::parse(raw), modifier).unwrap()).unwrap()
    }

    #[test]
    fn test_in_list_with_modifier() {
        let modifier = QueryModifier::new().numeric(["id"]);
        assert_eq!(find_all("id=6&id=7", Some(&modifier)), json!({"where": {"id": {"in": [6, 7]}}}));
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(find_all("", None), json!({}));
    }

    #[test]
    fn test_orphaned_filter_kept_on_parent() {
        assert_eq!(
            find_all("hosts.every.name_like=Hitesh&_expand=hosts", None),
            json!({
                "where": {"hosts": {"every": {"name": {"contains": "Hitesh", "mode": "insensitive"}}}},
                "include": {"hosts": true}
            })
        );
    }

    #[test]
    fn test_propagated_filter_clears_where() {
        let options = find_all_query(&QueryMap::parse("_expand=hosts&hosts.name_like=Hitesh"), None).unwrap();
        assert_eq!(options.filter, None);
        assert_eq!(
            serde_json::to_value(&options.include).unwrap(),
            json!({"hosts": {"where": {"name": {"contains": "Hitesh", "mode": "insensitive"}}}})
        );
    }

    #[test]
    fn test_unparsable_page_keeps_page_mode() {
        assert_eq!(find_all("_page=abc&_start=2&_end=4", None), json!({"take": 10}));
        assert_eq!(find_all("_page=1.5", None), json!({"skip": 5, "take": 10}));
        assert_eq!(find_all("_limit=2.5&_page=1", None), json!({"skip": 0}));
    }

    #[test]
    fn test_like_error_propagates() {
        let modifier = QueryModifier::new().numeric(["fans"]);
        let err = find_all_query(&QueryMap::parse("fans_like=3"), Some(&modifier)).unwrap_err();
        assert_eq!(err, QueryError::unsupported_like("fans", "number"));
    }

    #[test]
    fn test_find_one_returns_only_include() {
        let options = find_one_query(&QueryMap::parse(
            "_expand=guests&guests.vip=bool(true)&name=Gala&_sort=id&_page=2",
        ))
        .unwrap();
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"include": {"guests": {"where": {"vip": true}}}})
        );
    }

    #[test]
    fn test_find_one_without_relations() {
        let options = find_one_query(&QueryMap::parse("id=1")).unwrap();
        assert_eq!(options, FindOneOptions { include: None });
    }

    #[test]
    fn test_find_one_ignores_modifier_types() {
        // Detail queries have no modifier, so `like` on a plain value is fine
        let options = find_one_query(&QueryMap::parse("fans_like=3")).unwrap();
        assert_eq!(options.include, None);
    }
}
