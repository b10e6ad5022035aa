//! Raw query input: the flat key/value map handed over by the HTTP layer.
//!
//! Repeated keys are aggregated into [`QueryValue::Many`] and keys keep the
//! order of their first appearance, which the filter propagator relies on.

use indexmap::IndexMap;
use indexmap::map::Entry;
use utoipa::IntoParams;

/// Control keys that never become filters.
pub const RESERVED_KEYS: [&str; 8] = [
    "_embed", "_expand", "_sort", "_order", "_page", "_start", "_end", "_limit",
];

/// A single query value or the ordered values of a repeated key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    Many(Vec<String>),
}

impl QueryValue {
    /// Iterate over the raw values in order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let slice = match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Many(values) => values.as_slice(),
        };
        slice.iter().map(String::as_str)
    }

    /// Flatten every value and split it on `,`, dropping empty tokens.
    #[must_use]
    pub fn comma_separated(&self) -> Vec<&str> {
        self.values()
            .flat_map(|value| value.split(','))
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// Last value, used by parameters that only make sense once.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.values().last()
    }

    /// An empty single value (`_page=`) counts as not given.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Single(value) => value.is_empty(),
            Self::Many(values) => values.is_empty(),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// Ordered map of query keys to their values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMap {
    entries: IndexMap<String, QueryValue>,
}

impl QueryMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a raw `application/x-www-form-urlencoded` query string.
    ///
    /// # Example
    /// ```rust
    /// use querycrate::query::{QueryMap, QueryValue};
    ///
    /// let query = QueryMap::parse("id=6&id=7&name=John%20Doe");
    /// assert_eq!(query.get("id"), Some(&QueryValue::from(vec!["6", "7"])));
    /// assert_eq!(query.get("name"), Some(&QueryValue::from("John Doe")));
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        url::form_urlencoded::parse(raw.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    /// Append a value, turning the entry into a list if the key repeats.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        match self.entries.entry(key.into()) {
            Entry::Vacant(slot) => {
                slot.insert(QueryValue::Single(value));
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                QueryValue::Many(values) => values.push(value),
                QueryValue::Single(first) => {
                    let first = std::mem::take(first);
                    slot.insert(QueryValue::Many(vec![first, value]));
                }
            },
        }
    }

    /// Replace whatever value the key holds.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.entries.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in order of first appearance.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for QueryMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (key, value) in iter {
            query.append(key, value);
        }
        query
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for QueryMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

/// Control parameters recognised on list and detail endpoints.
///
/// # Relationships
/// `_embed` and `_expand` take comma separated relation paths, dot separated
/// for nesting, for example `_expand=events.hosts,guests`.
///
/// # Sorting
/// `_sort=duration,id&_order=desc` sorts by `duration` descending, then `id`
/// ascending.
///
/// # Pagination
/// Either `_page` with `_limit` (default 10), or `_start` with `_end` or
/// `_limit`.
#[derive(Debug, Clone, Default, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReservedParams {
    /// Relations to include, e.g. `guests,events.hosts`
    #[param(rename = "_embed", value_type = Option<String>)]
    pub embed: Option<QueryValue>,
    /// Relations to include, merged with `_embed`
    #[param(rename = "_expand", value_type = Option<String>)]
    pub expand: Option<QueryValue>,
    /// Sort fields, e.g. `duration,id`
    #[param(rename = "_sort", value_type = Option<String>)]
    pub sort: Option<QueryValue>,
    /// Sort directions matched to `_sort` by position
    #[param(rename = "_order", value_type = Option<String>)]
    pub order: Option<QueryValue>,
    /// Page number (1-based)
    #[param(rename = "_page", value_type = Option<i64>)]
    pub page: Option<QueryValue>,
    /// Page size or slice length
    #[param(rename = "_limit", value_type = Option<i64>)]
    pub limit: Option<QueryValue>,
    /// First index of a slice
    #[param(rename = "_start", value_type = Option<i64>)]
    pub start: Option<QueryValue>,
    /// End index (exclusive) of a slice
    #[param(rename = "_end", value_type = Option<i64>)]
    pub end: Option<QueryValue>,
}

/// Separate control parameters from filters.
///
/// Returns the reserved values and a map holding every other key, in the
/// original order.
#[must_use]
pub fn split_reserved(query: &QueryMap) -> (ReservedParams, QueryMap) {
    let mut reserved = ReservedParams::default();
    let mut filters = QueryMap::new();

    for (key, value) in query.iter() {
        let slot = match key {
            "_embed" => &mut reserved.embed,
            "_expand" => &mut reserved.expand,
            "_sort" => &mut reserved.sort,
            "_order" => &mut reserved.order,
            "_page" => &mut reserved.page,
            "_limit" => &mut reserved.limit,
            "_start" => &mut reserved.start,
            "_end" => &mut reserved.end,
            _ => {
                filters.insert(key, value.clone());
                continue;
            }
        };
        if !value.is_blank() {
            *slot = Some(value.clone());
        }
    }

    (reserved, filters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aggregates_repeated_keys() {
        let query = QueryMap::parse("_sort=startTime&_sort=id&_order=asc");
        assert_eq!(query.get("_sort"), Some(&QueryValue::from(vec!["startTime", "id"])));
        assert_eq!(query.get("_order"), Some(&QueryValue::from("asc")));
    }

    #[test]
    fn test_parse_keeps_first_appearance_order() {
        let query = QueryMap::parse("hosts.every.name_like=Hitesh&_expand=hosts&hosts.every.name_like=Raj");
        let keys: Vec<&str> = query.keys().collect();
        assert_eq!(keys, vec!["hosts.every.name_like", "_expand"]);
    }

    #[test]
    fn test_parse_decodes_and_strips_question_mark() {
        let query = QueryMap::parse("?name_like=%5EJo&title=hello+world");
        assert_eq!(query.get("name_like"), Some(&QueryValue::from("^Jo")));
        assert_eq!(query.get("title"), Some(&QueryValue::from("hello world")));
    }

    #[test]
    fn test_parse_empty() {
        assert!(QueryMap::parse("").is_empty());
    }

    #[test]
    fn test_comma_separated_flattens() {
        let value = QueryValue::from(vec!["users,posts.comments", "hosts", ""]);
        assert_eq!(value.comma_separated(), vec!["users", "posts.comments", "hosts"]);
    }

    #[test]
    fn test_last_value() {
        assert_eq!(QueryValue::from(vec!["1", "2"]).last(), Some("2"));
        assert_eq!(QueryValue::from("5").last(), Some("5"));
    }

    #[test]
    fn test_split_reserved() {
        let query = QueryMap::parse("_expand=guests&guests.name_like=John&_page=2&_limit=5&id=6");
        let (reserved, filters) = split_reserved(&query);

        assert_eq!(reserved.expand, Some(QueryValue::from("guests")));
        assert_eq!(reserved.page, Some(QueryValue::from("2")));
        assert_eq!(reserved.limit, Some(QueryValue::from("5")));
        assert_eq!(reserved.embed, None);

        let keys: Vec<&str> = filters.keys().collect();
        assert_eq!(keys, vec!["guests.name_like", "id"]);
    }

    #[test]
    fn test_split_reserved_blank_counts_as_absent() {
        let (reserved, filters) = split_reserved(&QueryMap::parse("_page=&_start=0"));
        assert_eq!(reserved.page, None);
        assert_eq!(reserved.start, Some(QueryValue::from("0")));
        assert!(filters.is_empty());
    }

    #[test]
    fn test_reserved_params_openapi_names() {
        let params = ReservedParams::into_params(|| None);
        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        for key in RESERVED_KEYS {
            assert!(names.contains(&key), "missing parameter {key}");
        }
    }
}
