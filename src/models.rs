use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::value::Tree;

/// Structured description of a list query.
///
/// Every field is optional and left out of the serialized form when absent,
/// so the output can be handed straight to a data-access layer that expects
/// `{ where, include, orderBy, skip, take }`.
///
/// # Example
/// ```json
/// {
///   "where": { "fans": { "gt": 21000 } },
///   "include": { "guests": { "where": { "vip": true } } },
///   "orderBy": [ { "duration": "desc" }, { "id": "asc" } ],
///   "skip": 5,
///   "take": 5
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryOptions {
    /// Filter tree for the top-level records
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub filter: Option<Tree>,
    /// Relations to load, with their own nested filters
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub include: Option<Tree>,
    /// Sort directives in priority order
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub order_by: Option<Vec<SortDirective>>,
    /// Number of records to skip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,
    /// Number of records to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take: Option<i64>,
}

/// Structured description of a single-record query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct FindOneOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub include: Option<Tree>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` in any case means descending; anything else is ascending.
    #[must_use]
    pub fn parse(order: &str) -> Self {
        if order.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// One `orderBy` entry, serialized as `{ field: "asc" | "desc" }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDirective {
    pub field: String,
    pub direction: SortDirection,
}

impl SortDirective {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

impl Serialize for SortDirective {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.direction)?;
        map.end()
    }
}
