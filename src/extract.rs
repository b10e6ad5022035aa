//! Axum extractor for raw query maps.
//!
//! `axum::extract::Query` deserializes into a fixed struct and loses both
//! repeated keys and key order, both of which the translator needs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

use crate::query::QueryMap;

/// The request's query string as an ordered, multi-valued map.
///
/// # Example
/// ```rust,ignore
/// async fn list_events(FindQuery(query): FindQuery) -> Result<Json<QueryOptions>, QueryError> {
///     Ok(Json(find_all_query(&query, modifiers.get("events"))?))
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FindQuery(pub QueryMap);

impl<S> FromRequestParts<S> for FindQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(QueryMap::parse(parts.uri.query().unwrap_or_default())))
    }
}
