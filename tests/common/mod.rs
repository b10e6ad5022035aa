use axum::{
    Json, Router,
    extract::{Path, State},
};
use querycrate::{
    FindOneOptions, FindQuery, QueryError, QueryMap, QueryModifier, QueryModifiers, QueryOptions,
    find_all_query, find_one_query,
};
use std::sync::Arc;

pub mod event_entity;

/// Type hints for the endpoints exercised by the integration suites.
pub fn modifiers() -> QueryModifiers {
    QueryModifiers::new()
        .with("events", QueryModifier::new().numeric(["id", "duration"]))
        .with(
            "guests",
            QueryModifier::new()
                .numeric(["id", "fans", "eventId", "eventSignupId"])
                .boolean(["vip"]),
        )
        .with("eventCategories", QueryModifier::new().numeric(["id"]))
}

/// Split `/endpoint?query` into its endpoint name and parsed query.
pub fn split_route(route: &str) -> (&str, QueryMap) {
    let (path, query) = route.split_once('?').unwrap_or((route, ""));
    (path.trim_start_matches('/'), QueryMap::parse(query))
}

/// Translate a list route the way an endpoint handler would.
pub fn translate(route: &str) -> Result<QueryOptions, QueryError> {
    let modifiers = modifiers();
    let (endpoint, query) = split_route(route);
    let modifier = modifiers.get(endpoint);
    assert!(modifier.is_some(), "no modifier registered for {endpoint}");
    find_all_query(&query, modifier)
}

async fn list_handler(
    State(modifiers): State<Arc<QueryModifiers>>,
    Path(endpoint): Path<String>,
    FindQuery(query): FindQuery,
) -> Result<Json<QueryOptions>, QueryError> {
    Ok(Json(find_all_query(&query, modifiers.get(&endpoint))?))
}

async fn detail_handler(
    Path((_endpoint, _id)): Path<(String, String)>,
    FindQuery(query): FindQuery,
) -> Result<Json<FindOneOptions>, QueryError> {
    Ok(Json(find_one_query(&query)?))
}

/// Route translation logs to the test output; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Router echoing the translated description instead of querying a database.
pub fn setup_test_app() -> Router {
    init_tracing();
    let api = Router::new()
        .route("/{endpoint}", axum::routing::get(list_handler))
        .route("/{endpoint}/{id}", axum::routing::get(detail_handler))
        .with_state(Arc::new(modifiers()));

    Router::new().nest("/api/v1", api)
}
