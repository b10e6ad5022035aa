use querycrate::QueryError;
use serde_json::json;

mod common;
use common::translate;

/// Routes and the list query description each one should produce.
///
/// These double as documentation of the query syntax.
fn route_table() -> Vec<(&'static str, serde_json::Value)> {
    vec![
        ("/events?id=6&id=7", json!({"where": {"id": {"in": [6, 7]}}})),
        // expand guests named like John
        (
            "/events?_expand=guests&guests.name_like=John",
            json!({"include": {"guests": {"where": {"name": {"contains": "John", "mode": "insensitive"}}}}}),
        ),
        // expand guests that are not vip
        (
            "/events?_expand=guests&guests.vip=bool(false)",
            json!({"include": {"guests": {"where": {"vip": false}}}}),
        ),
        // events whose hosts are all like Hitesh; the filter precedes _expand so it stays on events
        (
            "/events?hosts.every.name_like=Hitesh&_expand=hosts",
            json!({
                "where": {"hosts": {"every": {"name": {"contains": "Hitesh", "mode": "insensitive"}}}},
                "include": {"hosts": true}
            }),
        ),
        // all events, with only the hosts like Hitesh
        (
            "/events?_expand=hosts&hosts.name_like=Hitesh",
            json!({"include": {"hosts": {"where": {"name": {"contains": "Hitesh", "mode": "insensitive"}}}}}),
        ),
        // several filters on one included relation
        (
            "/events?_expand=guests&guests.name_like=Rahul&guests.vip=bool(true)",
            json!({"include": {"guests": {"where": {
                "vip": true,
                "name": {"contains": "Rahul", "mode": "insensitive"}
            }}}}),
        ),
        ("/guests?eventSignupId_ne=null", json!({"where": {"eventSignupId": {"not": null}}})),
        // several paths through the same relation
        (
            "/eventCategories?_expand=events.hosts&_expand=events.eventMetadata",
            json!({"include": {"events": {"include": {"eventMetadata": true, "hosts": true}}}}),
        ),
        (
            "/events?_sort=startTime&_sort=id&_order=asc",
            json!({"orderBy": [{"startTime": "asc"}, {"id": "asc"}]}),
        ),
        // id falls back to asc
        (
            "/events?_sort=duration,id&_order=desc",
            json!({"orderBy": [{"duration": "desc"}, {"id": "asc"}]}),
        ),
        ("/guests?_page=2&_limit=5", json!({"skip": 5, "take": 5})),
        ("/guests?_start=0&_end=10", json!({"skip": 0, "take": 10})),
        // nested numbers need num(), the modifier only covers top-level fields
        (
            "/events?_expand=guests&guests.fans_gt=num(21000)",
            json!({"include": {"guests": {"where": {"fans": {"gt": 21000}}}}}),
        ),
        // fans is numeric through the guests modifier
        (
            "/guests?eventId=1&fans_gt=21000",
            json!({"where": {"eventId": 1, "fans": {"gt": 21000}}}),
        ),
    ]
}

#[test]
fn test_route_table() {
    for (route, expected) in route_table() {
        let options = translate(route).unwrap_or_else(|e| panic!("{route}: {e}"));
        assert_eq!(serde_json::to_value(&options).unwrap(), expected, "route {route}");
    }
}

#[test]
fn test_embed_behaves_like_expand() {
    let options = translate("/events?_embed=guests&guests.vip=bool(true)").unwrap();
    assert_eq!(
        serde_json::to_value(&options).unwrap(),
        json!({"include": {"guests": {"where": {"vip": true}}}})
    );

    let options = translate("/events?guests.some.vip=bool(true)&_embed=guests").unwrap();
    assert_eq!(
        serde_json::to_value(&options).unwrap(),
        json!({"where": {"guests": {"some": {"vip": true}}}, "include": {"guests": true}})
    );
}

#[test]
fn test_everything_together() {
    let options = translate(
        "/guests?_expand=event&event.name_like=%5EGala&vip=true&fans_gte=100&fans_lte=900&_sort=fans&_order=desc&_page=3",
    )
    .unwrap();
    assert_eq!(
        serde_json::to_value(&options).unwrap(),
        json!({
            "where": {"vip": true, "fans": {"gte": 100, "lte": 900}},
            "include": {"event": {"where": {"name": {"startsWith": "Gala", "mode": "insensitive"}}}},
            "orderBy": [{"fans": "desc"}],
            "skip": 20,
            "take": 10
        })
    );
}

#[test]
fn test_like_on_numeric_field_is_rejected() {
    let err = translate("/guests?fans_like=21000").unwrap_err();
    assert_eq!(err, QueryError::unsupported_like("fans", "number"));
}

#[test]
fn test_like_on_boolean_field_is_rejected() {
    let err = translate("/guests?vip_like=true").unwrap_err();
    assert_eq!(err, QueryError::unsupported_like("vip", "boolean"));
}

#[test]
fn test_non_numeric_value_on_numeric_field_is_nan() {
    let options = translate("/events?id=abc").unwrap();
    let filter = options.filter.unwrap();
    assert!(matches!(filter["id"], querycrate::Value::Number(n) if n.is_nan()));
}

#[test]
fn test_repeated_operator_key_stays_literal() {
    let options = translate("/events?id_gt=1&id_gt=2").unwrap();
    assert_eq!(
        serde_json::to_value(&options).unwrap(),
        json!({"where": {"id_gt": {"in": ["1", "2"]}}})
    );
}
