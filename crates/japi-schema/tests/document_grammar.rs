//! Integration tests: document families, allow-list strictness and the
//! agreement between predicates and diagnostics, over hand-written and
//! generated documents.

use japi_schema::{
    classify, is_collection_data_doc, is_envelope, is_error_doc, is_meta_only_doc,
    is_resource_object, is_single_or_collection_data_doc, is_single_resource_data_doc,
    violations, Classification, DocumentKind, ERROR_MEMBERS, RESOURCE_MEMBERS,
    TOP_LEVEL_MEMBERS,
};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn article() -> Value {
    json!({
        "type": "articles",
        "id": "1",
        "attributes": {"title": "JSON:API paints my bikeshed!"},
        "relationships": {
            "author": {"data": {"type": "people", "id": "9"}}
        },
        "links": {"self": "http://example.com/articles/1"}
    })
}

// -- Scenarios ----------------------------------------------------------------

#[test]
fn users_listing_is_a_data_document() {
    let doc = json!({
        "links": {"self": "/users"},
        "data": [
            {"type": "users", "id": "1", "attributes": {"name": "Ana"}},
            {"type": "users", "id": "2", "attributes": {"name": "Rui"}}
        ],
        "jsonapi": {"version": "1.0"},
        "meta": {"total": 2}
    });
    assert!(is_envelope(&doc));
    assert!(doc.get("data").is_some());
    assert!(doc.get("errors").is_none());
    assert!(is_single_or_collection_data_doc(&doc));
    assert_eq!(classify(&doc), Classification::Collection);
}

#[test]
fn compound_document_with_included_is_a_data_document() {
    let doc = json!({
        "data": article(),
        "included": [{"type": "people", "id": "9", "attributes": {"name": "Dan"}}]
    });
    assert!(is_single_resource_data_doc(&doc));
    assert!(violations(&doc).is_empty());
}

#[test]
fn singular_versus_collection() {
    let single = json!({"data": article()});
    let many = json!({"data": [article()]});
    assert!(is_single_resource_data_doc(&single));
    assert!(!is_collection_data_doc(&single));
    assert!(is_collection_data_doc(&many));
    assert!(!is_single_resource_data_doc(&many));
}

#[test]
fn engine_error_document_with_reason_phrases() {
    let doc = json!({
        "errors": [
            {"status": "404 Not Found", "code": "JA001", "detail": "missing"},
            {"status": "409 Conflict", "code": "JA003"}
        ],
        "links": {"self": "/users/7"},
        "jsonapi": {"version": "1.0"}
    });
    assert!(is_error_doc(&doc));
    assert_eq!(classify(&doc), Classification::ErrorSet);
}

#[test]
fn meta_only_document() {
    let doc = json!({"meta": {"count": 3}});
    assert!(is_meta_only_doc(&doc));
    assert!(!is_error_doc(&doc));
    assert!(!is_single_or_collection_data_doc(&doc));
}

#[test]
fn every_kind_predicate_agrees_with_classification() {
    let cases = [
        (json!({"data": article()}), Some(DocumentKind::Resource)),
        (json!({"data": [article()]}), Some(DocumentKind::Collection)),
        (json!({"errors": [{"status": "500"}]}), Some(DocumentKind::Error)),
        (json!({"meta": {}}), Some(DocumentKind::Meta)),
        (json!({"data": 7}), None),
    ];
    for (doc, kind) in cases {
        match kind {
            Some(kind) => assert!(kind.matches(&doc), "{kind} should match {doc}"),
            None => assert_eq!(classify(&doc), Classification::Invalid),
        }
    }
}

// -- Generated documents ------------------------------------------------------

fn member_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!(null)),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::from),
        Just(json!({"k": "v"})),
    ]
}

/// An object whose member names come from `allowed`, optionally plus one
/// name drawn from `[a-z]{1,10}` that may or may not be allowed.
fn object_from(allowed: &'static [&'static str]) -> impl Strategy<Value = Value> {
    (
        proptest::sample::subsequence(allowed.to_vec(), 0..=allowed.len()),
        proptest::option::of("[a-z]{1,10}"),
        proptest::collection::vec(member_value(), allowed.len() + 1),
    )
        .prop_map(|(names, extra, values)| {
            let mut map = Map::new();
            for (name, value) in names.into_iter().zip(values.iter().cloned()) {
                map.insert(name.to_string(), value);
            }
            if let Some(extra) = extra {
                map.insert(extra, values[allowed.len()].clone());
            }
            Value::Object(map)
        })
}

fn data_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        object_from(RESOURCE_MEMBERS),
        proptest::collection::vec(object_from(RESOURCE_MEMBERS), 0..4).prop_map(Value::Array),
        member_value(),
    ]
}

fn errors_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        proptest::collection::vec(object_from(ERROR_MEMBERS), 0..4).prop_map(Value::Array),
        member_value(),
    ]
}

fn document() -> impl Strategy<Value = Value> {
    (
        proptest::option::of(data_value()),
        proptest::option::of(errors_value()),
        proptest::option::of(member_value()),
        proptest::option::of(member_value()),
        proptest::option::of(("[a-z]{1,10}", member_value())),
    )
        .prop_map(|(data, errors, meta, links, extra)| {
            let mut map = Map::new();
            if let Some(data) = data {
                map.insert("data".into(), data);
            }
            if let Some(errors) = errors {
                map.insert("errors".into(), errors);
            }
            if let Some(meta) = meta {
                map.insert("meta".into(), meta);
            }
            if let Some(links) = links {
                map.insert("links".into(), links);
            }
            if let Some((name, value)) = extra {
                map.insert(name, value);
            }
            Value::Object(map)
        })
}

proptest! {
    #[test]
    fn classification_is_idempotent(doc in document()) {
        prop_assert_eq!(classify(&doc), classify(&doc));
        prop_assert_eq!(is_error_doc(&doc), is_error_doc(&doc));
        prop_assert_eq!(violations(&doc), violations(&doc));
    }

    #[test]
    fn diagnostics_agree_with_classification(doc in document()) {
        prop_assert_eq!(violations(&doc).is_empty(), classify(&doc).is_valid());
    }

    #[test]
    fn families_are_mutually_exclusive(doc in document()) {
        let hits = [
            is_single_or_collection_data_doc(&doc),
            is_error_doc(&doc),
            is_meta_only_doc(&doc),
        ];
        prop_assert!(hits.iter().filter(|h| **h).count() <= 1);
    }

    #[test]
    fn data_family_is_union_of_single_and_collection(doc in document()) {
        prop_assert_eq!(
            is_single_or_collection_data_doc(&doc),
            is_single_resource_data_doc(&doc) || is_collection_data_doc(&doc)
        );
    }

    #[test]
    fn one_unknown_member_breaks_a_resource_object(
        names in proptest::sample::subsequence(RESOURCE_MEMBERS.to_vec(), 1..=RESOURCE_MEMBERS.len()),
        extra in "[a-z_]{1,12}",
    ) {
        prop_assume!(!RESOURCE_MEMBERS.contains(&extra.as_str()));
        let mut map = Map::new();
        for name in names {
            map.insert(name.to_string(), json!("x"));
        }
        let valid = Value::Object(map.clone());
        prop_assert!(is_resource_object(&valid));

        map.insert(extra, json!("x"));
        let tainted = Value::Object(map);
        prop_assert!(!is_resource_object(&tainted));
        let single = json!({"data": tainted.clone()});
        let many = json!({"data": [valid, tainted]});
        prop_assert!(!is_single_resource_data_doc(&single));
        prop_assert!(!is_collection_data_doc(&many));
    }

    #[test]
    fn one_unknown_member_breaks_an_envelope(extra in "[a-z_]{1,12}") {
        prop_assume!(!TOP_LEVEL_MEMBERS.contains(&extra.as_str()));
        let mut doc = json!({"meta": {"count": 1}});
        prop_assert!(is_meta_only_doc(&doc));
        doc.as_object_mut().unwrap().insert(extra, json!(1));
        prop_assert!(!is_envelope(&doc));
        prop_assert!(!is_meta_only_doc(&doc));
    }
}
