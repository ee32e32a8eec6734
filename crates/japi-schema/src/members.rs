//! # Member Allow-Lists
//!
//! Permitted member names per object kind.

use serde_json::{Map, Value};

/// Members permitted at the top level of a document.
pub const TOP_LEVEL_MEMBERS: &[&str] = &["jsonapi", "links", "data", "included", "errors", "meta"];

/// Members permitted in a resource object.
pub const RESOURCE_MEMBERS: &[&str] = &["type", "id", "attributes", "relationships", "links", "meta"];

/// Members permitted in an error object.
pub const ERROR_MEMBERS: &[&str] = &[
    "id", "links", "status", "code", "title", "detail", "source", "meta",
];

/// True when `value` is a non-empty object whose members all appear in `allowed`.
pub fn conforms(value: &Value, allowed: &[&str]) -> bool {
    match value.as_object() {
        Some(map) => !map.is_empty() && unknown_members(map, allowed).next().is_none(),
        None => false,
    }
}

/// Member names of `map` that are not in `allowed`, in key order.
pub fn unknown_members<'a>(
    map: &'a Map<String, Value>,
    allowed: &'a [&'a str],
) -> impl Iterator<Item = &'a str> + 'a {
    map.keys()
        .map(String::as_str)
        .filter(move |k| !allowed.contains(k))
}
