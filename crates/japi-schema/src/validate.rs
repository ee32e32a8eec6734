//! # Document Validation
//!
//! Structural predicates over JSON:API documents, plus diagnostics.
//!
//! The predicates decide membership; they never report why. [`violations`]
//! walks the same grammar and lists every rule a document breaks, each with
//! a JSON Pointer to the offending location. A document has no violations
//! exactly when [`classify`] returns something other than
//! [`Classification::Invalid`].
//!
//! A document carrying both `data` and `errors` is only rejected by the
//! predicates that require one of them to be absent. [`is_envelope`] alone
//! accepts it.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::members::{conforms, unknown_members, ERROR_MEMBERS, RESOURCE_MEMBERS, TOP_LEVEL_MEMBERS};

// -- Object predicates --------------------------------------------------------

/// True when `doc` is a non-empty object carrying only top-level members.
pub fn is_envelope(doc: &Value) -> bool {
    conforms(doc, TOP_LEVEL_MEMBERS)
}

/// True when `obj` is a non-empty object carrying only resource object members.
pub fn is_resource_object(obj: &Value) -> bool {
    conforms(obj, RESOURCE_MEMBERS)
}

/// True when `obj` is a non-empty object carrying only error object members.
pub fn is_error_object(obj: &Value) -> bool {
    conforms(obj, ERROR_MEMBERS)
}

/// Placeholder: the `jsonapi` member is not inspected yet.
pub fn has_valid_jsonapi_object(_doc: &Value) -> bool {
    true
}

/// Placeholder: `links` objects are not inspected yet.
pub fn has_valid_links(_doc: &Value) -> bool {
    true
}

/// Placeholder: the `included` member is not inspected yet.
pub fn has_valid_included(_doc: &Value) -> bool {
    true
}

// -- Document predicates ------------------------------------------------------

/// The `data` member of an envelope that has `data` and lacks `errors`.
fn primary_data(doc: &Value) -> Option<&Value> {
    if !is_envelope(doc) || doc.get("errors").is_some() {
        return None;
    }
    doc.get("data")
}

/// True for a data document whose `data` is one resource object or an array
/// of resource objects. An empty array is a valid (empty) collection.
pub fn is_single_or_collection_data_doc(doc: &Value) -> bool {
    match primary_data(doc) {
        Some(data @ Value::Object(_)) => is_resource_object(data),
        Some(Value::Array(items)) => items.iter().all(is_resource_object),
        _ => false,
    }
}

/// True for a data document whose `data` is an array of resource objects.
pub fn is_collection_data_doc(doc: &Value) -> bool {
    match primary_data(doc) {
        Some(Value::Array(items)) => items.iter().all(is_resource_object),
        _ => false,
    }
}

/// True for a data document whose `data` is a single resource object.
pub fn is_single_resource_data_doc(doc: &Value) -> bool {
    match primary_data(doc) {
        Some(data @ Value::Object(_)) => is_resource_object(data),
        _ => false,
    }
}

/// True for an error document: `errors` is a non-empty array of error
/// objects and `data` is absent.
pub fn is_error_doc(doc: &Value) -> bool {
    if !is_envelope(doc) || doc.get("data").is_some() {
        return false;
    }
    match doc.get("errors") {
        Some(Value::Array(errors)) => !errors.is_empty() && errors.iter().all(is_error_object),
        _ => false,
    }
}

/// True for a document carrying `meta` and neither `data` nor `errors`.
pub fn is_meta_only_doc(doc: &Value) -> bool {
    is_envelope(doc)
        && doc.get("errors").is_none()
        && doc.get("data").is_none()
        && doc.get("meta").is_some()
}

// -- Classification -----------------------------------------------------------

/// The document family a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// `data` is a single resource object.
    SingleResource,
    /// `data` is an array of resource objects.
    Collection,
    /// `errors` is a non-empty array of error objects.
    ErrorSet,
    /// Only `meta` (and other non-primary members) present.
    MetaOnly,
    /// None of the above.
    Invalid,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SingleResource => "single-resource",
            Self::Collection => "collection",
            Self::ErrorSet => "error-set",
            Self::MetaOnly => "meta-only",
            Self::Invalid => "invalid",
        }
    }

    pub fn is_valid(self) -> bool {
        self != Self::Invalid
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a document into the first family whose predicate it satisfies.
pub fn classify(doc: &Value) -> Classification {
    if is_single_resource_data_doc(doc) {
        Classification::SingleResource
    } else if is_collection_data_doc(doc) {
        Classification::Collection
    } else if is_error_doc(doc) {
        Classification::ErrorSet
    } else if is_meta_only_doc(doc) {
        Classification::MetaOnly
    } else {
        Classification::Invalid
    }
}

/// A named expectation about a document, checked by its predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// [`is_envelope`]
    Envelope,
    /// [`is_single_or_collection_data_doc`]
    Data,
    /// [`is_collection_data_doc`]
    Collection,
    /// [`is_single_resource_data_doc`]
    Resource,
    /// [`is_error_doc`]
    Error,
    /// [`is_meta_only_doc`]
    Meta,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 6] = [
        Self::Envelope,
        Self::Data,
        Self::Collection,
        Self::Resource,
        Self::Error,
        Self::Meta,
    ];

    /// Run the predicate for this kind.
    pub fn matches(self, doc: &Value) -> bool {
        match self {
            Self::Envelope => is_envelope(doc),
            Self::Data => is_single_or_collection_data_doc(doc),
            Self::Collection => is_collection_data_doc(doc),
            Self::Resource => is_single_resource_data_doc(doc),
            Self::Error => is_error_doc(doc),
            Self::Meta => is_meta_only_doc(doc),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Envelope => "envelope",
            Self::Data => "data",
            Self::Collection => "collection",
            Self::Resource => "resource",
            Self::Error => "error",
            Self::Meta => "meta",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown document kind '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

// -- Diagnostics --------------------------------------------------------------

/// A single structural violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the violating location; empty for the document root.
    pub instance_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of violations found in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }

    fn push(&mut self, instance_path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation {
            instance_path: instance_path.into(),
            message: message.into(),
        });
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Append a reference token to a JSON Pointer (RFC 6901 escaping).
fn pointer(base: &str, token: &str) -> String {
    format!("{base}/{}", token.replace('~', "~0").replace('/', "~1"))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Check one object against an allow-list, recording violations under `path`.
fn check_object(
    value: &Value,
    allowed: &[&str],
    what: &str,
    path: &str,
    out: &mut ValidationViolations,
) -> Option<()> {
    let Some(map) = value.as_object() else {
        out.push(path, format!("{what} must be an object, found {}", json_type(value)));
        return None;
    };
    if map.is_empty() {
        out.push(path, format!("{what} must not be empty"));
    }
    check_members(map, allowed, what, path, out);
    Some(())
}

fn check_members(
    map: &Map<String, Value>,
    allowed: &[&str],
    what: &str,
    path: &str,
    out: &mut ValidationViolations,
) {
    for name in unknown_members(map, allowed) {
        out.push(pointer(path, name), format!("unknown {what} member '{name}'"));
    }
}

/// List every structural rule `doc` breaks.
///
/// An empty result means `doc` is a single-resource, collection, error or
/// meta-only document.
pub fn violations(doc: &Value) -> ValidationViolations {
    let mut out = ValidationViolations::default();
    if check_object(doc, TOP_LEVEL_MEMBERS, "document", "", &mut out).is_none() {
        return out;
    }

    let data = doc.get("data");
    let errors = doc.get("errors");

    if data.is_some() && errors.is_some() {
        out.push("", "document must not carry both data and errors");
    }

    if let Some(data) = data {
        match data {
            Value::Object(_) => {
                check_object(data, RESOURCE_MEMBERS, "resource object", "/data", &mut out);
            }
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    let path = pointer("/data", &i.to_string());
                    check_object(item, RESOURCE_MEMBERS, "resource object", &path, &mut out);
                }
            }
            other => out.push(
                "/data",
                format!(
                    "primary data must be an object or an array, found {}",
                    json_type(other)
                ),
            ),
        }
    }

    if let Some(errors) = errors {
        match errors {
            Value::Array(items) if items.is_empty() => {
                out.push("/errors", "errors must not be empty");
            }
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    let path = pointer("/errors", &i.to_string());
                    check_object(item, ERROR_MEMBERS, "error object", &path, &mut out);
                }
            }
            other => out.push(
                "/errors",
                format!("errors must be an array, found {}", json_type(other)),
            ),
        }
    }

    if data.is_none() && errors.is_none() && doc.get("meta").is_none() {
        out.push("", "document must carry data, errors or meta");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user() -> Value {
        json!({"type": "users", "id": "1", "attributes": {"name": "Ana"}})
    }

    #[test]
    fn envelope_accepts_each_top_level_member() {
        for name in TOP_LEVEL_MEMBERS {
            let mut map = Map::new();
            map.insert((*name).to_string(), json!({}));
            assert!(is_envelope(&Value::Object(map)), "{name} rejected");
        }
    }

    #[test]
    fn envelope_rejects_unknown_member() {
        assert!(!is_envelope(&json!({"data": [], "extra": 1})));
    }

    #[test]
    fn envelope_rejects_non_objects_and_empty() {
        assert!(!is_envelope(&json!({})));
        assert!(!is_envelope(&json!([{"data": []}])));
        assert!(!is_envelope(&json!(null)));
        assert!(!is_envelope(&json!("{}")));
    }

    #[test]
    fn envelope_allows_data_and_errors_together() {
        assert!(is_envelope(&json!({"data": [], "errors": []})));
    }

    #[test]
    fn resource_object_allow_list() {
        assert!(is_resource_object(&user()));
        assert!(is_resource_object(&json!({"type": "users"})));
        assert!(!is_resource_object(&json!({})));
        assert!(!is_resource_object(&json!({"type": "users", "name": "Ana"})));
        assert!(!is_resource_object(&json!(["type"])));
    }

    #[test]
    fn error_object_allow_list() {
        assert!(is_error_object(&json!({"status": "404", "code": "JA001"})));
        assert!(is_error_object(&json!({
            "id": "e1", "links": {}, "status": "400", "code": "JA011",
            "title": "t", "detail": "d", "source": {"pointer": "/data"}, "meta": {}
        })));
        assert!(!is_error_object(&json!({"status": "404", "type": "errors"})));
        assert!(!is_error_object(&json!({})));
    }

    #[test]
    fn single_resource_document() {
        let doc = json!({"data": user()});
        assert!(is_single_or_collection_data_doc(&doc));
        assert!(is_single_resource_data_doc(&doc));
        assert!(!is_collection_data_doc(&doc));
        assert_eq!(classify(&doc), Classification::SingleResource);
    }

    #[test]
    fn collection_document() {
        let doc = json!({"data": [user(), user()]});
        assert!(is_single_or_collection_data_doc(&doc));
        assert!(is_collection_data_doc(&doc));
        assert!(!is_single_resource_data_doc(&doc));
        assert_eq!(classify(&doc), Classification::Collection);
    }

    #[test]
    fn empty_collection_is_valid() {
        let doc = json!({"data": []});
        assert!(is_collection_data_doc(&doc));
        assert!(violations(&doc).is_empty());
    }

    #[test]
    fn collection_with_bad_element_is_rejected() {
        let doc = json!({"data": [user(), {"type": "users", "name": "x"}]});
        assert!(!is_single_or_collection_data_doc(&doc));
        assert!(!is_collection_data_doc(&doc));
        let v = violations(&doc);
        assert_eq!(v.len(), 1);
        assert_eq!(v.violations()[0].instance_path, "/data/1/name");
    }

    #[test]
    fn null_or_scalar_data_is_rejected() {
        for data in [json!(null), json!("users"), json!(1), json!(true)] {
            let doc = json!({"data": data});
            assert!(is_envelope(&doc));
            assert!(!is_single_or_collection_data_doc(&doc));
            assert_eq!(classify(&doc), Classification::Invalid);
        }
    }

    #[test]
    fn data_document_rejects_errors_member() {
        let doc = json!({"data": user(), "errors": [{"status": "500"}]});
        assert!(!is_single_or_collection_data_doc(&doc));
        assert!(!is_single_resource_data_doc(&doc));
        assert!(!is_error_doc(&doc));
        assert!(!violations(&doc).is_empty());
    }

    #[test]
    fn error_document() {
        let doc = json!({"errors": [{"status": "404"}, {"status": "409"}]});
        assert!(is_error_doc(&doc));
        assert!(!is_single_or_collection_data_doc(&doc));
        assert_eq!(classify(&doc), Classification::ErrorSet);
    }

    #[test]
    fn error_document_requires_non_empty_array() {
        assert!(!is_error_doc(&json!({"errors": []})));
        assert!(!is_error_doc(&json!({"errors": {"status": "404"}})));
        assert!(!is_error_doc(&json!({"errors": [{}]})));
        assert!(!is_error_doc(&json!({"errors": [{"status": "404", "x": 1}]})));
    }

    #[test]
    fn meta_only_document() {
        let doc = json!({"meta": {"count": 3}});
        assert!(is_meta_only_doc(&doc));
        assert!(!is_error_doc(&doc));
        assert!(!is_single_or_collection_data_doc(&doc));
        assert_eq!(classify(&doc), Classification::MetaOnly);
    }

    #[test]
    fn links_only_document_is_invalid() {
        let doc = json!({"links": {"self": "/users"}});
        assert!(is_envelope(&doc));
        assert_eq!(classify(&doc), Classification::Invalid);
        assert_eq!(violations(&doc).len(), 1);
    }

    #[test]
    fn placeholders_always_pass() {
        let doc = json!({"jsonapi": "garbage", "links": 42, "included": null});
        assert!(has_valid_jsonapi_object(&doc));
        assert!(has_valid_links(&doc));
        assert!(has_valid_included(&doc));
    }

    #[test]
    fn violation_paths_escape_pointer_tokens() {
        let doc = json!({"data": {"type": "x", "a/b~c": 1}});
        let v = violations(&doc);
        assert_eq!(v.violations()[0].instance_path, "/data/a~1b~0c");
    }

    #[test]
    fn violations_report_root_problems() {
        let v = violations(&json!([]));
        assert_eq!(v.len(), 1);
        assert_eq!(v.violations()[0].instance_path, "");
        assert!(v.to_string().contains("(root)"));

        let v = violations(&json!({}));
        assert!(v.violations().iter().any(|x| x.message.contains("empty")));
    }

    #[test]
    fn document_kind_parses_and_matches() {
        for kind in DocumentKind::ALL {
            assert_eq!(kind.as_str().parse::<DocumentKind>(), Ok(kind));
        }
        assert!("bogus".parse::<DocumentKind>().is_err());
        assert!(DocumentKind::Meta.matches(&json!({"meta": {}})));
        assert!(!DocumentKind::Resource.matches(&json!({"data": []})));
    }
}
