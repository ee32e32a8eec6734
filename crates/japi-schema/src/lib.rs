//! # japi-schema: JSON:API Document Classification
//!
//! Decides which JSON:API document shapes a parsed JSON value satisfies.
//! Every check is a total, pure function over [`serde_json::Value`]: no I/O,
//! no allocation beyond diagnostics, no failure modes other than `false`.
//!
//! ## Member Allow-Lists (`members`)
//!
//! Each object kind has a fixed set of permitted member names. A check
//! passes when the object is non-empty and every member it carries is in
//! the set. Missing members are never an error; unknown members always are.
//!
//! ## Document Predicates (`validate`)
//!
//! - [`is_envelope`]: top-level member allow-list.
//! - [`is_single_or_collection_data_doc`], [`is_collection_data_doc`],
//!   [`is_single_resource_data_doc`]: primary data documents.
//! - [`is_error_doc`]: error documents.
//! - [`is_meta_only_doc`]: documents carrying only `meta`.
//! - [`classify`]: the first matching [`Classification`].
//! - [`violations`]: diagnostics explaining why a document is rejected.
//!
//! ## Known Gaps
//!
//! The `jsonapi`, `links` and `included` members are not inspected beyond
//! their names. [`has_valid_jsonapi_object`], [`has_valid_links`] and
//! [`has_valid_included`] always return `true`.

pub mod members;
pub mod validate;

pub use members::{ERROR_MEMBERS, RESOURCE_MEMBERS, TOP_LEVEL_MEMBERS};
pub use validate::{
    classify, has_valid_included, has_valid_jsonapi_object, has_valid_links,
    is_collection_data_doc, is_envelope, is_error_doc, is_error_object, is_meta_only_doc,
    is_resource_object, is_single_or_collection_data_doc, is_single_resource_data_doc,
    violations, Classification, DocumentKind, ValidationViolations, Violation,
};
