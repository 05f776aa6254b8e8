//! Identifier extraction from response payloads
//!
//! Scans an arbitrary JSON tree for fields named `id` (case-insensitive)
//! whose value is a string matching the identifier grammar in full.
//! Identifier-looking strings under any other key are ignored, which keeps
//! child endpoint generation free of false positives.

use crate::endpoint::ResourceId;
use serde_json::Value;
use std::collections::BTreeSet;

/// What a field visitor wants done with the value it was shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Walk into the value
    Descend,
    /// The value has been handled; do not walk into it
    Skip,
}

/// Walks every object field in `value`, depth first
///
/// Arrays are transparent: their elements are walked but produce no field
/// callback of their own. Scalars at the top level produce no callbacks.
pub fn visit_fields<'a, F>(value: &'a Value, visitor: &mut F)
where
    F: FnMut(&'a str, &'a Value) -> Visit,
{
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if visitor(key, child) == Visit::Descend {
                    visit_fields(child, visitor);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                visit_fields(item, visitor);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

/// Collects the distinct resource identifiers found anywhere in `payload`
///
/// # Example
///
/// ```
/// use graph_crawler::crawler::extract_identifiers;
/// use serde_json::json;
///
/// let payload = json!({
///     "id": "not-a-guid",
///     "foo": {"Id": "3fa85f64-5717-4562-b3fc-2c963f66afa6"}
/// });
/// let ids = extract_identifiers(&payload);
/// assert_eq!(ids.len(), 1);
/// ```
pub fn extract_identifiers(payload: &Value) -> BTreeSet<ResourceId> {
    let mut found = BTreeSet::new();

    visit_fields(payload, &mut |key, value| {
        if key.eq_ignore_ascii_case("id") {
            if let Some(id) = value.as_str().and_then(|s| ResourceId::parse(s).ok()) {
                found.insert(id);
                return Visit::Skip;
            }
        }
        Visit::Descend
    });

    found
}
