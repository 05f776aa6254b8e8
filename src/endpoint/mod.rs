//! Endpoint model for the crawled resource graph
//!
//! This module provides:
//! - `Endpoint`: a path relative to the API base, possibly templated
//! - `ResourceType`: the category tag derived from an endpoint's leading segment
//! - `ResourceId`: identifiers recognised by the canonical identifier grammar
//! - `TemplateTable`: resource type to child endpoint template expansion

mod catalog;
mod identifier;
mod template;

pub use catalog::DEFAULT_BASE_URL;
pub use identifier::{is_resource_id, ResourceId};
pub use template::{TemplateTable, ID_PLACEHOLDER};

use crate::{EndpointError, EndpointResult};
use std::fmt;

/// A path within the target API, e.g. `/users` or `/users/{id}/manager`
///
/// Two endpoints are equal iff their literal strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Endpoint(String);

impl Endpoint {
    /// Parses and validates an endpoint path
    ///
    /// # Example
    ///
    /// ```
    /// use graph_crawler::Endpoint;
    ///
    /// let endpoint = Endpoint::parse("/users/{id}/manager").unwrap();
    /// assert!(!endpoint.is_concrete());
    /// assert!(Endpoint::parse("users").is_err());
    /// ```
    pub fn parse(path: &str) -> EndpointResult<Self> {
        if path.is_empty() {
            return Err(EndpointError::Empty);
        }
        if !path.starts_with('/') {
            return Err(EndpointError::MissingLeadingSlash(path.to_string()));
        }
        if path.chars().any(char::is_whitespace) {
            return Err(EndpointError::Whitespace(path.to_string()));
        }
        Ok(Self(path.to_string()))
    }

    /// Wraps a path built from already validated parts
    pub(crate) fn from_trusted(path: String) -> Self {
        Self(path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the first path segment, ignoring any query string
    pub fn first_segment(&self) -> Option<&str> {
        let path = self.0.split('?').next().unwrap_or_default();
        path.trim_start_matches('/')
            .split('/')
            .next()
            .filter(|segment| !segment.is_empty())
    }

    /// Returns the names of all `{name}` placeholders, in order of appearance
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = self.0.as_str();

        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) => {
                    names.push(&after[..close]);
                    rest = &after[close + 1..];
                }
                None => break,
            }
        }

        names
    }

    /// Returns true if the endpoint has no unresolved placeholders
    pub fn is_concrete(&self) -> bool {
        self.placeholders().is_empty()
    }

    /// Filesystem-safe document name for this endpoint
    ///
    /// The leading `/` is dropped and every other `/` becomes `_`. ASCII
    /// letters, digits and `-` are kept; every other byte, `_` and `%`
    /// included, is written as `%XX`. Distinct endpoints therefore always
    /// get distinct names. The bare root `/` is named `%2F`.
    pub fn slug(&self) -> String {
        let path = self.0.strip_prefix('/').unwrap_or(&self.0);
        if path.is_empty() {
            return "%2F".to_string();
        }

        let mut slug = String::with_capacity(path.len());
        for byte in path.bytes() {
            match byte {
                b'/' => slug.push('_'),
                b if b.is_ascii_alphanumeric() || b == b'-' => slug.push(char::from(b)),
                b => slug.push_str(&format!("%{:02X}", b)),
            }
        }
        slug
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The category tag of a resource (`user`, `group`, `device`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceType(String);

impl ResourceType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Derives a resource type from a plural path segment
    ///
    /// `users` → `user`, `policies` → `policy`, `servicePrincipals` →
    /// `servicePrincipal`. Segments that do not look plural are kept as-is.
    pub fn from_segment(segment: &str) -> Option<Self> {
        if segment.is_empty() {
            return None;
        }
        Some(Self(singularize(segment)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn singularize(segment: &str) -> String {
    if let Some(stem) = segment.strip_suffix("ies").filter(|stem| !stem.is_empty()) {
        return format!("{}y", stem);
    }
    if segment.ends_with("ss") {
        return segment.to_string();
    }
    match segment.strip_suffix('s').filter(|stem| !stem.is_empty()) {
        Some(stem) => stem.to_string(),
        None => segment.to_string(),
    }
}
