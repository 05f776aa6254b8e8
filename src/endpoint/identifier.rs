//! Resource identifier grammar
//!
//! Directory objects are addressed by canonical hyphenated hexadecimal
//! identifiers (`8-4-4-4-12`), with the version nibble in `1..=5` and the
//! variant nibble in `8`, `9`, `a` or `b`.

use crate::{EndpointError, EndpointResult};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

const IDENTIFIER_PATTERN: &str =
    r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[1-5][0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$";

fn identifier_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(IDENTIFIER_PATTERN).expect("identifier pattern compiles"))
}

/// Returns true if `candidate` matches the identifier grammar in full
pub fn is_resource_id(candidate: &str) -> bool {
    identifier_regex().is_match(candidate)
}

/// A validated resource identifier
///
/// The spelling returned by the service is kept verbatim so child endpoints
/// and storage addresses match it exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(String);

impl ResourceId {
    /// Parses a string as a resource identifier
    ///
    /// # Example
    ///
    /// ```
    /// use graph_crawler::ResourceId;
    ///
    /// assert!(ResourceId::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").is_ok());
    /// assert!(ResourceId::parse("not-a-guid").is_err());
    /// ```
    pub fn parse(candidate: &str) -> EndpointResult<Self> {
        if is_resource_id(candidate) {
            Ok(Self(candidate.to_string()))
        } else {
            Err(EndpointError::InvalidIdentifier(candidate.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
