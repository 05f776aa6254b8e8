//! Storage traits and error types
//!
//! This module defines the trait interface for response stores and the
//! address a stored document is written under.

use crate::endpoint::{Endpoint, ResourceId, ResourceType};
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid storage address: {0}")]
    InvalidAddress(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Where a response document is stored
///
/// The location is addressed by resource type and, when known, the resource
/// id that produced the endpoint. Without an id the location degrades to the
/// resource type alone. `document` names the individual response inside that
/// location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentAddress {
    pub resource_type: ResourceType,
    pub resource_id: Option<ResourceId>,
    pub document: String,
}

impl DocumentAddress {
    /// Default document name when none is derived from an endpoint
    pub const DEFAULT_DOCUMENT: &'static str = "response";

    pub fn new(resource_type: ResourceType, resource_id: Option<ResourceId>) -> Self {
        Self {
            resource_type,
            resource_id,
            document: Self::DEFAULT_DOCUMENT.to_string(),
        }
    }

    /// Address of the document fetched from `endpoint`
    pub fn for_endpoint(
        resource_type: ResourceType,
        resource_id: Option<ResourceId>,
        endpoint: &Endpoint,
    ) -> Self {
        Self {
            resource_type,
            resource_id,
            document: endpoint.slug(),
        }
    }
}

/// Trait for response store implementations
///
/// Writes to the same address overwrite; writes to different addresses must
/// not interfere, including concurrent creation of shared parent locations.
pub trait ResponseStore {
    /// Persists `payload` at `address`, creating any missing locations
    fn save(&self, address: &DocumentAddress, payload: &Value) -> StorageResult<()>;
}
