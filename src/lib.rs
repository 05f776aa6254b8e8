//! Graph-Crawler: a breadth-first mapper for directory-service REST graphs
//!
//! This crate walks a hierarchical, typed REST resource graph starting from a
//! fixed set of root endpoints, follows identifiers discovered in responses to
//! templated child endpoints, and persists every response it fetches.

pub mod config;
pub mod crawler;
pub mod endpoint;
pub mod output;
pub mod storage;

use thiserror::Error;

/// Main error type for Graph-Crawler operations
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid bearer token: {0}")]
    InvalidToken(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid endpoint template: {0}")]
    InvalidTemplate(String),
}

/// Endpoint and identifier errors
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("Endpoint cannot be empty")]
    Empty,

    #[error("Endpoint must start with '/': {0}")]
    MissingLeadingSlash(String),

    #[error("Endpoint contains whitespace: {0:?}")]
    Whitespace(String),

    #[error("Not a valid resource identifier: {0:?}")]
    InvalidIdentifier(String),
}

/// Result type alias for Graph-Crawler operations
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for endpoint operations
pub type EndpointResult<T> = std::result::Result<T, EndpointError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Crawler, Fetch, FetchResult, HttpFetcher};
pub use endpoint::{Endpoint, ResourceId, ResourceType, TemplateTable};
pub use storage::{FsStore, ResponseStore};
