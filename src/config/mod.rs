//! Configuration module for Graph-Crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional, so a crawl can run on built-in defaults alone.
//!
//! # Example
//!
//! ```no_run
//! use graph_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Crawling {}", config.api.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ApiConfig, CatalogConfig, Config, CrawlerConfig, OutputConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
