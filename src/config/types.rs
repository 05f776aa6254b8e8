use crate::endpoint::DEFAULT_BASE_URL;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Main configuration structure for Graph-Crawler
///
/// Every section is optional; a missing file section falls back to the
/// built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub catalog: Option<CatalogConfig>,
}

/// Target API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// TCP connect timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Maximum in-flight requests within a round; unbounded when absent
    #[serde(rename = "max-concurrent-requests", default)]
    pub max_concurrent_requests: Option<usize>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            max_concurrent_requests: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Root directory of the response document tree
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// File name of the crawl summary, written inside `directory`
    #[serde(rename = "summary-file", default = "default_summary_file")]
    pub summary_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            summary_file: default_summary_file(),
        }
    }
}

/// Overrides for the built-in endpoint catalog
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Replaces the built-in root set
    #[serde(default)]
    pub roots: Option<Vec<String>>,

    /// Replaces the built-in resource type → templates table
    #[serde(default)]
    pub templates: Option<BTreeMap<String, Vec<String>>>,

    /// Merged over the built-in placeholder bindings
    #[serde(default)]
    pub bindings: BTreeMap<String, String>,

    /// Replaces the built-in path prefix → resource type overrides
    #[serde(default)]
    pub prefixes: Option<BTreeMap<String, String>>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("graph-crawler/{}", env!("CARGO_PKG_VERSION"))
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_output_directory() -> String {
    "graph_crawler_outputs".to_string()
}

fn default_summary_file() -> String {
    "crawl-summary.json".to_string()
}
