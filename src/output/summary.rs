//! Machine-readable crawl summary
//!
//! Written as JSON next to the response tree once a crawl finishes.

use crate::output::stats::{CrawlStatistics, RoundSummary};
use crate::CrawlerError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Crawl summary document
#[derive(Debug, Clone, Serialize)]
pub struct CrawlSummary {
    pub base_url: String,
    pub config_hash: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub duration_seconds: Option<i64>,
    pub roots: usize,
    pub endpoints_fetched: usize,
    pub responses_saved: usize,
    pub http_failures: usize,
    pub transport_failures: usize,
    pub persistence_failures: usize,
    pub identifiers_discovered: usize,
    pub rounds: Vec<RoundSummary>,
}

impl CrawlSummary {
    pub fn new(
        stats: &CrawlStatistics,
        base_url: &str,
        roots: usize,
        config_hash: Option<String>,
    ) -> Self {
        Self {
            base_url: base_url.to_string(),
            config_hash,
            started_at: stats.started_at,
            finished_at: stats.finished_at,
            duration_seconds: stats.duration_seconds(),
            roots,
            endpoints_fetched: stats.total_dispatched(),
            responses_saved: stats.total_saved(),
            http_failures: stats.total_http_failures(),
            transport_failures: stats.total_transport_failures(),
            persistence_failures: stats.total_persistence_failures(),
            identifiers_discovered: stats.total_identifiers(),
            rounds: stats.rounds.clone(),
        }
    }
}

/// Writes the summary as pretty-printed JSON, creating the parent directory
pub fn write_crawl_summary(summary: &CrawlSummary, path: &Path) -> Result<(), CrawlerError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, body)?;
    tracing::info!("Crawl summary written to {}", path.display());
    Ok(())
}
