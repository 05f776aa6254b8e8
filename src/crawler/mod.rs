//! Crawler module for directory discovery
//!
//! This module contains the core crawling logic, including:
//! - Authenticated HTTP fetching with failure classification
//! - Identifier extraction from JSON payloads
//! - The visited/pending frontier
//! - Round-based crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod frontier;

pub use coordinator::Crawler;
pub use extractor::{extract_identifiers, visit_fields, Visit};
pub use fetcher::{
    bearer_header, build_http_client, fetch_endpoint, FailureKind, Fetch, FetchFailure,
    FetchResult, HttpFetcher,
};
pub use frontier::{Frontier, Offer, ScheduledEndpoint};

use crate::config::Config;
use crate::endpoint::TemplateTable;
use crate::output::{write_crawl_summary, CrawlStatistics, CrawlSummary};
use crate::storage::FsStore;
use crate::Result;
use std::path::Path;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP fetch unit with the bearer token
/// 2. Build the template table from the configured catalog
/// 3. Open the filesystem response store
/// 4. Run rounds until no endpoint is left pending
/// 5. Write the crawl summary file
///
/// # Arguments
///
/// * `config` - The validated crawler configuration
/// * `token` - Bearer token sent with every request
/// * `config_hash` - Hash of the config file, recorded in the summary
///
/// # Returns
///
/// * `Ok(CrawlStatistics)` - The crawl ran to completion
/// * `Err(CrawlerError)` - Setup failed before any request was made
pub async fn run_crawl(
    config: &Config,
    token: &str,
    config_hash: Option<String>,
) -> Result<CrawlStatistics> {
    let fetcher = HttpFetcher::from_config(config, token)?;
    let table = TemplateTable::from_catalog(config.catalog.as_ref())?;
    let store = FsStore::new(&config.output.directory);

    tracing::info!(
        "Crawling {} into {}",
        config.api.base_url,
        store.root().display()
    );

    let root_count = table.roots().len();
    let mut crawler = Crawler::new(fetcher, store, table)
        .with_max_concurrent_requests(config.crawler.max_concurrent_requests);
    let stats = crawler.run().await;

    let summary = CrawlSummary::new(&stats, &config.api.base_url, root_count, config_hash);
    let summary_path = Path::new(&config.output.directory).join(&config.output.summary_file);
    if let Err(e) = write_crawl_summary(&summary, &summary_path) {
        tracing::warn!("Failed to write crawl summary: {}", e);
    }

    tracing::info!("Crawl finished");
    Ok(stats)
}
