//! Output module for crawl statistics and summaries
//!
//! This module handles:
//! - Per-round and whole-crawl statistics
//! - The console report printed at the end of a crawl
//! - The JSON crawl summary written next to the response tree

pub mod stats;
mod summary;

pub use stats::{print_statistics, CrawlStatistics, RoundSummary};
pub use summary::{write_crawl_summary, CrawlSummary};
