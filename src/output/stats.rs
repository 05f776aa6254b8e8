//! Crawl statistics
//!
//! Per-round counters collected by the crawler and the console report
//! printed when a crawl finishes.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counters for a single round
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    /// 1-based round number
    pub round: usize,

    /// Endpoints fetched this round
    pub dispatched: usize,

    /// Fetches that produced a payload
    pub succeeded: usize,

    /// Non-success HTTP statuses
    pub http_failures: usize,

    /// Timeouts, connection and body failures
    pub transport_failures: usize,

    /// Payloads written to the response store
    pub saved: usize,

    /// Payloads the store failed to write
    pub persistence_failures: usize,

    /// Distinct identifiers found, summed over this round's payloads
    pub identifiers_discovered: usize,

    /// Child endpoints queued for the next round
    pub enqueued: usize,

    /// Child endpoints dropped for unresolved placeholders
    pub unresolved: usize,

    /// Size of the visited set after this round
    pub visited_total: usize,

    /// Size of the pending set after this round
    pub pending_after: usize,
}

impl RoundSummary {
    pub fn new(round: usize) -> Self {
        Self {
            round,
            ..Self::default()
        }
    }

    /// Fetches that produced no payload
    pub fn failed(&self) -> usize {
        self.http_failures + self.transport_failures
    }
}

/// Statistics for a whole crawl
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlStatistics {
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub rounds: Vec<RoundSummary>,
}

impl CrawlStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_started(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Utc::now());
        }
    }

    pub fn mark_finished(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn record_round(&mut self, summary: RoundSummary) {
        self.rounds.push(summary);
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn total_dispatched(&self) -> usize {
        self.rounds.iter().map(|r| r.dispatched).sum()
    }

    pub fn total_succeeded(&self) -> usize {
        self.rounds.iter().map(|r| r.succeeded).sum()
    }

    pub fn total_http_failures(&self) -> usize {
        self.rounds.iter().map(|r| r.http_failures).sum()
    }

    pub fn total_transport_failures(&self) -> usize {
        self.rounds.iter().map(|r| r.transport_failures).sum()
    }

    pub fn total_saved(&self) -> usize {
        self.rounds.iter().map(|r| r.saved).sum()
    }

    pub fn total_persistence_failures(&self) -> usize {
        self.rounds.iter().map(|r| r.persistence_failures).sum()
    }

    pub fn total_identifiers(&self) -> usize {
        self.rounds.iter().map(|r| r.identifiers_discovered).sum()
    }

    /// Visited set size at the end of the last round
    pub fn visited_total(&self) -> usize {
        self.rounds.last().map(|r| r.visited_total).unwrap_or(0)
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        match (self.started_at, self.finished_at) {
            (Some(started), Some(finished)) => Some((finished - started).num_seconds()),
            _ => None,
        }
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        let dispatched = self.total_dispatched();
        if dispatched == 0 {
            return 0.0;
        }
        (self.total_succeeded() as f64 / dispatched as f64) * 100.0
    }
}

/// Prints crawl statistics to stdout
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Rounds: {}", stats.round_count());
    println!("Endpoints fetched: {}", stats.total_dispatched());
    println!(
        "Succeeded: {} ({:.1}%)",
        stats.total_succeeded(),
        stats.success_rate()
    );
    println!("HTTP failures: {}", stats.total_http_failures());
    println!("Transport failures: {}", stats.total_transport_failures());
    println!("Responses saved: {}", stats.total_saved());
    if stats.total_persistence_failures() > 0 {
        println!("Save failures: {}", stats.total_persistence_failures());
    }
    println!("Identifiers discovered: {}", stats.total_identifiers());
    if let Some(seconds) = stats.duration_seconds() {
        println!("Duration: {}s", seconds);
    }

    if !stats.rounds.is_empty() {
        println!("\nPer round:");
        for round in &stats.rounds {
            println!(
                "  {:>3}: fetched {:>5}, ok {:>5}, failed {:>5}, queued {:>5}, visited {:>6}",
                round.round,
                round.dispatched,
                round.succeeded,
                round.failed(),
                round.enqueued,
                round.visited_total
            );
        }
    }
}
