//! Crawler coordinator - round-based crawl orchestration
//!
//! A crawl is a sequence of rounds. Each round:
//! 1. Takes the whole pending set as a batch and marks it visited
//! 2. Fetches every endpoint of the batch concurrently and waits for all
//! 3. Persists each payload and scans it for identifiers
//! 4. Expands every identifier through the template table into the next
//!    round's pending set
//!
//! The crawl is done when a round leaves nothing pending. The frontier is
//! only touched from the task driving `run`; fetch results are plain values
//! collected back before any bookkeeping happens.

use crate::crawler::extractor::extract_identifiers;
use crate::crawler::fetcher::{Fetch, FetchResult};
use crate::crawler::frontier::{Frontier, Offer, ScheduledEndpoint};
use crate::endpoint::TemplateTable;
use crate::output::{CrawlStatistics, RoundSummary};
use crate::storage::{DocumentAddress, ResponseStore};
use futures::stream::{self, StreamExt};

/// Main crawler structure
pub struct Crawler<F, S> {
    fetcher: F,
    store: S,
    table: TemplateTable,
    frontier: Frontier,
    max_concurrent_requests: Option<usize>,
    statistics: CrawlStatistics,
}

impl<F: Fetch, S: ResponseStore> Crawler<F, S> {
    /// Creates a crawler whose first round is the table's root set
    ///
    /// # Arguments
    ///
    /// * `fetcher` - The fetch unit
    /// * `store` - Where fetched payloads are persisted
    /// * `table` - Roots and child endpoint templates for this crawl
    pub fn new(fetcher: F, store: S, table: TemplateTable) -> Self {
        let frontier = Frontier::seeded(table.roots());
        Self {
            fetcher,
            store,
            table,
            frontier,
            max_concurrent_requests: None,
            statistics: CrawlStatistics::new(),
        }
    }

    /// Caps the number of in-flight requests within a round
    ///
    /// `None` fetches the whole batch at once. The round barrier is kept
    /// either way.
    pub fn with_max_concurrent_requests(mut self, limit: Option<usize>) -> Self {
        self.max_concurrent_requests = limit;
        self
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn table(&self) -> &TemplateTable {
        &self.table
    }

    pub fn statistics(&self) -> &CrawlStatistics {
        &self.statistics
    }

    /// Runs rounds until the frontier is empty
    ///
    /// Individual fetch and persistence failures never abort the crawl.
    pub async fn run(&mut self) -> CrawlStatistics {
        self.statistics.mark_started();
        tracing::info!(
            "Starting crawl with {} root endpoints",
            self.frontier.pending_len()
        );

        while let Some(summary) = self.run_round().await {
            tracing::info!(
                "Round {} complete: {} fetched, {} ok, {} failed, {} queued, {} visited",
                summary.round,
                summary.dispatched,
                summary.succeeded,
                summary.failed(),
                summary.enqueued,
                summary.visited_total
            );
        }

        self.statistics.mark_finished();
        tracing::info!(
            "All rounds complete: {} endpoints fetched in {} rounds",
            self.statistics.total_dispatched(),
            self.statistics.round_count()
        );

        self.statistics.clone()
    }

    /// Runs a single round
    ///
    /// # Returns
    ///
    /// * `Some(RoundSummary)` - A round was run
    /// * `None` - The frontier was already empty
    pub async fn run_round(&mut self) -> Option<RoundSummary> {
        if self.frontier.is_done() {
            return None;
        }

        let round = self.statistics.round_count() + 1;
        let batch = self.frontier.take_batch();
        let limit = self
            .max_concurrent_requests
            .unwrap_or(batch.len())
            .max(1);

        tracing::debug!("Round {}: fetching {} endpoints", round, batch.len());

        let fetcher = &self.fetcher;
        let mut results: Vec<(ScheduledEndpoint, FetchResult)> = stream::iter(batch)
            .map(|scheduled| async move {
                let result = fetcher.fetch(&scheduled.endpoint).await;
                (scheduled, result)
            })
            .buffer_unordered(limit)
            .collect()
            .await;

        // Completion order is arbitrary; process in endpoint order
        results.sort_by(|(a, _), (b, _)| a.endpoint.cmp(&b.endpoint));

        let mut summary = RoundSummary::new(round);
        summary.dispatched = results.len();

        for (scheduled, result) in results {
            self.process(scheduled, result, &mut summary);
        }

        summary.visited_total = self.frontier.visited_len();
        summary.pending_after = self.frontier.pending_len();
        self.statistics.record_round(summary.clone());

        Some(summary)
    }

    /// Persists one payload and expands the identifiers it contains
    fn process(
        &mut self,
        scheduled: ScheduledEndpoint,
        result: FetchResult,
        summary: &mut RoundSummary,
    ) {
        let payload = match result {
            FetchResult::Success { payload, .. } => payload,
            FetchResult::Failure(failure) => {
                tracing::debug!(
                    "No payload for {} ({}): {}",
                    scheduled.endpoint,
                    failure.kind,
                    failure.detail
                );
                if failure.kind.is_http() {
                    summary.http_failures += 1;
                } else {
                    summary.transport_failures += 1;
                }
                return;
            }
        };
        summary.succeeded += 1;

        let Some(resource_type) = self.table.resource_type_of(&scheduled.endpoint) else {
            tracing::debug!("No resource type for {}, not saved", scheduled.endpoint);
            return;
        };

        let address = DocumentAddress::for_endpoint(
            resource_type.clone(),
            scheduled.origin.clone(),
            &scheduled.endpoint,
        );
        match self.store.save(&address, &payload) {
            Ok(()) => summary.saved += 1,
            Err(e) => {
                tracing::warn!("Failed to save response for {}: {}", scheduled.endpoint, e);
                summary.persistence_failures += 1;
            }
        }

        let identifiers = extract_identifiers(&payload);
        summary.identifiers_discovered += identifiers.len();

        if !self.table.knows(&resource_type) {
            return;
        }

        for id in identifiers {
            for child in self.table.expand(&resource_type, &id) {
                match self.frontier.offer(child, Some(id.clone())) {
                    Offer::Queued => summary.enqueued += 1,
                    Offer::Unresolved => summary.unresolved += 1,
                    Offer::Known => {}
                }
            }
        }
    }
}
