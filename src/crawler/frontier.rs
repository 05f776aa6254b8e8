//! Crawl frontier: the visited set and the next round's pending set
//!
//! Invariants:
//! - `visited` only grows
//! - `visited` and `pending` are disjoint at the start of every round
//! - an endpoint is handed out for fetching at most once per crawl, checked
//!   both when it is offered and again when a batch is taken

use crate::endpoint::{Endpoint, ResourceId};
use std::collections::{BTreeMap, HashSet};

/// An endpoint due for fetching, with the identifier that generated it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledEndpoint {
    pub endpoint: Endpoint,
    /// `None` for root endpoints
    pub origin: Option<ResourceId>,
}

/// Outcome of offering an endpoint to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// Added to the next round
    Queued,
    /// Already visited or already pending
    Known,
    /// Still carries placeholders; never fetched
    Unresolved,
}

/// Visited and pending endpoint sets for one crawl
#[derive(Debug, Default)]
pub struct Frontier {
    visited: HashSet<Endpoint>,
    /// Ordered so rounds dispatch and log deterministically
    pending: BTreeMap<Endpoint, Option<ResourceId>>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier whose first round is the given root set
    pub fn seeded(roots: &[Endpoint]) -> Self {
        let mut frontier = Self::new();
        for root in roots {
            if frontier.offer(root.clone(), None) == Offer::Unresolved {
                tracing::warn!("Skipping root endpoint with unresolved placeholders: {}", root);
            }
        }
        frontier
    }

    /// Offers an endpoint for the next round
    ///
    /// The first offer of an endpoint within a round keeps its provenance;
    /// later duplicates are ignored.
    pub fn offer(&mut self, endpoint: Endpoint, origin: Option<ResourceId>) -> Offer {
        if !endpoint.is_concrete() {
            tracing::debug!("Dropping unresolved endpoint {}", endpoint);
            return Offer::Unresolved;
        }
        if self.visited.contains(&endpoint) || self.pending.contains_key(&endpoint) {
            return Offer::Known;
        }
        tracing::trace!("Queued {}", endpoint);
        self.pending.insert(endpoint, origin);
        Offer::Queued
    }

    /// Takes the whole pending set as this round's batch and marks it visited
    pub fn take_batch(&mut self) -> Vec<ScheduledEndpoint> {
        let pending = std::mem::take(&mut self.pending);
        let mut batch = Vec::with_capacity(pending.len());

        for (endpoint, origin) in pending {
            if self.visited.insert(endpoint.clone()) {
                batch.push(ScheduledEndpoint { endpoint, origin });
            }
        }

        batch
    }

    /// Returns true once there is nothing left to fetch
    pub fn is_done(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_visited(&self, endpoint: &Endpoint) -> bool {
        self.visited.contains(endpoint)
    }

    #[cfg(test)]
    pub(crate) fn is_pending(&self, endpoint: &Endpoint) -> bool {
        self.pending.contains_key(endpoint)
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Endpoints visited so far, in no particular order
    #[cfg(test)]
    pub(crate) fn visited(&self) -> impl Iterator<Item = &Endpoint> {
        self.visited.iter()
    }
}
