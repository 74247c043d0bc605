// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Keystroke → query → deduplicated results.
//!
//! No debouncing and no cancellation: once the index is built a query is a
//! synchronous hash lookup, so every input event simply replaces the previous
//! result set. Before the index is ready, input is dropped on the floor.

use super::client::DocumentIndexClient;
use super::dedup::ResultMerger;
use crate::config::SearchProfile;
use crate::index::{SearchOptions, TextIndex};
use crate::types::MatchResult;
use crate::utils::char_len;

/// Why an input event produced no query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The index is not built (yet, or ever). No pending query is kept.
    NotReady,
    /// Below the minimum query length.
    TooShort,
}

/// What the results surface should do after an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Clear and hide.
    Dropped(DropReason),
    /// Render these (possibly zero) results.
    Results(Vec<MatchResult>),
}

impl QueryOutcome {
    /// The visible result list: empty when dropped.
    pub fn results(&self) -> &[MatchResult] {
        match self {
            QueryOutcome::Results(results) => results,
            QueryOutcome::Dropped(_) => &[],
        }
    }

    pub fn is_dropped(&self) -> bool {
        matches!(self, QueryOutcome::Dropped(_))
    }
}

/// Applies the profile's input policy and deduplicates index answers.
#[derive(Debug, Clone)]
pub struct QueryDispatcher {
    limit: usize,
    min_len: usize,
    trim: bool,
}

impl QueryDispatcher {
    pub fn new(profile: &SearchProfile) -> Self {
        Self {
            limit: profile.result_limit,
            min_len: profile.min_query_len,
            trim: profile.trim_input,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The query text after the profile's trimming rule.
    pub fn prepare<'a>(&self, raw: &'a str) -> &'a str {
        if self.trim {
            raw.trim()
        } else {
            raw
        }
    }

    pub fn on_input<I: TextIndex>(&self, client: &DocumentIndexClient<I>, raw: &str) -> QueryOutcome {
        let query = self.prepare(raw);

        if !client.is_ready() {
            return QueryOutcome::Dropped(DropReason::NotReady);
        }
        if char_len(query) < self.min_len {
            return QueryOutcome::Dropped(DropReason::TooShort);
        }

        let options = SearchOptions {
            limit: self.limit,
            enrich: true,
        };
        let Some(fields) = client.query(query, &options) else {
            return QueryOutcome::Dropped(DropReason::NotReady);
        };

        let mut merger = ResultMerger::new();
        merger.merge_fields(fields);
        let results = merger.into_results(self.limit);
        tracing::debug!(query, results = results.len(), "search dispatched");
        QueryOutcome::Results(results)
    }
}
