// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lazy, load-once search index client.
//!
//! Nothing is fetched on page load. The first focus or touch of a search
//! input calls [`DocumentIndexClient::trigger_load`]; every later call is a
//! no-op. The guard lives in [`begin_load`](DocumentIndexClient::begin_load),
//! which flips `NotLoaded → Loading` under the state lock *before* any await,
//! so two triggers racing on the same tick still produce exactly one fetch.
//!
//! ```text
//!   NotLoaded ──begin_load──▶ Loading ──finish_load(Ok)──▶ Loaded
//!                                │
//!                                └──finish_load(Err)──▶ Failed
//! ```
//!
//! `Failed` is terminal unless the profile opts into retrying, in which case
//! the next activation may start a fresh attempt.

use crate::config::SiteConfig;
use crate::error::LoadError;
use crate::index::{build_index, ForwardIndex, IndexSchema, SearchOptions, TextIndex};
use crate::source::DocumentSource;
use crate::types::{FieldHits, SourceDocument};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::OnceLock;

/// Where the index client is in its one-shot lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadState {
    NotLoaded,
    Loading,
    Loaded,
    Failed,
}

/// Proof that the caller won the load guard and owes a `finish_load`.
///
/// Only [`DocumentIndexClient::begin_load`] creates one, so a finish without a
/// matching begin does not type-check.
#[must_use = "a granted load must be completed with finish_load"]
#[derive(Debug)]
pub struct LoadTicket {
    _private: (),
}

/// Fetches the document list once and owns the built index.
#[derive(Debug)]
pub struct DocumentIndexClient<I: TextIndex = ForwardIndex> {
    path: String,
    schema: IndexSchema,
    retry_failed: bool,
    state: Mutex<LoadState>,
    index: OnceLock<I>,
    last_error: Mutex<Option<LoadError>>,
}

impl<I: TextIndex> DocumentIndexClient<I> {
    pub fn new(path: impl Into<String>, schema: IndexSchema) -> Self {
        Self {
            path: path.into(),
            schema,
            retry_failed: false,
            state: Mutex::new(LoadState::NotLoaded),
            index: OnceLock::new(),
            last_error: Mutex::new(None),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(&config.index_path, config.search.schema.clone())
            .with_retry(config.search.retry_failed_load)
    }

    /// Allow a new attempt after `Failed`.
    pub fn with_retry(mut self, retry: bool) -> Self {
        self.retry_failed = retry;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn state(&self) -> LoadState {
        *self.state.lock()
    }

    pub fn is_ready(&self) -> bool {
        self.state() == LoadState::Loaded
    }

    /// The error that ended the last attempt, if it failed.
    pub fn last_error(&self) -> Option<LoadError> {
        self.last_error.lock().clone()
    }

    /// Claim the load. Returns `None` if a load is in flight, already done,
    /// or failed without retry enabled.
    pub fn begin_load(&self) -> Option<LoadTicket> {
        let mut state = self.state.lock();
        match *state {
            LoadState::Loading | LoadState::Loaded => None,
            LoadState::Failed if !self.retry_failed => None,
            LoadState::NotLoaded | LoadState::Failed => {
                *state = LoadState::Loading;
                tracing::debug!(path = %self.path, "Fetching search index...");
                Some(LoadTicket { _private: () })
            }
        }
    }

    /// Complete a load with the fetched body (or the fetch error).
    ///
    /// Never returns an error: failures are logged and recorded as `Failed`.
    /// Returns whether the index is now ready.
    pub fn finish_load(&self, ticket: LoadTicket, body: Result<Vec<u8>, LoadError>) -> bool {
        let LoadTicket { .. } = ticket;
        match body.and_then(|bytes| self.build(&bytes)) {
            Ok(count) => {
                tracing::info!(path = %self.path, documents = count, "Loaded documents for search");
                *self.last_error.lock() = None;
                *self.state.lock() = LoadState::Loaded;
                true
            }
            Err(err) => {
                tracing::error!(path = %self.path, error = %err, "Failed to load search index");
                *self.last_error.lock() = Some(err);
                *self.state.lock() = LoadState::Failed;
                false
            }
        }
    }

    /// Fetch, parse, and build. Fire-and-forget: callers only observe the
    /// resulting state.
    pub async fn trigger_load<S: DocumentSource>(&self, source: &S) {
        if let Some(ticket) = self.begin_load() {
            self.run_load(ticket, source).await;
        }
    }

    /// Second half of [`trigger_load`](Self::trigger_load) for callers that
    /// took the ticket themselves.
    pub async fn run_load<S: DocumentSource>(&self, ticket: LoadTicket, source: &S) {
        let body = source.fetch(&self.path).await;
        self.finish_load(ticket, body);
    }

    fn build(&self, bytes: &[u8]) -> Result<usize, LoadError> {
        let docs: Vec<SourceDocument> = serde_json::from_slice(bytes)?;
        let index: I = build_index(&self.schema, &docs)?;
        let count = index.len();
        // The ticket guarantees a single successful build per client.
        if self.index.set(index).is_err() {
            tracing::warn!("search index already built; keeping the first one");
        }
        Ok(count)
    }

    /// Run a query. `None` while the index is not ready: queries issued
    /// before loading completes are dropped, not queued.
    pub fn query(&self, text: &str, options: &SearchOptions) -> Option<Vec<FieldHits>> {
        if !self.is_ready() {
            return None;
        }
        self.index.get().map(|index| index.search(text, options))
    }

    pub fn index(&self) -> Option<&I> {
        self.index.get()
    }

    /// Documents in the built index.
    pub fn document_count(&self) -> Option<usize> {
        self.index.get().map(TextIndex::len)
    }
}
