// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Type-safe result deduplication.
//!
//! The index answers with one match list per field, so a page whose title
//! *and* body mention "install" comes back twice. `ResultMerger` collapses
//! those into one record per [`DocId`].
//!
//! **Invariant**: each document appears at most once in the merged output,
//! at the position of its first occurrence.
//!
//! Which duplicate survives is decided by field iteration order (title lists
//! come before content lists). The stored record is identical across
//! duplicates, so the choice only matters for ordering.

use crate::types::{DocId, FieldHits, MatchResult};
use std::collections::HashSet;

/// Order-preserving, first-occurrence-wins merger keyed by document id.
///
/// # Example
///
/// ```ignore
/// let mut merger = ResultMerger::new();
/// merger.merge_fields(index.search("install", &options));
/// let results = merger.into_results(10);
/// ```
#[derive(Debug, Default)]
pub struct ResultMerger {
    seen: HashSet<DocId>,
    results: Vec<MatchResult>,
}

impl ResultMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one record. Returns `false` if the id was already present.
    pub fn merge(&mut self, result: MatchResult) -> bool {
        if !self.seen.insert(result.id.clone()) {
            return false;
        }
        self.results.push(result);
        true
    }

    /// Flatten per-field lists in the order given and merge every hit.
    ///
    /// Hits without stored fields (a non-enriched search) still merge, with
    /// empty display fields.
    pub fn merge_fields(&mut self, fields: impl IntoIterator<Item = FieldHits>) {
        for field in fields {
            for hit in field.result {
                if self.seen.contains(&hit.id) {
                    continue;
                }
                let stored = hit.doc.unwrap_or_default();
                self.merge(MatchResult::from_stored(hit.id, stored));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn contains(&self, id: &DocId) -> bool {
        self.seen.contains(id)
    }

    /// Merged records in first-seen order, truncated to `limit`.
    pub fn into_results(mut self, limit: usize) -> Vec<MatchResult> {
        self.results.truncate(limit);
        self.results
    }
}
