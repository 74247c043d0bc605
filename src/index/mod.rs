// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The text-indexing capability.
//!
//! The search client treats the index as a black box with three operations,
//! mirroring what a browser full-text library exposes:
//!
//! | Operation                    | Meaning                                    |
//! |------------------------------|--------------------------------------------|
//! | `create(schema)`             | Empty index for the given schema           |
//! | `add(id, doc)`               | Insert one document (bulk, at build time)  |
//! | `search(query, options)`     | One match list per indexed field           |
//!
//! Tokenization and ranking belong to the engine, not to the client. The
//! crate ships one engine, [`ForwardIndex`], which is what both search
//! profiles use by default.

mod forward;

pub use forward::ForwardIndex;

use crate::error::LoadError;
use crate::types::{DocId, FieldHits, IndexedField, SourceDocument, StoredField};
use serde::{Deserialize, Serialize};

/// How words are cut into index terms.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tokenizer {
    /// Whole words only: "install" matches "install", not "ins".
    Strict,
    /// Every word prefix is a term: "ins" matches "install".
    #[default]
    Forward,
}

/// Which fields are tokenized and which are only stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IndexSchema {
    pub index: Vec<IndexedField>,
    pub store: Vec<StoredField>,
    pub tokenize: Tokenizer,
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self {
            index: vec![IndexedField::Title, IndexedField::Content],
            store: vec![StoredField::Title, StoredField::Url, StoredField::Section],
            tokenize: Tokenizer::Forward,
        }
    }
}

impl IndexSchema {
    /// The legacy layout: whole-word matching, no section label.
    pub fn strict() -> Self {
        Self {
            index: vec![IndexedField::Title, IndexedField::Content],
            store: vec![StoredField::Title, StoredField::Url],
            tokenize: Tokenizer::Strict,
        }
    }

    /// A schema that indexes nothing cannot answer queries.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.index.is_empty() {
            return Err(LoadError::IndexUnavailable(
                "schema declares no indexed fields".to_string(),
            ));
        }
        Ok(())
    }
}

/// Options for a single query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchOptions {
    /// Maximum hits per field.
    pub limit: usize,
    /// Attach stored fields to each hit.
    pub enrich: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: 10,
            enrich: false,
        }
    }
}

/// A full-text index the search client can build and query.
///
/// Implementations must return field lists in schema order and must not
/// repeat an id within one list.
pub trait TextIndex: Send + Sync + Sized {
    /// Create an empty index.
    fn create(schema: &IndexSchema) -> Result<Self, LoadError>;

    /// Insert one document. Returns `false` when the id was already present
    /// and the document was ignored.
    fn add(&mut self, id: DocId, doc: &SourceDocument) -> bool;

    /// Insert a batch. Engines may override this with a faster bulk path.
    fn add_all(&mut self, docs: &[SourceDocument]) -> usize {
        docs.iter()
            .filter(|doc| self.add(doc.id.clone(), doc))
            .count()
    }

    /// Query every indexed field.
    fn search(&self, query: &str, options: &SearchOptions) -> Vec<FieldHits>;

    /// Number of documents indexed.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build a complete index from a document list in one go.
pub fn build_index<I: TextIndex>(
    schema: &IndexSchema,
    docs: &[SourceDocument],
) -> Result<I, LoadError> {
    schema.validate()?;
    let mut index = I::create(schema)?;
    let added = index.add_all(docs);
    if added < docs.len() {
        tracing::warn!(
            skipped = docs.len() - added,
            "duplicate document ids in index source; kept first occurrence"
        );
    }
    Ok(index)
}
