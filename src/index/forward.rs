// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-field inverted index with optional forward (prefix) tokenization.
//!
//! Each indexed field gets its own term map. With [`Tokenizer::Forward`] every
//! prefix of every word is a term, so a query word is always a single hash
//! lookup: "ins" finds "install" without scanning the vocabulary. Docs sites
//! are small (hundreds of pages, not millions), so the prefix blow-up is a
//! good trade for keystroke latency.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **POSTINGS_BY_ORDINAL**: each posting list is sorted by document ordinal
//!    (documents are appended in insertion order and never removed)
//! 2. **ONE_POSTING_PER_DOC**: a term has at most one posting per document per
//!    field, carrying the first word position where it occurs
//! 3. **UNIQUE_IDS**: a `DocId` maps to exactly one ordinal

use super::{IndexSchema, SearchOptions, TextIndex, Tokenizer};
use crate::error::LoadError;
use crate::types::{DocId, FieldHits, Hit, IndexedField, SourceDocument, StoredFields};
use crate::utils::words;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Posting {
    doc: u32,
    position: u32,
}

#[derive(Debug, Clone)]
struct FieldTerms {
    field: IndexedField,
    terms: HashMap<String, Vec<Posting>>,
}

/// Terms of one document, one map per indexed field (schema order).
type DocTerms = Vec<HashMap<String, u32>>;

/// In-memory per-field index. See the module docs.
#[derive(Debug, Clone)]
pub struct ForwardIndex {
    schema: IndexSchema,
    ids: Vec<DocId>,
    ordinals: HashMap<DocId, u32>,
    stored: Vec<StoredFields>,
    fields: Vec<FieldTerms>,
}

/// Terms of a single field value, mapped to their first word position.
fn tokenize_field(text: &str, tokenizer: Tokenizer) -> HashMap<String, u32> {
    let mut terms: HashMap<String, u32> = HashMap::new();
    for (position, word) in words(text).into_iter().enumerate() {
        let position = position as u32;
        match tokenizer {
            Tokenizer::Strict => {
                terms.entry(word).or_insert(position);
            }
            Tokenizer::Forward => {
                let mut prefix = String::with_capacity(word.len());
                for c in word.chars() {
                    prefix.push(c);
                    terms.entry(prefix.clone()).or_insert(position);
                }
            }
        }
    }
    terms
}

fn tokenize_doc(schema: &IndexSchema, doc: &SourceDocument) -> DocTerms {
    schema
        .index
        .iter()
        .map(|field| tokenize_field(doc.indexed_text(*field), schema.tokenize))
        .collect()
}

impl ForwardIndex {
    /// Append one document's terms. Callers assign ordinals in order.
    fn push_terms(&mut self, ordinal: u32, doc_terms: DocTerms) {
        for (field_terms, terms) in self.fields.iter_mut().zip(doc_terms) {
            for (term, position) in terms {
                field_terms.terms.entry(term).or_default().push(Posting {
                    doc: ordinal,
                    position,
                });
            }
        }
    }

    /// Reserve an ordinal for a new id, or `None` if the id is taken.
    fn register(&mut self, id: DocId, doc: &SourceDocument) -> Option<u32> {
        if self.ordinals.contains_key(&id) {
            return None;
        }
        let ordinal = self.ids.len() as u32;
        self.ordinals.insert(id.clone(), ordinal);
        self.ids.push(id);
        self.stored.push(doc.stored(&self.schema.store));
        Some(ordinal)
    }

    /// Number of distinct terms across all fields.
    pub fn term_count(&self) -> usize {
        self.fields.iter().map(|f| f.terms.len()).sum()
    }

    /// Stored record for an id, if indexed.
    pub fn stored(&self, id: &DocId) -> Option<&StoredFields> {
        self.ordinals
            .get(id)
            .map(|&ordinal| &self.stored[ordinal as usize])
    }

    pub fn schema(&self) -> &IndexSchema {
        &self.schema
    }

    fn search_field(&self, field: &FieldTerms, query: &[String], limit: usize) -> Vec<u32> {
        let Some((first, rest)) = query.split_first() else {
            return Vec::new();
        };
        let Some(candidates) = field.terms.get(first) else {
            return Vec::new();
        };

        // Every query word must match somewhere in the field.
        let others: Option<Vec<HashMap<u32, u32>>> = rest
            .iter()
            .map(|term| {
                field
                    .terms
                    .get(term)
                    .map(|postings| postings.iter().map(|p| (p.doc, p.position)).collect())
            })
            .collect();
        let Some(others) = others else {
            return Vec::new();
        };

        let mut scored: Vec<(u32, u32)> = candidates
            .iter()
            .filter_map(|posting| {
                let mut score = posting.position;
                for other in &others {
                    score += other.get(&posting.doc)?;
                }
                Some((score, posting.doc))
            })
            .collect();

        // Earlier matches rank first; ties keep insertion order.
        scored.sort_unstable();
        scored.into_iter().take(limit).map(|(_, doc)| doc).collect()
    }
}

impl TextIndex for ForwardIndex {
    fn create(schema: &IndexSchema) -> Result<Self, LoadError> {
        schema.validate()?;
        Ok(Self {
            schema: schema.clone(),
            ids: Vec::new(),
            ordinals: HashMap::new(),
            stored: Vec::new(),
            fields: schema
                .index
                .iter()
                .map(|&field| FieldTerms {
                    field,
                    terms: HashMap::new(),
                })
                .collect(),
        })
    }

    fn add(&mut self, id: DocId, doc: &SourceDocument) -> bool {
        match self.register(id, doc) {
            Some(ordinal) => {
                let doc_terms = tokenize_doc(&self.schema, doc);
                self.push_terms(ordinal, doc_terms);
                true
            }
            None => false,
        }
    }

    /// Bulk build as map-reduce:
    /// 1. **Register**: assign ordinals sequentially (first id wins)
    /// 2. **Map**: tokenize documents in parallel
    /// 3. **Reduce**: append postings in ordinal order, keeping lists sorted
    fn add_all(&mut self, docs: &[SourceDocument]) -> usize {
        let accepted: Vec<(u32, &SourceDocument)> = docs
            .iter()
            .filter_map(|doc| self.register(doc.id.clone(), doc).map(|ord| (ord, doc)))
            .collect();

        let schema = &self.schema;
        #[cfg(feature = "parallel")]
        let tokenized: Vec<(u32, DocTerms)> = accepted
            .par_iter()
            .map(|(ordinal, doc)| (*ordinal, tokenize_doc(schema, doc)))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let tokenized: Vec<(u32, DocTerms)> = accepted
            .iter()
            .map(|(ordinal, doc)| (*ordinal, tokenize_doc(schema, doc)))
            .collect();

        let added = tokenized.len();
        for (ordinal, doc_terms) in tokenized {
            self.push_terms(ordinal, doc_terms);
        }
        added
    }

    fn search(&self, query: &str, options: &SearchOptions) -> Vec<FieldHits> {
        let query = words(query);
        if query.is_empty() || options.limit == 0 {
            return Vec::new();
        }

        self.fields
            .iter()
            .filter_map(|field| {
                let ordinals = self.search_field(field, &query, options.limit);
                if ordinals.is_empty() {
                    return None;
                }
                let result = ordinals
                    .into_iter()
                    .map(|ordinal| Hit {
                        id: self.ids[ordinal as usize].clone(),
                        doc: options
                            .enrich
                            .then(|| self.stored[ordinal as usize].clone()),
                    })
                    .collect();
                Some(FieldHits {
                    field: field.field,
                    result,
                })
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.ids.len()
    }
}
