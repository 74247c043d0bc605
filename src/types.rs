// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the search client.
//!
//! These types define how source documents, stored fields, and match records
//! fit together. The site generator emits `index.json` as a flat array of
//! [`SourceDocument`]; everything downstream works with [`DocId`] keys and
//! display-ready [`MatchResult`] records.
//!
//! | Type             | Role                                              |
//! |------------------|---------------------------------------------------|
//! | `DocId`          | Stable document key (string or integer in JSON)   |
//! | `SourceDocument` | One entry of `index.json`                         |
//! | `IndexedField`   | Tokenized fields: title, content                  |
//! | `StoredField`    | Fields kept for display: title, url, section      |
//! | `StoredFields`   | The stored record returned by enriched searches   |
//! | `FieldHits`      | One per-field match list from the index           |
//! | `MatchResult`    | Deduplicated, display-ready result                |
//!
//! # Invariants
//!
//! - **DocId**: unique within a loaded document set. Duplicate ids are
//!   rejected at build time (the first document wins).
//! - **FieldHits**: each list holds a given id at most once; the same id may
//!   appear in several lists, which is what deduplication collapses.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// =============================================================================
// NEWTYPES
// =============================================================================

/// Type-safe document identifier.
///
/// Hugo's JSON output happily emits either `"id": 12` or `"id": "posts/intro"`
/// depending on the template. Both forms normalize to the same string-backed
/// key so `12` and `"12"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    pub fn new(id: impl Into<String>) -> Self {
        DocId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocId {
    fn from(id: &str) -> Self {
        DocId(id.to_string())
    }
}

impl From<u64> for DocId {
    fn from(id: u64) -> Self {
        DocId(id.to_string())
    }
}

impl<'de> Deserialize<'de> for DocId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            UInt(u64),
            Float(f64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => DocId(n.to_string()),
            RawId::UInt(n) => DocId(n.to_string()),
            RawId::Float(n) => DocId(n.to_string()),
            RawId::Text(s) => DocId(s),
        })
    }
}

// =============================================================================
// DOCUMENT TYPES
// =============================================================================

/// One entry of the prebuilt `index.json`.
///
/// The link field goes by `url` in the current theme and `permalink` in the
/// legacy one; both deserialize into `url`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceDocument {
    pub id: DocId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(alias = "permalink")]
    pub url: String,
    #[serde(default)]
    pub section: Option<String>,
}

impl SourceDocument {
    /// Text of an indexed field.
    pub fn indexed_text(&self, field: IndexedField) -> &str {
        match field {
            IndexedField::Title => &self.title,
            IndexedField::Content => &self.content,
        }
    }

    /// Project this document onto the stored fields of a schema.
    pub fn stored(&self, fields: &[StoredField]) -> StoredFields {
        let mut stored = StoredFields::default();
        for field in fields {
            match field {
                StoredField::Title => stored.title = Some(self.title.clone()),
                StoredField::Url => stored.url = Some(self.url.clone()),
                StoredField::Section => stored.section = self.section.clone(),
            }
        }
        stored
    }
}

/// A field that is tokenized and matched against queries.
///
/// Declaration order is query order: title hits are always listed before
/// content hits, which is what makes first-occurrence deduplication stable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IndexedField {
    Title,
    Content,
}

impl IndexedField {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexedField::Title => "title",
            IndexedField::Content => "content",
        }
    }
}

/// A field retained for display but never tokenized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StoredField {
    Title,
    Url,
    Section,
}

/// Stored record attached to a hit when the search is enriched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

// =============================================================================
// SEARCH OUTPUT
// =============================================================================

/// A single document reference inside one field's match list.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Hit {
    pub id: DocId,
    /// Present only for enriched searches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<StoredFields>,
}

/// Match list for one indexed field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldHits {
    pub field: IndexedField,
    pub result: Vec<Hit>,
}

/// What the results list shows for a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchResult {
    pub id: DocId,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl MatchResult {
    /// Build the display record from a hit's stored fields.
    ///
    /// Missing stored fields degrade to empty strings rather than dropping the
    /// hit; a result without a url still renders, it just links nowhere.
    pub fn from_stored(id: DocId, stored: StoredFields) -> Self {
        MatchResult {
            id,
            title: stored.title.unwrap_or_default(),
            url: stored.url.unwrap_or_default(),
            section: stored.section,
        }
    }
}
