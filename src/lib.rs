// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Client-side search and page interactivity for static documentation sites.
//!
//! The core is a lazily loaded search index: nothing is fetched until a
//! visitor touches a search box, the document list is fetched exactly once,
//! and every keystroke after that is a synchronous, deduplicated query.
//! Around it sit the small page features a docs theme needs (theme toggle,
//! mobile nav, banner, newsletter form, table of contents, ask-AI panel).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   PageEvent   ┌──────────────┐   begin_load   ┌──────────────────┐
//! │  host (JS /  │──────────────▶│ SiteSession  │───────────────▶│ DocumentIndex-   │
//! │  CLI / test) │◀──────────────│  controller  │                │ Client (OnceLock)│
//! └──────────────┘  Dispatch +   │  page/*      │◀── on_input ──▶│  └─ TextIndex    │
//!        │          DomCommands  └──────────────┘                └──────────────────┘
//!        │ fetch /index.json            │                                 ▲
//!        └──────── finish_load ─────────┴─────────────────────────────────┘
//! ```
//!
//! | Module       | Role                                                   |
//! |--------------|--------------------------------------------------------|
//! | `types`      | Documents, ids, per-field hits, match records          |
//! | `index`      | `TextIndex` capability and the default `ForwardIndex`  |
//! | `search`     | Load-once client, query dispatch, dedup, rendering     |
//! | `controller` | Focus/touch activation, shortcut, dismissal            |
//! | `page`       | DOM abstraction and the page features                  |
//! | `session`    | Event routing for one page view                        |
//! | `config`     | `SiteConfig` (TOML or JS object)                       |
//!
//! # Usage
//!
//! ```ignore
//! use sitekit::{MemoryStorage, PageEvent, PairId, SiteConfig, SiteSession};
//!
//! let mut session = SiteSession::new(SiteConfig::default(), Box::new(MemoryStorage::new()))?;
//! let dispatch = session.handle(&mut page, PageEvent::Focus { pair: PairId::Desktop });
//! if let Some(ticket) = dispatch.load {
//!     session.complete_load(ticket, &source).await;
//! }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod index;
pub mod page;
pub mod search;
pub mod session;
pub mod source;
pub mod testing;
pub mod types;
mod utils;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::{PairId, SearchPair, SearchProfile, SiteConfig, VisibilityToggle};
pub use controller::{Activation, ActivationController, KeyPress, PairState};
pub use error::{ConfigError, LoadError, SubmitError};
pub use index::{build_index, ForwardIndex, IndexSchema, SearchOptions, TextIndex, Tokenizer};
pub use page::{CommandPage, DomCommand, MemoryStorage, Page, ResultNode, Storage, StorageScope, Target};
pub use search::{
    render_html, DocumentIndexClient, DropReason, LoadState, LoadTicket, QueryDispatcher, QueryOutcome,
    ResultMerger, ResultRenderer,
};
pub use session::{Dispatch, PageEvent, SiteSession};
#[cfg(feature = "cli")]
pub use source::FileSource;
pub use source::{DocumentSource, StaticSource};
pub use types::{DocId, FieldHits, Hit, IndexedField, MatchResult, SourceDocument, StoredField, StoredFields};
pub use utils::normalize;
