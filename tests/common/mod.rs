//! Shared test utilities and fixtures.

#![allow(dead_code)]

use sitekit::{
    DocumentIndexClient, DocumentSource, LoadError, MemoryStorage, SiteConfig, SiteSession, SourceDocument,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

// Re-export canonical test utilities from sitekit::testing
pub use sitekit::testing::{
    docs_json, make_doc, make_doc_in, CountingSource, FailingSource, MemoryPage, RecordingTransport,
};

// ============================================================================
// FIXTURES
// ============================================================================

/// A small docs site. "install" appears in the title of doc 1 and in the
/// content of docs 1 and 2.
pub fn site_docs() -> Vec<SourceDocument> {
    vec![
        make_doc_in(1, "Install", "Run the installer and follow the setup steps.", "Guides"),
        make_doc_in(2, "Configuration", "Install plugins, then configure the theme.", "Reference"),
        make_doc(3, "Changelog", "Release notes for every version."),
        make_doc_in(4, "Deploy", "Publish the site to any static host.", "Guides"),
        make_doc_in(5, "Upgrade", "Move between major versions safely.", ""),
    ]
}

pub fn site_json() -> Vec<u8> {
    docs_json(&site_docs())
}

/// The single-document set used throughout the behavior scenarios.
pub const INSTALL_ONLY: &str = r#"[{"id":1,"title":"Install","content":"run setup","url":"/install"}]"#;

/// A client that has already loaded `body`.
pub fn loaded_client(config: &SiteConfig, body: &[u8]) -> DocumentIndexClient {
    let client = DocumentIndexClient::from_config(config);
    let ticket = client.begin_load().expect("fresh client grants a load");
    assert!(client.finish_load(ticket, Ok(body.to_vec())), "fixture should load");
    client
}

/// A session on the default config with empty storage.
pub fn session() -> SiteSession {
    session_with(SiteConfig::default(), MemoryStorage::new())
}

pub fn session_with(config: SiteConfig, storage: MemoryStorage) -> SiteSession {
    SiteSession::new(config, Box::new(storage)).expect("valid config")
}

/// A default session whose index already holds [`site_docs`].
pub fn loaded_session(page: &mut MemoryPage) -> SiteSession {
    let mut session = session();
    let dispatch = session.handle(
        page,
        sitekit::PageEvent::Focus {
            pair: sitekit::PairId::Desktop,
        },
    );
    let ticket = dispatch.load.expect("first focus starts the load");
    assert!(session.finish_load(ticket, Ok(site_json())));
    session
}

// ============================================================================
// SOURCES
// ============================================================================

/// Holds every fetch until [`open`](Self::open) is called.
#[derive(Debug)]
pub struct GatedSource {
    body: Vec<u8>,
    gate: Notify,
    fetches: AtomicUsize,
}

impl GatedSource {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            gate: Notify::new(),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Let the pending fetch resolve. Safe to call before the fetch starts.
    pub fn open(&self) {
        self.gate.notify_one();
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl DocumentSource for GatedSource {
    async fn fetch(&self, _path: &str) -> Result<Vec<u8>, LoadError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(self.body.clone())
    }
}

/// Titles of the rendered result entries, in order.
pub fn rendered_titles(page: &MemoryPage, container_id: &str) -> Vec<String> {
    page.results(container_id)
        .iter()
        .filter_map(|node| match node {
            sitekit::ResultNode::Entry { title, .. } => Some(title.clone()),
            sitekit::ResultNode::Message { .. } => None,
        })
        .collect()
}
