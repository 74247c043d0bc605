//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::error::{LoadError, SubmitError};
use crate::page::newsletter::FormTransport;
use crate::page::{Page, ResultNode, Target};
use crate::source::DocumentSource;
use crate::types::{DocId, SourceDocument};
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Create a simple test document.
///
/// This is the canonical implementation used across all tests.
pub fn make_doc(id: u64, title: &str, content: &str) -> SourceDocument {
    SourceDocument {
        id: DocId::from(id),
        title: title.to_string(),
        content: content.to_string(),
        url: format!("/doc/{}", id),
        section: None,
    }
}

/// Create a test document with a section label.
pub fn make_doc_in(id: u64, title: &str, content: &str, section: &str) -> SourceDocument {
    SourceDocument {
        section: Some(section.to_string()),
        ..make_doc(id, title, content)
    }
}

/// Serialize documents the way the site build writes `index.json`.
pub fn docs_json(docs: &[SourceDocument]) -> Vec<u8> {
    let values: Vec<serde_json::Value> = docs
        .iter()
        .map(|doc| {
            let mut value = serde_json::json!({
                "id": doc.id.as_str(),
                "title": doc.title,
                "content": doc.content,
                "url": doc.url,
            });
            if let Some(section) = &doc.section {
                value["section"] = serde_json::Value::String(section.clone());
            }
            value
        })
        .collect();
    serde_json::to_vec(&values).unwrap_or_default()
}

/// Serves a fixed body and counts fetches.
#[derive(Debug)]
pub struct CountingSource {
    body: Vec<u8>,
    fetches: AtomicUsize,
}

impl CountingSource {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl DocumentSource for CountingSource {
    async fn fetch(&self, _path: &str) -> Result<Vec<u8>, LoadError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.body.clone())
    }
}

/// Always fails with the given error.
#[derive(Debug, Clone)]
pub struct FailingSource(pub LoadError);

impl FailingSource {
    /// A rejected fetch, as when the visitor is offline.
    pub fn offline() -> Self {
        FailingSource(LoadError::Network {
            path: "/index.json".to_string(),
            reason: "Failed to fetch".to_string(),
        })
    }
}

impl DocumentSource for FailingSource {
    async fn fetch(&self, _path: &str) -> Result<Vec<u8>, LoadError> {
        Err(self.0.clone())
    }
}

/// Records posted forms; fails every post if built with [`failing`](Self::failing).
#[derive(Debug, Default)]
pub struct RecordingTransport {
    failure: Option<SubmitError>,
    posts: Mutex<Vec<(String, String)>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failure: Some(SubmitError::Network {
                action: "https://forms.example.com".to_string(),
                reason: "Failed to fetch".to_string(),
            }),
            posts: Mutex::new(Vec::new()),
        }
    }

    pub fn posts(&self) -> Vec<(String, String)> {
        self.posts.lock().clone()
    }
}

impl FormTransport for RecordingTransport {
    async fn post(&self, action: &str, body: String) -> Result<(), SubmitError> {
        self.posts.lock().push((action.to_string(), body));
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// A [`Page`] that keeps just enough DOM state to assert on.
///
/// Targets are tracked by value: a class set on `Target::All(".x")` is only
/// visible through the same target.
#[derive(Debug, Default)]
pub struct MemoryPage {
    classes: HashMap<Target, BTreeSet<String>>,
    attributes: HashMap<(Target, String), String>,
    styles: HashMap<(Target, String), String>,
    text: HashMap<Target, String>,
    html: HashMap<Target, String>,
    disabled: HashMap<Target, bool>,
    removed: Vec<Target>,
    results: HashMap<String, Vec<ResultNode>>,
    focused: Option<String>,
    blurred: Vec<String>,
    alerts: Vec<String>,
    scrolls: Vec<f64>,
    history: Vec<String>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_class_on(&self, target: &Target, class: &str) -> bool {
        self.classes
            .get(target)
            .is_some_and(|set| set.contains(class))
    }

    /// Class on the element with `id`.
    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.has_class_on(&Target::id(id), class)
    }

    pub fn body_has_class(&self, class: &str) -> bool {
        self.has_class_on(&Target::Body, class)
    }

    pub fn root_has_class(&self, class: &str) -> bool {
        self.has_class_on(&Target::Root, class)
    }

    pub fn attribute(&self, target: &Target, name: &str) -> Option<&str> {
        self.attributes
            .get(&(target.clone(), name.to_string()))
            .map(String::as_str)
    }

    pub fn style(&self, target: &Target, property: &str) -> Option<&str> {
        self.styles
            .get(&(target.clone(), property.to_string()))
            .map(String::as_str)
    }

    pub fn text(&self, target: &Target) -> Option<&str> {
        self.text.get(target).map(String::as_str)
    }

    pub fn html(&self, target: &Target) -> Option<&str> {
        self.html.get(target).map(String::as_str)
    }

    pub fn is_disabled(&self, target: &Target) -> bool {
        self.disabled.get(target).copied().unwrap_or(false)
    }

    pub fn was_removed(&self, target: &Target) -> bool {
        self.removed.contains(target)
    }

    /// Current children of a results container.
    pub fn results(&self, container_id: &str) -> &[ResultNode] {
        self.results
            .get(container_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn was_blurred(&self, id: &str) -> bool {
        self.blurred.iter().any(|b| b == id)
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn scrolls(&self) -> &[f64] {
        &self.scrolls
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Page for MemoryPage {
    fn set_class(&mut self, target: &Target, class: &str, on: bool) {
        let set = self.classes.entry(target.clone()).or_default();
        if on {
            set.insert(class.to_string());
        } else {
            set.remove(class);
        }
    }

    fn set_attribute(&mut self, target: &Target, name: &str, value: &str) {
        self.attributes
            .insert((target.clone(), name.to_string()), value.to_string());
    }

    fn set_style(&mut self, target: &Target, property: &str, value: &str) {
        let key = (target.clone(), property.to_string());
        if value.is_empty() {
            self.styles.remove(&key);
        } else {
            self.styles.insert(key, value.to_string());
        }
    }

    fn set_text(&mut self, target: &Target, text: &str) {
        self.text.insert(target.clone(), text.to_string());
    }

    fn set_html(&mut self, target: &Target, html: &str) {
        self.html.insert(target.clone(), html.to_string());
    }

    fn set_disabled(&mut self, target: &Target, disabled: bool) {
        self.disabled.insert(target.clone(), disabled);
    }

    fn remove(&mut self, target: &Target) {
        self.removed.push(target.clone());
    }

    fn focus(&mut self, id: &str) {
        self.focused = Some(id.to_string());
    }

    fn blur(&mut self, id: &str) {
        if self.focused.as_deref() == Some(id) {
            self.focused = None;
        }
        self.blurred.push(id.to_string());
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn scroll_to(&mut self, top: f64) {
        self.scrolls.push(top);
    }

    fn push_history(&mut self, fragment: &str) {
        self.history.push(fragment.to_string());
    }

    fn replace_results(&mut self, container_id: &str, nodes: &[ResultNode]) {
        self.results.insert(container_id.to_string(), nodes.to_vec());
    }
}
