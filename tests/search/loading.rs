//! Lazy, load-once index lifecycle.

use super::common::*;
use sitekit::{
    DocumentIndexClient, DropReason, IndexSchema, LoadError, LoadState, QueryDispatcher, QueryOutcome, SearchProfile,
    SiteConfig,
};
use std::time::Duration;

fn client() -> DocumentIndexClient {
    DocumentIndexClient::new("/index.json", IndexSchema::default())
}

// ============================================================================
// EXACTLY-ONCE FETCH
// ============================================================================

#[tokio::test]
async fn test_concurrent_triggers_issue_one_fetch() {
    let client = client();
    let source = GatedSource::new(INSTALL_ONLY);

    tokio::join!(client.trigger_load(&source), client.trigger_load(&source), async {
        assert_eq!(client.state(), LoadState::Loading);
        source.open();
    });

    assert_eq!(source.fetches(), 1);
    assert!(client.is_ready());
    assert_eq!(client.document_count(), Some(1));
}

#[tokio::test]
async fn test_triggers_after_load_are_noops() {
    let client = client();
    let source = CountingSource::new(INSTALL_ONLY);

    for _ in 0..5 {
        client.trigger_load(&source).await;
    }

    assert_eq!(source.fetches(), 1);
    assert!(client.is_ready());
}

#[test]
fn test_racing_threads_get_one_ticket() {
    let client = client();

    let granted: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8).map(|_| s.spawn(|| client.begin_load())).collect();
        handles
            .into_iter()
            .filter_map(|h| h.join().unwrap())
            .collect()
    });

    assert_eq!(granted.len(), 1);
    for ticket in granted {
        assert!(client.finish_load(ticket, Ok(INSTALL_ONLY.as_bytes().to_vec())));
    }
}

#[tokio::test]
async fn test_hanging_fetch_stays_loading() {
    let client = client();
    let source = GatedSource::new(INSTALL_ONLY);

    let outcome = tokio::time::timeout(Duration::from_millis(20), client.trigger_load(&source)).await;
    assert!(outcome.is_err(), "gate was never opened");
    assert_eq!(client.state(), LoadState::Loading);

    let dispatcher = QueryDispatcher::new(&SearchProfile::full());
    assert_eq!(
        dispatcher.on_input(&client, "install"),
        QueryOutcome::Dropped(DropReason::NotReady)
    );
}

// ============================================================================
// FAILURES
// ============================================================================

#[tokio::test]
async fn test_rejected_fetch_leaves_search_inert() {
    let client = client();
    client.trigger_load(&FailingSource::offline()).await;

    assert!(!client.is_ready());
    assert_eq!(client.state(), LoadState::Failed);
    assert!(matches!(client.last_error(), Some(LoadError::Network { .. })));

    let dispatcher = QueryDispatcher::new(&SearchProfile::full());
    let outcome = dispatcher.on_input(&client, "abc");
    assert!(outcome.is_dropped());
    assert!(outcome.results().is_empty());
}

#[tokio::test]
async fn test_http_status_error_message() {
    let client = client();
    client
        .trigger_load(&FailingSource(LoadError::Status { status: 404 }))
        .await;

    let err = client.last_error().unwrap();
    assert_eq!(err.to_string(), "HTTP error! status: 404");
}

#[tokio::test]
async fn test_malformed_body_fails() {
    let client = client();
    client
        .trigger_load(&CountingSource::new("<!doctype html><p>Not found</p>"))
        .await;

    assert_eq!(client.state(), LoadState::Failed);
    assert!(matches!(client.last_error(), Some(LoadError::Parse(_))));
}

#[tokio::test]
async fn test_failure_is_terminal_by_default() {
    let client = client();
    client.trigger_load(&FailingSource::offline()).await;

    let healthy = CountingSource::new(INSTALL_ONLY);
    client.trigger_load(&healthy).await;

    assert_eq!(healthy.fetches(), 0);
    assert_eq!(client.state(), LoadState::Failed);
}

#[tokio::test]
async fn test_retry_profile_refetches_after_failure() {
    let mut config = SiteConfig::default();
    config.search.retry_failed_load = true;
    let client: DocumentIndexClient = DocumentIndexClient::from_config(&config);

    client.trigger_load(&FailingSource::offline()).await;
    assert_eq!(client.state(), LoadState::Failed);

    let healthy = CountingSource::new(INSTALL_ONLY);
    client.trigger_load(&healthy).await;
    client.trigger_load(&healthy).await;

    assert_eq!(healthy.fetches(), 1);
    assert!(client.is_ready());
    assert_eq!(client.last_error(), None);
}

// ============================================================================
// DOCUMENT LIST SHAPE
// ============================================================================

#[test]
fn test_empty_list_loads_with_no_documents() {
    let client = loaded_client(&SiteConfig::default(), b"[]");
    assert!(client.is_ready());
    assert_eq!(client.document_count(), Some(0));
}

#[test]
fn test_duplicate_ids_keep_first_document() {
    let docs = vec![
        make_doc(7, "Install", "first copy"),
        make_doc(7, "Reinstall", "second copy"),
        make_doc(8, "Deploy", "publish"),
    ];
    let client = loaded_client(&SiteConfig::default(), &docs_json(&docs));

    assert_eq!(client.document_count(), Some(2));
    let dispatcher = QueryDispatcher::new(&SearchProfile::full());
    assert!(dispatcher.on_input(&client, "reinstall").results().is_empty());
    assert_eq!(dispatcher.on_input(&client, "install").results()[0].title, "Install");
}

#[test]
fn test_permalink_alias_and_numeric_ids() {
    let body = br#"[
        {"id": 42, "title": "Hugo", "content": "static sites", "permalink": "/hugo/"},
        {"id": "guide-1", "title": "Guide", "content": "static pages", "url": "/guide/"}
    ]"#;
    let client = loaded_client(&SiteConfig::default(), body);
    let dispatcher = QueryDispatcher::new(&SearchProfile::full());

    let results = dispatcher.on_input(&client, "static").results().to_vec();
    let urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls.len(), 2);
    assert!(urls.contains(&"/hugo/"));
    assert!(urls.contains(&"/guide/"));
    assert!(results.iter().any(|r| r.id.as_str() == "42"));
}

#[test]
fn test_adjacent_large_ids_are_separate_documents() {
    let body = br#"[
        {"id": 18446744073709551615, "title": "Alpha", "content": "release notes", "url": "/alpha/"},
        {"id": 18446744073709551614, "title": "Beta", "content": "release notes", "url": "/beta/"}
    ]"#;
    let client = loaded_client(&SiteConfig::default(), body);
    assert_eq!(client.document_count(), Some(2));

    let dispatcher = QueryDispatcher::new(&SearchProfile::full());
    let ids: Vec<String> = dispatcher
        .on_input(&client, "release")
        .results()
        .iter()
        .map(|r| r.id.to_string())
        .collect();
    assert_eq!(ids, vec!["18446744073709551615", "18446744073709551614"]);
}
