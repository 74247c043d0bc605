//! Search box activation, dismissal and the keyboard shortcut.

use super::common::*;
use sitekit::{
    DropReason, KeyPress, LoadState, MemoryStorage, PageEvent, PairId, PairState, QueryOutcome, SiteConfig,
};

const DESKTOP_INPUT: &str = "search-input-desktop";
const DESKTOP_RESULTS: &str = "search-results-desktop";
const MOBILE_INPUT: &str = "search-input-mobile";
const MOBILE_RESULTS: &str = "search-results-mobile";

fn input(pair: PairId, value: &str) -> PageEvent {
    PageEvent::Input {
        pair,
        value: value.to_string(),
    }
}

fn click(path: &[&str]) -> PageEvent {
    PageEvent::Click {
        path: path.iter().map(|s| s.to_string()).collect(),
    }
}

// ============================================================================
// LAZY LOADING
// ============================================================================

#[test]
fn test_nothing_loads_until_activation() {
    let mut page = MemoryPage::new();
    let mut session = session();

    let _ = session.handle(&mut page, PageEvent::Ready { banner_key: None });
    let _ = session.handle(&mut page, click(&["main"]));
    assert_eq!(session.client().state(), LoadState::NotLoaded);

    let dispatch = session.handle(&mut page, PageEvent::Touch { pair: PairId::Mobile });
    assert!(dispatch.load.is_some());
    assert_eq!(session.client().state(), LoadState::Loading);
}

#[tokio::test]
async fn test_focus_and_touch_share_one_fetch() {
    let mut page = MemoryPage::new();
    let mut session = session();
    let source = CountingSource::new(site_json());

    let first = session.handle(&mut page, PageEvent::Focus { pair: PairId::Desktop });
    let second = session.handle(&mut page, PageEvent::Touch { pair: PairId::Mobile });
    let third = session.handle(&mut page, PageEvent::Focus { pair: PairId::Desktop });
    assert!(second.load.is_none());
    assert!(third.load.is_none());

    session.complete_load(first.load.unwrap(), &source).await;
    assert_eq!(source.fetches(), 1);
    assert!(session.client().is_ready());

    let later = session.handle(&mut page, PageEvent::Focus { pair: PairId::Mobile });
    assert!(later.load.is_none());
}

#[test]
fn test_input_before_ready_shows_nothing() {
    let mut page = MemoryPage::new();
    let mut session = session();
    let pending = session.handle(&mut page, PageEvent::Focus { pair: PairId::Desktop });

    let dispatch = session.handle(&mut page, input(PairId::Desktop, "install"));
    assert_eq!(dispatch.outcome, Some(QueryOutcome::Dropped(DropReason::NotReady)));
    assert!(page.results(DESKTOP_RESULTS).is_empty());
    assert!(!page.has_class(DESKTOP_RESULTS, "active"));

    // The dropped query is not replayed once the index arrives.
    assert!(session.finish_load(pending.load.unwrap(), Ok(site_json())));
    assert!(page.results(DESKTOP_RESULTS).is_empty());
}

#[tokio::test]
async fn test_failed_load_keeps_search_silent() {
    let mut page = MemoryPage::new();
    let mut session = session();

    let dispatch = session.handle(&mut page, PageEvent::Focus { pair: PairId::Desktop });
    session
        .complete_load(dispatch.load.unwrap(), &FailingSource::offline())
        .await;
    assert!(!session.client().is_ready());

    let dispatch = session.handle(&mut page, input(PairId::Desktop, "abc"));
    assert!(dispatch.outcome.unwrap().results().is_empty());
    assert!(page.results(DESKTOP_RESULTS).is_empty());
    assert!(page.alerts().is_empty());

    // Failed is terminal: focusing again does not refetch.
    let again = session.handle(&mut page, PageEvent::Focus { pair: PairId::Desktop });
    assert!(again.load.is_none());
}

#[test]
fn test_pairs_are_independent() {
    let mut page = MemoryPage::new();
    let mut session = loaded_session(&mut page);

    let _ = session.handle(&mut page, input(PairId::Mobile, "deploy"));
    assert_eq!(rendered_titles(&page, MOBILE_RESULTS), vec!["Deploy"]);
    assert!(page.results(DESKTOP_RESULTS).is_empty());
    assert_eq!(
        session.controller().state(PairId::Mobile),
        Some(PairState::ResultsVisible)
    );
    assert_eq!(
        session.controller().state(PairId::Desktop),
        Some(PairState::Activated)
    );
}

// ============================================================================
// DISMISSAL
// ============================================================================

#[test]
fn test_click_outside_hides_results() {
    let mut page = MemoryPage::new();
    let mut session = loaded_session(&mut page);
    let _ = session.handle(&mut page, input(PairId::Desktop, "install"));
    assert!(page.has_class(DESKTOP_RESULTS, "active"));

    let _ = session.handle(&mut page, click(&["article", "main"]));
    assert!(!page.has_class(DESKTOP_RESULTS, "active"));
    assert_eq!(session.controller().state(PairId::Desktop), Some(PairState::Idle));
}

#[test]
fn test_click_inside_results_keeps_them() {
    let mut page = MemoryPage::new();
    let mut session = loaded_session(&mut page);
    let _ = session.handle(&mut page, input(PairId::Desktop, "install"));

    let _ = session.handle(&mut page, click(&["result-link", DESKTOP_RESULTS, "header"]));
    assert!(page.has_class(DESKTOP_RESULTS, "active"));

    let _ = session.handle(&mut page, click(&[DESKTOP_INPUT, "header"]));
    assert!(page.has_class(DESKTOP_RESULTS, "active"));
    assert_eq!(
        session.controller().state(PairId::Desktop),
        Some(PairState::ResultsVisible)
    );
}

#[test]
fn test_click_outside_keeps_content_for_refocus() {
    let mut page = MemoryPage::new();
    let mut session = loaded_session(&mut page);
    let _ = session.handle(&mut page, input(PairId::Desktop, "deploy"));

    let _ = session.handle(&mut page, click(&["footer"]));
    assert_eq!(rendered_titles(&page, DESKTOP_RESULTS), vec!["Deploy"]);
}

#[test]
fn test_backdrop_click_drops_focus_mode() {
    let mut page = MemoryPage::new();
    let mut session = loaded_session(&mut page);
    assert!(page.body_has_class("search-focused"));

    let _ = session.handle(&mut page, click(&["search-backdrop"]));
    assert!(!page.body_has_class("search-focused"));
}

#[test]
fn test_escape_dismisses_desktop_search() {
    let mut page = MemoryPage::new();
    let mut session = loaded_session(&mut page);
    let _ = session.handle(&mut page, input(PairId::Desktop, "install"));

    let dispatch = session.handle(&mut page, PageEvent::KeyDown(KeyPress::new("Escape")));
    assert!(!dispatch.prevent_default);
    assert!(!page.body_has_class("search-focused"));
    assert!(page.was_blurred(DESKTOP_INPUT));
    assert!(!page.has_class(DESKTOP_RESULTS, "active"));
}

// ============================================================================
// SHORTCUT
// ============================================================================

#[test]
fn test_shortcut_focuses_desktop_box() {
    let mut page = MemoryPage::new();
    let mut session = session();

    let dispatch = session.handle(&mut page, PageEvent::KeyDown(KeyPress::new("k").with_meta()));
    assert!(dispatch.prevent_default);
    assert_eq!(page.focused(), Some(DESKTOP_INPUT));
}

#[test]
fn test_shortcut_prefers_mobile_box_while_menu_open() {
    let mut page = MemoryPage::new();
    let mut session = session();
    let _ = session.handle(&mut page, PageEvent::MobileMenuToggle);

    let dispatch = session.handle(&mut page, PageEvent::KeyDown(KeyPress::new("k").with_ctrl()));
    assert!(dispatch.prevent_default);
    assert_eq!(page.focused(), Some(MOBILE_INPUT));
}

#[test]
fn test_plain_k_is_ignored() {
    let mut page = MemoryPage::new();
    let mut session = session();

    let dispatch = session.handle(&mut page, PageEvent::KeyDown(KeyPress::new("k")));
    assert!(!dispatch.prevent_default);
    assert_eq!(page.focused(), None);
}

#[test]
fn test_shift_shortcut_is_left_to_the_browser() {
    let mut page = MemoryPage::new();
    let mut session = session();

    let dispatch = session.handle(&mut page, PageEvent::KeyDown(KeyPress::new("K").with_meta()));
    assert!(!dispatch.prevent_default);
    assert_eq!(page.focused(), None);
}

#[test]
fn test_escape_without_backdrop_leaves_search_alone() {
    let mut page = MemoryPage::new();
    let mut session = session_with(SiteConfig::minimal(), MemoryStorage::new());
    let dispatch = session.handle(&mut page, PageEvent::Focus { pair: PairId::Desktop });
    assert!(session.finish_load(dispatch.load.unwrap(), Ok(site_json())));
    let _ = session.handle(&mut page, input(PairId::Desktop, "deploy"));

    let _ = session.handle(&mut page, PageEvent::KeyDown(KeyPress::new("Escape")));
    assert!(!page.was_blurred("search-input"));
    assert!(!page.has_class("search-results", "hidden"));
    assert_eq!(rendered_titles(&page, "search-results"), vec!["Deploy"]);
}

#[test]
fn test_events_from_host_json() {
    let mut page = MemoryPage::new();
    let mut session = loaded_session(&mut page);

    let events = [
        r#"{"type":"input","pair":"desktop","value":"install"}"#,
        r#"{"type":"click","path":["main"]}"#,
        r#"{"type":"keyDown","key":"k","ctrlKey":true}"#,
    ];
    for raw in events {
        let event: PageEvent = serde_json::from_str(raw).unwrap();
        let _ = session.handle(&mut page, event);
    }

    assert!(!page.has_class(DESKTOP_RESULTS, "active"));
    assert_eq!(page.focused(), Some(DESKTOP_INPUT));
}
