//! Table of contents scrolling and scroll-spy.

use super::common::*;
use sitekit::{PageEvent, SiteConfig, Target};

fn link(id: &str) -> Target {
    Target::within("TableOfContents", format!("a[href=\"#{id}\"]"))
}

#[test]
fn test_link_click_scrolls_below_header_and_updates_hash() {
    let mut page = MemoryPage::new();
    let mut session = session();

    let dispatch = session.handle(
        &mut page,
        PageEvent::TocLink {
            target_id: "configuration".into(),
            element_top: Some(300.0),
            scroll_y: 1000.0,
        },
    );
    assert!(dispatch.prevent_default);
    assert_eq!(page.scrolls(), &[1220.0]);
    assert_eq!(page.history(), &["#configuration".to_string()]);
}

#[test]
fn test_link_to_missing_heading_does_nothing() {
    let mut page = MemoryPage::new();
    let mut session = session();

    let _ = session.handle(
        &mut page,
        PageEvent::TocLink {
            target_id: "gone".into(),
            element_top: None,
            scroll_y: 0.0,
        },
    );
    assert!(page.scrolls().is_empty());
    assert!(page.history().is_empty());
}

#[test]
fn test_header_offset_is_configurable() {
    let mut config = SiteConfig::default();
    config.toc.header_offset = 64.0;
    let mut page = MemoryPage::new();
    let mut session = session_with(config, sitekit::MemoryStorage::new());

    let _ = session.handle(
        &mut page,
        PageEvent::TocLink {
            target_id: "intro".into(),
            element_top: Some(100.0),
            scroll_y: 0.0,
        },
    );
    assert_eq!(page.scrolls(), &[36.0]);
}

#[test]
fn test_visible_heading_becomes_the_only_active_link() {
    let mut page = MemoryPage::new();
    let mut session = session();

    let _ = session.handle(&mut page, PageEvent::HeadingVisible { id: "install".into() });
    assert!(page.has_class_on(&link("install"), "active"));
    assert_eq!(session.toc().active(), Some("install"));

    let _ = session.handle(&mut page, PageEvent::HeadingVisible { id: "deploy".into() });
    assert!(page.has_class_on(&link("deploy"), "active"));
    assert!(!page.has_class_on(&Target::all("#TableOfContents a"), "active"));
    assert_eq!(session.toc().active(), Some("deploy"));
}
