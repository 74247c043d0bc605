//! Per-session banner dismissal.

use super::common::*;
use sitekit::{MemoryStorage, PageEvent, SiteConfig, Storage, StorageScope};

#[test]
fn test_close_hides_and_remembers_for_the_session() {
    let mut page = MemoryPage::new();
    let mut session = session();
    let _ = session.handle(
        &mut page,
        PageEvent::Ready {
            banner_key: Some("v2-launch".into()),
        },
    );
    assert!(!page.has_class("site-banner", "banner-hidden"));

    let _ = session.handle(&mut page, PageEvent::BannerClose);
    assert!(page.has_class("site-banner", "banner-hidden"));
    assert_eq!(
        session
            .storage()
            .get(StorageScope::Session, "hugo-banner-closed-v2-launch")
            .as_deref(),
        Some("true")
    );
}

#[test]
fn test_dismissed_banner_starts_hidden() {
    let storage = MemoryStorage::new().with(StorageScope::Session, "hugo-banner-closed-global", "true");
    let mut page = MemoryPage::new();
    let mut session = session_with(SiteConfig::default(), storage);

    let _ = session.handle(&mut page, PageEvent::Ready { banner_key: None });
    assert!(session.banner().is_hidden());
    assert!(page.has_class("site-banner", "banner-hidden"));
}

#[test]
fn test_new_key_shows_banner_again() {
    let storage = MemoryStorage::new().with(StorageScope::Session, "hugo-banner-closed-old", "true");
    let mut page = MemoryPage::new();
    let mut session = session_with(SiteConfig::default(), storage);

    let _ = session.handle(
        &mut page,
        PageEvent::Ready {
            banner_key: Some("new".into()),
        },
    );
    assert!(!session.banner().is_hidden());
    assert!(!page.has_class("site-banner", "banner-hidden"));
}

#[test]
fn test_local_storage_does_not_hide_banner() {
    let storage = MemoryStorage::new().with(StorageScope::Local, "hugo-banner-closed-global", "true");
    let mut page = MemoryPage::new();
    let mut session = session_with(SiteConfig::default(), storage);

    let _ = session.handle(&mut page, PageEvent::Ready { banner_key: None });
    assert!(!session.banner().is_hidden());
}
