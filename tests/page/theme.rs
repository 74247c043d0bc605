//! Theme toggle persistence and icon sync.

use super::common::*;
use sitekit::page::theme::Theme;
use sitekit::{MemoryStorage, PageEvent, SiteConfig, Storage, StorageScope, Target};

const KEY: &str = "hugo-theme-mode";

fn moon_hidden(page: &MemoryPage) -> bool {
    page.has_class_on(&Target::all(".theme-icon-moon"), "hidden")
}

fn sun_hidden(page: &MemoryPage) -> bool {
    page.has_class_on(&Target::all(".theme-icon-sun"), "hidden")
}

#[test]
fn test_defaults_to_dark() {
    let mut page = MemoryPage::new();
    let mut session = session();
    let _ = session.handle(&mut page, PageEvent::Ready { banner_key: None });

    assert_eq!(session.theme().preference(), Theme::Dark);
    assert!(session.theme().is_dark());
    assert!(!moon_hidden(&page));
    assert!(sun_hidden(&page));
}

#[test]
fn test_toggle_persists_and_swaps_icons() {
    let mut page = MemoryPage::new();
    let mut session = session();
    let _ = session.handle(&mut page, PageEvent::Ready { banner_key: None });

    let _ = session.handle(&mut page, PageEvent::ThemeToggle);
    assert_eq!(session.storage().get(StorageScope::Local, KEY).as_deref(), Some("light"));
    assert!(!page.root_has_class("dark"));
    assert!(moon_hidden(&page));
    assert!(!sun_hidden(&page));

    let _ = session.handle(&mut page, PageEvent::ThemeToggle);
    assert_eq!(session.storage().get(StorageScope::Local, KEY).as_deref(), Some("dark"));
    assert!(page.root_has_class("dark"));
    assert!(!moon_hidden(&page));
}

#[test]
fn test_stored_preference_is_restored() {
    let storage = MemoryStorage::new().with(StorageScope::Local, KEY, "light");
    let mut page = MemoryPage::new();
    let mut session = session_with(SiteConfig::default(), storage);
    let _ = session.handle(&mut page, PageEvent::Ready { banner_key: None });

    assert_eq!(session.theme().preference(), Theme::Light);
    assert!(moon_hidden(&page));

    let _ = session.handle(&mut page, PageEvent::ThemeToggle);
    assert_eq!(session.theme().preference(), Theme::Dark);
}

#[test]
fn test_system_preference_follows_os() {
    let storage = MemoryStorage::new().with(StorageScope::Local, KEY, "system");
    let mut page = MemoryPage::new();
    let mut session = session_with(SiteConfig::default(), storage);

    let _ = session.handle(&mut page, PageEvent::SystemTheme { dark: false });
    assert!(!session.theme().is_dark());
    assert!(!page.root_has_class("dark"));

    let _ = session.handle(&mut page, PageEvent::SystemTheme { dark: true });
    assert!(page.root_has_class("dark"));
}

#[test]
fn test_explicit_choice_ignores_os_changes() {
    let mut page = MemoryPage::new();
    let mut session = session();
    let _ = session.handle(&mut page, PageEvent::ThemeToggle);

    let _ = session.handle(&mut page, PageEvent::SystemTheme { dark: true });
    assert_eq!(session.theme().preference(), Theme::Light);
    assert!(!page.root_has_class("dark"));
}
