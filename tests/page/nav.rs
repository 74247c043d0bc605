//! Mobile menu and sidebar accordion.

use super::common::*;
use sitekit::PageEvent;

#[test]
fn test_menu_toggle_marks_body_and_root() {
    let mut page = MemoryPage::new();
    let mut session = session();

    let _ = session.handle(&mut page, PageEvent::MobileMenuToggle);
    assert!(session.nav().is_open());
    assert!(page.body_has_class("mobile-nav-open"));
    assert!(page.root_has_class("mobile-nav-open"));

    let _ = session.handle(&mut page, PageEvent::MobileMenuToggle);
    assert!(!session.nav().is_open());
    assert!(!page.body_has_class("mobile-nav-open"));
    assert!(!page.root_has_class("mobile-nav-open"));
}

#[test]
fn test_following_a_link_closes_the_menu() {
    let mut page = MemoryPage::new();
    let mut session = session();
    let _ = session.handle(&mut page, PageEvent::MobileMenuToggle);

    let _ = session.handle(&mut page, PageEvent::MobileNavLink);
    assert!(!session.nav().is_open());
    assert!(!page.body_has_class("mobile-nav-open"));
}

#[test]
fn test_sidebar_group_toggles_button_and_children() {
    let mut page = MemoryPage::new();
    let mut session = session();

    let dispatch = session.handle(
        &mut page,
        PageEvent::SidebarToggle {
            button_id: "toggle-guides".into(),
            group_id: Some("group-guides".into()),
        },
    );
    assert!(dispatch.prevent_default);
    assert!(session.sidebar().is_open("toggle-guides"));
    assert!(page.has_class("toggle-guides", "open"));
    assert!(page.has_class("group-guides", "open"));

    let _ = session.handle(
        &mut page,
        PageEvent::SidebarToggle {
            button_id: "toggle-guides".into(),
            group_id: Some("group-guides".into()),
        },
    );
    assert!(!page.has_class("toggle-guides", "open"));
    assert!(!page.has_class("group-guides", "open"));
}

#[test]
fn test_sidebar_groups_are_independent() {
    let mut page = MemoryPage::new();
    let mut session = session();

    for button in ["toggle-a", "toggle-b", "toggle-a"] {
        let _ = session.handle(
            &mut page,
            PageEvent::SidebarToggle {
                button_id: button.into(),
                group_id: None,
            },
        );
    }
    assert!(!session.sidebar().is_open("toggle-a"));
    assert!(session.sidebar().is_open("toggle-b"));
}
