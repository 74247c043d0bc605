// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Mobile navigation overlay and the docs sidebar accordion.

use super::{Page, Target};
use crate::config::NavConfig;
use std::collections::HashSet;

/// The full-screen mobile menu. Its open class goes on both `<body>` and
/// `<html>` so scroll locking works in every browser.
#[derive(Debug, Clone)]
pub struct MobileNav {
    open_class: String,
    open: bool,
}

impl MobileNav {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            open_class: config.open_class.clone(),
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The hamburger button.
    pub fn toggle<P: Page + ?Sized>(&mut self, page: &mut P) -> bool {
        self.set(page, !self.open);
        self.open
    }

    /// A link inside the overlay was followed.
    pub fn close<P: Page + ?Sized>(&mut self, page: &mut P) {
        self.set(page, false);
    }

    fn set<P: Page + ?Sized>(&mut self, page: &mut P, open: bool) {
        self.open = open;
        page.set_class(&Target::Body, &self.open_class, open);
        page.set_class(&Target::Root, &self.open_class, open);
    }
}

/// Expand/collapse state of sidebar groups, keyed by toggle button id.
#[derive(Debug, Clone)]
pub struct SidebarAccordion {
    open_class: String,
    open: HashSet<String>,
}

impl SidebarAccordion {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            open_class: config.sidebar_open_class.clone(),
            open: HashSet::new(),
        }
    }

    pub fn is_open(&self, button_id: &str) -> bool {
        self.open.contains(button_id)
    }

    /// Flip a toggle button and, if the row has one, its nested group.
    pub fn toggle<P: Page + ?Sized>(&mut self, page: &mut P, button_id: &str, group_id: Option<&str>) -> bool {
        let open = if self.open.remove(button_id) {
            false
        } else {
            self.open.insert(button_id.to_string());
            true
        };

        page.set_class(&Target::id(button_id), &self.open_class, open);
        if let Some(group) = group_id {
            page.set_class(&Target::id(group), &self.open_class, open);
        }
        open
    }
}
