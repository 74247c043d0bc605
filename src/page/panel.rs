// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Ask-AI side panel.
//!
//! Any number of trigger buttons share one panel and mirror its state.
//! Body scroll is locked only on narrow viewports; on desktop the page keeps
//! scrolling beside the panel.

use super::{Page, Target};
use crate::config::PanelConfig;

const OPEN_CLASS: &str = "is-open";
const ACTIVE_CLASS: &str = "is-active";
const EXPANDED_CLASS: &str = "is-expanded";

const COLLAPSE_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><polyline points="4 14 10 14 10 20"></polyline><polyline points="20 10 14 10 14 4"></polyline><line x1="14" y1="10" x2="21" y2="3"></line><line x1="3" y1="21" x2="10" y2="14"></line></svg>"#;
const EXPAND_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><polyline points="15 3 21 3 21 9"></polyline><polyline points="9 21 3 21 3 15"></polyline><line x1="21" y1="3" x2="14" y2="10"></line><line x1="3" y1="21" x2="10" y2="14"></line></svg>"#;

#[derive(Debug, Clone)]
pub struct AskAiPanel {
    config: PanelConfig,
    open: bool,
    expanded: bool,
}

impl AskAiPanel {
    pub fn new(config: &PanelConfig) -> Self {
        Self {
            config: config.clone(),
            open: false,
            expanded: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle<P: Page + ?Sized>(&mut self, page: &mut P, viewport_width: f64) {
        if self.open {
            self.close(page);
        } else {
            self.open(page, viewport_width);
        }
    }

    pub fn open<P: Page + ?Sized>(&mut self, page: &mut P, viewport_width: f64) {
        self.open = true;
        let panel = Target::id(&self.config.panel_id);
        page.set_class(&panel, OPEN_CLASS, true);
        page.set_attribute(&panel, "aria-hidden", "false");
        if viewport_width < self.config.scroll_lock_below {
            page.set_style(&Target::Body, "overflow", "hidden");
        }
        self.mark_triggers(page, true);
    }

    /// Close and always release the scroll lock, in case the viewport was
    /// resized while open.
    pub fn close<P: Page + ?Sized>(&mut self, page: &mut P) {
        self.open = false;
        let panel = Target::id(&self.config.panel_id);
        page.set_class(&panel, OPEN_CLASS, false);
        page.set_attribute(&panel, "aria-hidden", "true");
        page.set_style(&Target::Body, "overflow", "");
        self.mark_triggers(page, false);
    }

    /// Escape closes an open panel. Returns whether it did.
    pub fn on_escape<P: Page + ?Sized>(&mut self, page: &mut P) -> bool {
        if !self.open {
            return false;
        }
        self.close(page);
        true
    }

    pub fn toggle_expanded<P: Page + ?Sized>(&mut self, page: &mut P) -> bool {
        self.expanded = !self.expanded;
        page.set_class(&Target::id(&self.config.panel_id), EXPANDED_CLASS, self.expanded);

        let button = Target::id(&self.config.expand_button_id);
        let (title, icon) = if self.expanded {
            ("Collapse view", COLLAPSE_ICON)
        } else {
            ("Expand view", EXPAND_ICON)
        };
        page.set_attribute(&button, "title", title);
        page.set_html(&button, icon);
        self.expanded
    }

    fn mark_triggers<P: Page + ?Sized>(&self, page: &mut P, active: bool) {
        let triggers = Target::all(&self.config.trigger_selector);
        page.set_class(&triggers, ACTIVE_CLASS, active);
        page.set_attribute(&triggers, "aria-expanded", if active { "true" } else { "false" });
    }
}
