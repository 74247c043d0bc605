// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Table of contents: offset smooth scroll and scroll-spy.
//!
//! The host observes `.prose h2..h4` with an intersection observer and
//! reports each heading that enters view; the matching TOC link becomes the
//! only active one.

use super::{Page, Target};
use crate::config::TocConfig;

#[derive(Debug, Clone)]
pub struct TocSpy {
    config: TocConfig,
    active: Option<String>,
}

impl TocSpy {
    pub fn new(config: &TocConfig) -> Self {
        Self {
            config: config.clone(),
            active: None,
        }
    }

    /// Id of the heading whose link is highlighted.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Document offset to scroll to so the heading clears the fixed header.
    pub fn scroll_target(&self, element_top: f64, scroll_y: f64) -> f64 {
        element_top + scroll_y - self.config.header_offset
    }

    /// A TOC link was clicked. `element_top` is the heading's viewport
    /// offset, or `None` if no element has that id.
    pub fn link_clicked<P: Page + ?Sized>(
        &self,
        page: &mut P,
        target_id: &str,
        element_top: Option<f64>,
        scroll_y: f64,
    ) -> bool {
        let Some(top) = element_top else {
            return false;
        };
        page.scroll_to(self.scroll_target(top, scroll_y));
        page.push_history(&format!("#{target_id}"));
        true
    }

    /// A heading entered the observed band.
    pub fn heading_visible<P: Page + ?Sized>(&mut self, page: &mut P, heading_id: &str) {
        let links = Target::all(format!("#{} a", self.config.container_id));
        page.set_class(&links, &self.config.active_class, false);

        let selector = format!("a[href=\"#{}\"]", heading_id.replace('"', "\\\""));
        page.set_class(
            &Target::within(&self.config.container_id, selector),
            &self.config.active_class,
            true,
        );
        self.active = Some(heading_id.to_string());
    }
}
