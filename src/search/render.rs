// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Painting results into a container.
//!
//! Rendering implies showing: every call to [`ResultRenderer::render`] ends
//! with the container visible, including the empty state, which is a single
//! "No results found" line rather than a blank box.
//!
//! Titles and section labels come straight out of `index.json`, i.e. out of
//! whatever authors typed into front matter. They are escaped on the way to
//! markup, and link targets with a script scheme are neutralized.

use crate::config::VisibilityToggle;
use crate::page::{Page, ResultNode, Target};
use crate::types::MatchResult;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Empty-state message.
pub const NO_RESULTS: &str = "No results found";

/// Section label for documents without one.
pub const DEFAULT_SECTION: &str = "Doc";

/// A results container.
pub trait ResultsSurface {
    /// Replace all children with `nodes`.
    fn replace(&mut self, nodes: &[ResultNode]);

    fn set_visible(&mut self, visible: bool);
}

/// A results container addressed through a [`Page`].
pub struct PageSurface<'a, P: Page + ?Sized> {
    page: &'a mut P,
    container_id: &'a str,
    visibility: &'a VisibilityToggle,
}

impl<'a, P: Page + ?Sized> PageSurface<'a, P> {
    pub fn new(page: &'a mut P, container_id: &'a str, visibility: &'a VisibilityToggle) -> Self {
        Self {
            page,
            container_id,
            visibility,
        }
    }
}

impl<P: Page + ?Sized> ResultsSurface for PageSurface<'_, P> {
    fn replace(&mut self, nodes: &[ResultNode]) {
        self.page.replace_results(self.container_id, nodes);
    }

    fn set_visible(&mut self, visible: bool) {
        self.page.set_class(
            &Target::id(self.container_id),
            &self.visibility.class,
            self.visibility.class_on(visible),
        );
    }
}

/// Turns match records into result nodes.
pub struct ResultRenderer;

impl ResultRenderer {
    /// Replace the container's content with `results` and show it.
    pub fn render<S: ResultsSurface + ?Sized>(results: &[MatchResult], surface: &mut S) {
        surface.replace(&result_nodes(results));
        surface.set_visible(true);
    }

    /// Hide the container, optionally dropping its content.
    pub fn hide<S: ResultsSurface + ?Sized>(surface: &mut S, clear: bool) {
        surface.set_visible(false);
        if clear {
            surface.replace(&[]);
        }
    }
}

/// One entry per result, or the single empty-state message.
pub fn result_nodes(results: &[MatchResult]) -> Vec<ResultNode> {
    if results.is_empty() {
        return vec![ResultNode::Message {
            text: NO_RESULTS.to_string(),
        }];
    }
    results
        .iter()
        .map(|result| ResultNode::Entry {
            href: result.url.clone(),
            section: result
                .section
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SECTION.to_string()),
            title: result.title.clone(),
        })
        .collect()
}

/// Schemes a result link may carry. Anything else renders as `#`.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Relative links and allowlisted schemes pass through; every other scheme
/// is replaced with `#`.
///
/// The scheme is read the way a browser's URL parser reads it: leading and
/// trailing C0 controls and spaces are ignored, and tabs and newlines are
/// dropped anywhere in the string.
fn safe_href(href: &str) -> &str {
    let cleaned: String = href
        .trim_matches(|c: char| c <= ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect();

    let scheme_end = cleaned.find(|c: char| matches!(c, ':' | '/' | '?' | '#'));
    match scheme_end {
        Some(end) if cleaned[end..].starts_with(':') => {
            let scheme = cleaned[..end].to_ascii_lowercase();
            if ALLOWED_SCHEMES.contains(&scheme.as_str()) {
                href
            } else {
                "#"
            }
        }
        _ => href,
    }
}

/// Escaped markup for a results container.
pub fn render_html(nodes: &[ResultNode]) -> String {
    let mut html = String::new();
    for node in nodes {
        match node {
            ResultNode::Entry {
                href,
                section,
                title,
            } => {
                html.push_str("<a href=\"");
                html.push_str(&encode_double_quoted_attribute(safe_href(href)));
                html.push_str("\" class=\"search-result-item\"><div class=\"search-item-section\">");
                html.push_str(&encode_text(section));
                html.push_str("</div><span class=\"search-item-title\">");
                html.push_str(&encode_text(title));
                html.push_str("</span></a>");
            }
            ResultNode::Message { text } => {
                html.push_str("<div class=\"search-no-results\">");
                html.push_str(&encode_text(text));
                html.push_str("</div>");
            }
        }
    }
    html
}
