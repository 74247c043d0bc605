// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The DOM, as far as the page scripts are concerned.
//!
//! Components never touch a real document. They talk to a [`Page`]: a small
//! set of mutations (toggle a class, set an attribute, move focus) addressed
//! by [`Target`]. In the browser the page is a [`CommandPage`] whose log is
//! shipped to the JS glue and replayed against `document`; in tests it is
//! `testing::MemoryPage`, which simulates just enough DOM state to assert on.
//!
//! Feature modules:
//!
//! | Module       | Behaviour                                        |
//! |--------------|--------------------------------------------------|
//! | `theme`      | Dark/light toggle, persisted preference          |
//! | `nav`        | Mobile overlay and sidebar accordion             |
//! | `banner`     | Per-session dismissible announcement             |
//! | `newsletter` | Email capture form, one-time subscription        |
//! | `toc`        | Table-of-contents scroll-spy and smooth scroll   |
//! | `panel`      | Ask-AI side panel                                |

pub mod banner;
mod command;
pub mod nav;
pub mod newsletter;
pub mod panel;
mod storage;
pub mod theme;
pub mod toc;

pub use command::{CommandPage, DomCommand};
pub use storage::{MemoryStorage, Storage, StorageScope};

use serde::{Deserialize, Serialize};

/// Which element(s) a mutation applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Target {
    /// `document.documentElement`
    Root,
    /// `document.body`
    Body,
    /// `document.getElementById(id)`
    Id(String),
    /// Every match of `document.querySelectorAll(selector)`
    All(String),
    /// First match of `selector` inside the element with id `root`.
    Within { root: String, selector: String },
}

impl Target {
    pub fn id(id: impl Into<String>) -> Self {
        Target::Id(id.into())
    }

    pub fn all(selector: impl Into<String>) -> Self {
        Target::All(selector.into())
    }

    pub fn within(root: impl Into<String>, selector: impl Into<String>) -> Self {
        Target::Within {
            root: root.into(),
            selector: selector.into(),
        }
    }
}

/// One node of a rendered results list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ResultNode {
    /// A clickable result.
    Entry {
        href: String,
        section: String,
        title: String,
    },
    /// An informational line such as the empty-state message.
    Message { text: String },
}

/// DOM mutations available to page components.
///
/// Implementations must apply calls in order; components rely on
/// "clear, then fill, then show" sequencing.
pub trait Page {
    fn set_class(&mut self, target: &Target, class: &str, on: bool);

    fn set_attribute(&mut self, target: &Target, name: &str, value: &str);

    /// Set an inline style property; an empty value removes it.
    fn set_style(&mut self, target: &Target, property: &str, value: &str);

    fn set_text(&mut self, target: &Target, text: &str);

    /// Replace the element's children with trusted markup.
    fn set_html(&mut self, target: &Target, html: &str);

    fn set_disabled(&mut self, target: &Target, disabled: bool);

    fn remove(&mut self, target: &Target);

    fn focus(&mut self, id: &str);

    fn blur(&mut self, id: &str);

    /// Blocking `window.alert`.
    fn alert(&mut self, message: &str);

    fn scroll_to(&mut self, top: f64);

    /// `history.pushState` with a fragment such as `#install`.
    fn push_history(&mut self, fragment: &str);

    /// Replace a results container's children with rendered nodes.
    fn replace_results(&mut self, container_id: &str, nodes: &[ResultNode]);
}
