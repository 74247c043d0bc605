// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A [`Page`] that records mutations for a host to replay.
//!
//! The WASM bindings hand the drained log to JavaScript as an array of
//! `{ op, ... }` objects; the glue applies them in order. Result lists are
//! rendered to escaped markup here, so the host only ever assigns
//! `innerHTML` from strings this crate produced.

use super::{Page, ResultNode, Target};
use crate::search::render::render_html;
use serde::Serialize;

/// One recorded DOM mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DomCommand {
    SetClass { target: Target, class: String, on: bool },
    SetAttribute { target: Target, name: String, value: String },
    SetStyle { target: Target, property: String, value: String },
    SetText { target: Target, text: String },
    SetHtml { target: Target, html: String },
    SetDisabled { target: Target, disabled: bool },
    Remove { target: Target },
    Focus { id: String },
    Blur { id: String },
    Alert { message: String },
    ScrollTo { top: f64 },
    PushHistory { fragment: String },
}

/// Records every call as a [`DomCommand`].
#[derive(Debug, Clone, Default)]
pub struct CommandPage {
    log: Vec<DomCommand>,
}

impl CommandPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DomCommand] {
        &self.log
    }

    /// Take the log, leaving the page empty for the next event.
    pub fn drain(&mut self) -> Vec<DomCommand> {
        std::mem::take(&mut self.log)
    }
}

impl Page for CommandPage {
    fn set_class(&mut self, target: &Target, class: &str, on: bool) {
        self.log.push(DomCommand::SetClass {
            target: target.clone(),
            class: class.to_string(),
            on,
        });
    }

    fn set_attribute(&mut self, target: &Target, name: &str, value: &str) {
        self.log.push(DomCommand::SetAttribute {
            target: target.clone(),
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    fn set_style(&mut self, target: &Target, property: &str, value: &str) {
        self.log.push(DomCommand::SetStyle {
            target: target.clone(),
            property: property.to_string(),
            value: value.to_string(),
        });
    }

    fn set_text(&mut self, target: &Target, text: &str) {
        self.log.push(DomCommand::SetText {
            target: target.clone(),
            text: text.to_string(),
        });
    }

    fn set_html(&mut self, target: &Target, html: &str) {
        self.log.push(DomCommand::SetHtml {
            target: target.clone(),
            html: html.to_string(),
        });
    }

    fn set_disabled(&mut self, target: &Target, disabled: bool) {
        self.log.push(DomCommand::SetDisabled {
            target: target.clone(),
            disabled,
        });
    }

    fn remove(&mut self, target: &Target) {
        self.log.push(DomCommand::Remove {
            target: target.clone(),
        });
    }

    fn focus(&mut self, id: &str) {
        self.log.push(DomCommand::Focus { id: id.to_string() });
    }

    fn blur(&mut self, id: &str) {
        self.log.push(DomCommand::Blur { id: id.to_string() });
    }

    fn alert(&mut self, message: &str) {
        self.log.push(DomCommand::Alert {
            message: message.to_string(),
        });
    }

    fn scroll_to(&mut self, top: f64) {
        self.log.push(DomCommand::ScrollTo { top });
    }

    fn push_history(&mut self, fragment: &str) {
        self.log.push(DomCommand::PushHistory {
            fragment: fragment.to_string(),
        });
    }

    fn replace_results(&mut self, container_id: &str, nodes: &[ResultNode]) {
        self.log.push(DomCommand::SetHtml {
            target: Target::id(container_id),
            html: render_html(nodes),
        });
    }
}
