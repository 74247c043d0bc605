// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search box activation: lazy load, keyboard shortcut, dismissal.
//!
//! Each input/results pair runs its own small state machine. Desktop and
//! mobile boxes can both exist on a page, so dismissal is decided per pair:
//!
//! ```text
//!            focus/touch               input ≥ min && ready
//!   Idle ─────────────────▶ Activated ─────────────────────▶ ResultsVisible
//!    ▲                          ▲ ◀──── input < min / not ready ────┘ │
//!    └──── click outside / Escape ─────────────────────────────────────┘
//! ```
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. Activation never blocks: it only claims the load ticket. The host
//!    completes the fetch and calls `finish_load` later.
//! 2. Outside clicks hide results but never touch the body focus class;
//!    only Escape and backdrop clicks clear it.

use crate::config::{PairId, SearchPair, SiteConfig, VisibilityToggle};
use crate::index::TextIndex;
use crate::page::{Page, Target};
use crate::search::client::{DocumentIndexClient, LoadTicket};
use crate::search::dispatch::{QueryDispatcher, QueryOutcome};
use crate::search::render::{PageSurface, ResultRenderer};
use serde::{Deserialize, Serialize};

/// Per-pair activation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PairState {
    #[default]
    Idle,
    Activated,
    ResultsVisible,
}

/// How an input was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Focus,
    Touch,
}

/// A keydown as the host saw it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyPress {
    pub key: String,
    pub meta_key: bool,
    pub ctrl_key: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta_key = true;
        self
    }

    /// Cmd+K / Ctrl+K.
    pub fn is_search_shortcut(&self) -> bool {
        (self.meta_key || self.ctrl_key) && self.key == "k"
    }

    pub fn is_escape(&self) -> bool {
        self.key == "Escape"
    }
}

#[derive(Debug)]
struct PairSlot {
    pair: SearchPair,
    state: PairState,
}

/// Wires page events on the search boxes to the index client.
#[derive(Debug)]
pub struct ActivationController {
    slots: Vec<PairSlot>,
    dispatcher: QueryDispatcher,
    visibility: VisibilityToggle,
    clear_on_hide: bool,
    backdrop_id: Option<String>,
    focus_class: String,
}

impl ActivationController {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            slots: config
                .pairs
                .iter()
                .map(|pair| PairSlot {
                    pair: pair.clone(),
                    state: PairState::Idle,
                })
                .collect(),
            dispatcher: QueryDispatcher::new(&config.search),
            visibility: config.search.visibility.clone(),
            clear_on_hide: config.search.clear_on_hide,
            backdrop_id: config.backdrop_id.clone(),
            focus_class: config.focus_class.clone(),
        }
    }

    pub fn state(&self, pair: PairId) -> Option<PairState> {
        self.slot(pair).map(|slot| slot.state)
    }

    pub fn dispatcher(&self) -> &QueryDispatcher {
        &self.dispatcher
    }

    fn slot(&self, pair: PairId) -> Option<&PairSlot> {
        self.slots.iter().find(|slot| slot.pair.pair == pair)
    }

    fn slot_mut(&mut self, pair: PairId) -> Option<&mut PairSlot> {
        self.slots.iter_mut().find(|slot| slot.pair.pair == pair)
    }

    /// Focus or touch on a bound input.
    ///
    /// Returns the load ticket the first time any input is activated; the
    /// caller owes the client a `finish_load` for it.
    pub fn on_activate<I: TextIndex, P: Page + ?Sized>(
        &mut self,
        client: &DocumentIndexClient<I>,
        page: &mut P,
        pair: PairId,
        how: Activation,
    ) -> Option<LoadTicket> {
        let slot = self.slot_mut(pair)?;
        if slot.state == PairState::Idle {
            slot.state = PairState::Activated;
        }

        if pair == PairId::Desktop && how == Activation::Focus && self.backdrop_id.is_some() {
            page.set_class(&Target::Body, &self.focus_class, true);
        }

        client.begin_load()
    }

    /// Input on a bound search box.
    pub fn on_input<I: TextIndex, P: Page + ?Sized>(
        &mut self,
        client: &DocumentIndexClient<I>,
        page: &mut P,
        pair: PairId,
        raw: &str,
    ) -> Option<QueryOutcome> {
        let outcome = self.dispatcher.on_input(client, raw);
        let clear = self.clear_on_hide;
        let slot = self.slots.iter_mut().find(|slot| slot.pair.pair == pair)?;
        let mut surface = PageSurface::new(page, &slot.pair.results_id, &self.visibility);

        match &outcome {
            QueryOutcome::Results(results) => {
                ResultRenderer::render(results, &mut surface);
                slot.state = PairState::ResultsVisible;
            }
            QueryOutcome::Dropped(_) => {
                ResultRenderer::hide(&mut surface, clear);
                slot.state = PairState::Activated;
            }
        }
        Some(outcome)
    }

    /// Global keydown. Returns `true` if the host should prevent the
    /// browser's default action.
    pub fn on_key<P: Page + ?Sized>(&mut self, page: &mut P, key: &KeyPress, mobile_nav_open: bool) -> bool {
        if key.is_search_shortcut() {
            let wanted = if mobile_nav_open {
                PairId::Mobile
            } else {
                PairId::Desktop
            };
            if let Some(slot) = self.slot(wanted) {
                page.focus(&slot.pair.input_id);
            }
            return true;
        }

        if key.is_escape() {
            self.on_escape(page);
        }
        false
    }

    /// Escape: drop the focus state, blur the desktop input, hide its results.
    /// Only pages with a backdrop react; the legacy box ignores Escape.
    pub fn on_escape<P: Page + ?Sized>(&mut self, page: &mut P) {
        if self.backdrop_id.is_none() {
            return;
        }
        page.set_class(&Target::Body, &self.focus_class, false);
        let visibility = &self.visibility;
        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.pair.pair == PairId::Desktop) {
            page.blur(&slot.pair.input_id);
            ResultRenderer::hide(&mut PageSurface::new(page, &slot.pair.results_id, visibility), false);
            slot.state = PairState::Idle;
        }
    }

    /// Document click. `path` holds the ids of the clicked element and its
    /// ancestors, innermost first.
    pub fn on_click<P: Page + ?Sized>(&mut self, page: &mut P, path: &[String]) {
        let inside = |id: &str| path.iter().any(|p| p == id);

        if let Some(backdrop) = &self.backdrop_id {
            if inside(backdrop) {
                page.set_class(&Target::Body, &self.focus_class, false);
            }
        }

        let visibility = &self.visibility;
        for slot in &mut self.slots {
            if inside(&slot.pair.input_id) || inside(&slot.pair.results_id) {
                continue;
            }
            ResultRenderer::hide(&mut PageSurface::new(page, &slot.pair.results_id, visibility), false);
            slot.state = PairState::Idle;
        }
    }
}
