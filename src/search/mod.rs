// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search: from the first focus to painted results.
//!
//! | Module     | Role                                                  |
//! |------------|-------------------------------------------------------|
//! | `client`   | Load-once index lifecycle (`LoadState`, `LoadTicket`) |
//! | `dispatch` | Input policy, bounded query, dedup                    |
//! | `dedup`    | First-occurrence merge across per-field hit lists     |
//! | `render`   | Result nodes, empty state, escaped markup             |

pub mod client;
pub mod dedup;
pub mod dispatch;
pub mod render;

pub use client::{DocumentIndexClient, LoadState, LoadTicket};
pub use dedup::ResultMerger;
pub use dispatch::{DropReason, QueryDispatcher, QueryOutcome};
pub use render::{render_html, result_nodes, PageSurface, ResultRenderer, ResultsSurface};
