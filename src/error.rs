// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy.
//!
//! Search degrades silently: every [`LoadError`] is caught inside the index
//! client, logged, and parked in `LoadState::Failed`. Nothing here is ever
//! shown to a visitor. Configuration errors are the opposite: they surface
//! at startup so a broken `site.toml` fails loudly.

use thiserror::Error;

/// Why building the search index failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The fetch itself rejected (offline, DNS, CORS, missing file).
    #[error("network failure fetching {path}: {reason}")]
    Network { path: String, reason: String },

    /// The server answered with a non-success status.
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    /// The body was not a JSON array of documents.
    #[error("failed to parse document list: {0}")]
    Parse(String),

    /// No usable indexing capability (e.g. a schema with nothing to index).
    #[error("search index unavailable: {0}")]
    IndexUnavailable(String),
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err.to_string())
    }
}

/// Why a newsletter form submission failed.
///
/// The request is sent without inspecting the response, so only a rejected
/// send counts as a failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("submission to {action} failed: {reason}")]
    Network { action: String, reason: String },

    #[error("form has no action")]
    MissingAction,
}

/// Invalid site configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
