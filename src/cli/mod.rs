// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the sitekit command-line interface.
//!
//! Two subcommands: `search` runs a query through the same client, dispatch
//! and dedup path the browser uses, and `inspect` summarizes a site's
//! `index.json`. Both accept either the JSON file itself or the site's
//! publish directory.

pub mod display;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sitekit",
    about = "Search and inspect a static docs site's index.json",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Search box generation to emulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    /// Desktop + mobile boxes, prefix matching, 10 results
    Full,
    /// Legacy single box, whole-word matching, 5 results
    Minimal,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Query an index.json and display deduplicated results
    Search {
        /// Path to index.json, or the site's publish directory
        index: PathBuf,

        /// Search query (typed as-is into the search box)
        query: String,

        /// Maximum number of results (defaults to the profile's limit)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Search profile
        #[arg(short, long, value_enum)]
        profile: Option<ProfileArg>,

        /// site.toml with overrides
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the results container markup instead of a table
        #[arg(long)]
        html: bool,
    },

    /// Summarize an index.json: documents, sections, duplicates, vocabulary
    Inspect {
        /// Path to index.json, or the site's publish directory
        index: PathBuf,

        /// site.toml with overrides
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
