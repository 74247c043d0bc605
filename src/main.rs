// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{bail, Context, Result};
use clap::Parser;
use sitekit::search::render::{result_nodes, DEFAULT_SECTION};
use sitekit::{
    render_html, DocumentIndexClient, DocumentSource, DropReason, FileSource, QueryDispatcher, QueryOutcome,
    SearchProfile, SiteConfig, SourceDocument,
};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

mod cli;
use cli::display::*;
use cli::{Cli, Commands, ProfileArg};

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Search {
            index,
            query,
            limit,
            profile,
            config,
            html,
        } => run_search(&index, &query, limit, profile, config.as_deref(), html),
        Commands::Inspect { index, config } => run_inspect(&index, config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SITEKIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// An `index.json` fetched and built the way the browser does it.
struct LoadedSite {
    config: SiteConfig,
    client: DocumentIndexClient,
    raw: Vec<u8>,
    elapsed: Duration,
}

impl LoadedSite {
    /// The document list as served, duplicates included. Only read once the
    /// client accepted the same body.
    fn documents(&self) -> Result<Vec<SourceDocument>> {
        serde_json::from_slice(&self.raw).with_context(|| format!("parsing {}", self.client.path()))
    }
}

fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
    let Some(path) = path else {
        return Ok(SiteConfig::default());
    };
    let source = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    SiteConfig::from_toml_str(&source).with_context(|| format!("invalid config {}", path.display()))
}

/// A file argument serves its own name from its directory; a directory
/// argument serves the configured index path.
fn site_root(index: &Path, config: &mut SiteConfig) -> Result<PathBuf> {
    if index.is_dir() {
        return Ok(index.to_path_buf());
    }
    let name = index
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("not a file or directory: {}", index.display()))?;
    config.index_path = format!("/{name}");
    Ok(index
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf))
}

fn load_site(index: &Path, mut config: SiteConfig) -> Result<LoadedSite> {
    let source = FileSource::new(site_root(index, &mut config)?);
    let client: DocumentIndexClient = DocumentIndexClient::from_config(&config);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting runtime")?;

    let start = Instant::now();
    let Some(ticket) = client.begin_load() else {
        bail!("index load already claimed");
    };
    let body = runtime.block_on(source.fetch(client.path()));
    let raw = body.as_ref().map(Vec::clone).unwrap_or_default();
    let ready = client.finish_load(ticket, body);
    let elapsed = start.elapsed();

    if !ready {
        let reason = client
            .last_error()
            .map_or_else(|| "unknown error".to_string(), |e| e.to_string());
        bail!("failed to load {}: {}", client.path(), reason);
    }

    Ok(LoadedSite {
        config,
        client,
        raw,
        elapsed,
    })
}

fn run_search(
    index: &Path,
    query: &str,
    limit: Option<usize>,
    profile: Option<ProfileArg>,
    config: Option<&Path>,
    html: bool,
) -> Result<()> {
    let mut config = load_config(config)?;
    if profile == Some(ProfileArg::Minimal) {
        config.search = SearchProfile::minimal();
    }
    if let Some(limit) = limit {
        if limit == 0 {
            bail!("--limit must be at least 1");
        }
        config.search.result_limit = limit;
    }

    let site = load_site(index, config)?;
    let dispatcher = QueryDispatcher::new(&site.config.search);
    let outcome = dispatcher.on_input(&site.client, query);

    if html {
        println!("{}", render_html(&result_nodes(outcome.results())));
        return Ok(());
    }

    section_top("SEARCH");
    row(&format!("  query    {}", themed(YELLOW, &[BOLD], query)));
    row(&format!(
        "  index    {} ({} docs, {})",
        site.client.path(),
        site.client.document_count().unwrap_or(0),
        timing_ms(site.elapsed.as_secs_f64() * 1000.0)
    ));
    section_mid("RESULTS");
    match &outcome {
        QueryOutcome::Dropped(DropReason::TooShort) => row(&format!(
            "  {}",
            themed(GRAY, &[], &format!("query shorter than {} characters", site.config.search.min_query_len))
        )),
        QueryOutcome::Dropped(DropReason::NotReady) => row("  index not ready"),
        QueryOutcome::Results(results) if results.is_empty() => {
            row(&format!("  {}", themed(GRAY, &[], "No results found")));
        }
        QueryOutcome::Results(results) => {
            for (rank, result) in results.iter().enumerate() {
                let section = result.section.as_deref().unwrap_or(DEFAULT_SECTION);
                let title = pad_right(&truncate(&result.title, 34), 34);
                row(&format!(
                    "  {:>2}. {} {} {}",
                    rank + 1,
                    title,
                    section_badge(section),
                    themed(GRAY, &[], &truncate(&result.url, 22))
                ));
            }
        }
    }
    section_bot();
    Ok(())
}

fn run_inspect(index: &Path, config: Option<&Path>) -> Result<()> {
    let site = load_site(index, load_config(config)?)?;
    let documents = site.documents()?;

    let mut sections: BTreeMap<&str, usize> = BTreeMap::new();
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for doc in &documents {
        *sections.entry(doc.section.as_deref().unwrap_or(DEFAULT_SECTION)).or_default() += 1;
        if !seen.insert(&doc.id) {
            duplicates.push(doc.id.to_string());
        }
    }

    section_top("INDEX");
    row(&format!("  path       {}", site.client.path()));
    row(&format!("  state      {}", state_label(site.client.state())));
    row(&format!("  size       {}", format_size(site.raw.len())));
    row(&format!("  documents  {}", documents.len()));
    row(&format!("  indexed    {}", site.client.document_count().unwrap_or(0)));
    if let Some(index) = site.client.index() {
        row(&format!("  terms      {}", index.term_count()));
    }
    row(&format!("  load       {}", timing_ms(site.elapsed.as_secs_f64() * 1000.0)));

    section_mid("SECTIONS");
    for (section, count) in &sections {
        row(&format!("  {} {}", pad_right(&section_badge(section), 28), count));
    }

    if !duplicates.is_empty() {
        section_mid("DUPLICATE IDS");
        row(&format!(
            "  {}",
            themed(RED, &[], &truncate(&duplicates.join(", "), BOX_WIDTH - 4))
        ));
    }
    section_bot();
    Ok(())
}
