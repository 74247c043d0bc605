// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Site configuration: paths, storage keys, and the DOM hooks the page
//! markup exposes.
//!
//! Every field has a default matching the shipped theme, so an empty
//! `site.toml` (or `{}` from JavaScript) is a valid configuration. The
//! element ids and class names are the integration contract with the
//! templates; renaming one here without touching the markup breaks the
//! feature silently.
//!
//! ```toml
//! index_path = "/search/index.json"
//!
//! [search]
//! result_limit = 8
//! retry_failed_load = true
//! ```

use crate::error::ConfigError;
use crate::index::IndexSchema;
use serde::{Deserialize, Serialize};

/// Which of the two search boxes an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairId {
    Desktop,
    Mobile,
}

/// A search input and the container its results render into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPair {
    pub pair: PairId,
    pub input_id: String,
    pub results_id: String,
}

/// How "results visible" is expressed in markup.
///
/// The current theme adds `active`; the legacy one removes `hidden`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityToggle {
    pub class: String,
    /// `true` if the class is present while visible.
    pub present_when_visible: bool,
}

impl VisibilityToggle {
    /// Whether the class should be on for the given visibility.
    pub fn class_on(&self, visible: bool) -> bool {
        visible == self.present_when_visible
    }
}

/// Search behaviour. The two presets are the two generations of the theme's
/// search box; see [`SearchProfile::full`] and [`SearchProfile::minimal`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchProfile {
    pub result_limit: usize,
    pub min_query_len: usize,
    pub trim_input: bool,
    /// Clear the container's content when hiding for a short query.
    pub clear_on_hide: bool,
    pub retry_failed_load: bool,
    pub schema: IndexSchema,
    pub visibility: VisibilityToggle,
}

impl Default for SearchProfile {
    fn default() -> Self {
        Self::full()
    }
}

impl SearchProfile {
    /// Desktop + mobile search with section labels and prefix matching.
    pub fn full() -> Self {
        Self {
            result_limit: 10,
            min_query_len: 2,
            trim_input: true,
            clear_on_hide: true,
            retry_failed_load: false,
            schema: IndexSchema::default(),
            visibility: VisibilityToggle {
                class: "active".to_string(),
                present_when_visible: true,
            },
        }
    }

    /// The original single search box: whole-word matching, five results.
    pub fn minimal() -> Self {
        Self {
            result_limit: 5,
            min_query_len: 2,
            trim_input: false,
            clear_on_hide: false,
            retry_failed_load: false,
            schema: IndexSchema::strict(),
            visibility: VisibilityToggle {
                class: "hidden".to_string(),
                present_when_visible: false,
            },
        }
    }
}

/// Local/session storage keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub theme: String,
    pub newsletter: String,
    pub banner_prefix: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            theme: "hugo-theme-mode".to_string(),
            newsletter: "hugo-newsletter-subscribed".to_string(),
            banner_prefix: "hugo-banner-closed-".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub dark_class: String,
    pub sun_selector: String,
    pub moon_selector: String,
    pub hidden_class: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            dark_class: "dark".to_string(),
            sun_selector: ".theme-icon-sun".to_string(),
            moon_selector: ".theme-icon-moon".to_string(),
            hidden_class: "hidden".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub open_class: String,
    pub sidebar_open_class: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            open_class: "mobile-nav-open".to_string(),
            sidebar_open_class: "open".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    pub container_id: String,
    pub active_class: String,
    /// Fixed header height subtracted when scrolling to a heading.
    pub header_offset: f64,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            container_id: "TableOfContents".to_string(),
            active_class: "active".to_string(),
            header_offset: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    pub banner_id: String,
    pub hidden_class: String,
    pub default_key: String,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            banner_id: "site-banner".to_string(),
            hidden_class: "banner-hidden".to_string(),
            default_key: "global".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsletterConfig {
    pub card_selector: String,
    pub wrapper_selector: String,
    pub success_selector: String,
    pub button_selector: String,
    pub hidden_class: String,
    pub sending_label: String,
    pub failure_message: String,
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            card_selector: ".email-capture-card".to_string(),
            wrapper_selector: ".js-email-form-wrapper".to_string(),
            success_selector: ".js-email-success-message".to_string(),
            button_selector: "button".to_string(),
            hidden_class: "hidden".to_string(),
            sending_label: "Sending...".to_string(),
            failure_message: "Something went wrong. Please try again.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub panel_id: String,
    pub trigger_selector: String,
    pub expand_button_id: String,
    /// Below this viewport width, opening the panel locks body scroll.
    pub scroll_lock_below: f64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            panel_id: "ask-ai-panel".to_string(),
            trigger_selector: ".js-ask-ai-trigger".to_string(),
            expand_button_id: "ask-ai-expand".to_string(),
            scroll_lock_below: 768.0,
        }
    }
}

/// Everything the page scripts need to know about the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub index_path: String,
    pub search: SearchProfile,
    pub pairs: Vec<SearchPair>,
    /// Dimmed overlay behind the focused desktop search box.
    pub backdrop_id: Option<String>,
    pub focus_class: String,
    pub storage: StorageKeys,
    pub theme: ThemeConfig,
    pub nav: NavConfig,
    pub toc: TocConfig,
    pub banner: BannerConfig,
    pub newsletter: NewsletterConfig,
    pub panel: PanelConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            index_path: "/index.json".to_string(),
            search: SearchProfile::full(),
            pairs: vec![
                SearchPair {
                    pair: PairId::Desktop,
                    input_id: "search-input-desktop".to_string(),
                    results_id: "search-results-desktop".to_string(),
                },
                SearchPair {
                    pair: PairId::Mobile,
                    input_id: "search-input-mobile".to_string(),
                    results_id: "search-results-mobile".to_string(),
                },
            ],
            backdrop_id: Some("search-backdrop".to_string()),
            focus_class: "search-focused".to_string(),
            storage: StorageKeys::default(),
            theme: ThemeConfig::default(),
            nav: NavConfig::default(),
            toc: TocConfig::default(),
            banner: BannerConfig::default(),
            newsletter: NewsletterConfig::default(),
            panel: PanelConfig::default(),
        }
    }
}

impl SiteConfig {
    /// The legacy single-box layout.
    pub fn minimal() -> Self {
        Self {
            search: SearchProfile::minimal(),
            pairs: vec![SearchPair {
                pair: PairId::Desktop,
                input_id: "search-input".to_string(),
                results_id: "search-results".to_string(),
            }],
            backdrop_id: None,
            ..Self::default()
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.index_path.starts_with('/') {
            return Err(ConfigError::Invalid {
                field: "index_path",
                reason: format!("must be site-absolute, got {:?}", self.index_path),
            });
        }
        if self.search.result_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "search.result_limit",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.search.schema.index.is_empty() {
            return Err(ConfigError::Invalid {
                field: "search.schema.index",
                reason: "at least one field must be indexed".to_string(),
            });
        }
        for pair in &self.pairs {
            if pair.input_id.is_empty() || pair.results_id.is_empty() {
                return Err(ConfigError::Invalid {
                    field: "pairs",
                    reason: format!("{:?} pair has an empty element id", pair.pair),
                });
            }
        }
        Ok(())
    }

    pub fn pair(&self, id: PairId) -> Option<&SearchPair> {
        self.pairs.iter().find(|p| p.pair == id)
    }
}
