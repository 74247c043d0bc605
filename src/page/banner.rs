// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Dismissible announcement banner.
//!
//! Dismissal lasts for the browser session only. Each banner carries a
//! `data-key`, so publishing a new announcement (new key) shows it again
//! even to visitors who closed the previous one.

use super::{Page, Storage, StorageScope, Target};
use crate::config::BannerConfig;

#[derive(Debug, Clone)]
pub struct Banner {
    banner_id: String,
    hidden_class: String,
    storage_key: String,
    hidden: bool,
}

impl Banner {
    /// `data_key` is the banner's `data-key` attribute, if any.
    pub fn new(config: &BannerConfig, prefix: &str, data_key: Option<&str>) -> Self {
        let key = data_key
            .filter(|k| !k.is_empty())
            .unwrap_or(config.default_key.as_str());
        Self {
            banner_id: config.banner_id.clone(),
            hidden_class: config.hidden_class.clone(),
            storage_key: format!("{prefix}{key}"),
            hidden: false,
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Hide immediately if dismissed earlier in this session.
    pub fn init<P: Page + ?Sized, S: Storage + ?Sized>(&mut self, page: &mut P, storage: &S) -> bool {
        if storage.get(StorageScope::Session, &self.storage_key).is_some() {
            self.hide(page);
        }
        self.hidden
    }

    pub fn close<P: Page + ?Sized, S: Storage + ?Sized>(&mut self, page: &mut P, storage: &mut S) {
        self.hide(page);
        storage.set(StorageScope::Session, &self.storage_key, "true");
    }

    fn hide<P: Page + ?Sized>(&mut self, page: &mut P) {
        self.hidden = true;
        page.set_class(&Target::id(&self.banner_id), &self.hidden_class, true);
    }
}
