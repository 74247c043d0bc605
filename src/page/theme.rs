// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Dark/light theme toggle.
//!
//! The preference is persisted in local storage. An inline script in the
//! page head applies the `dark` class before first paint; this module owns
//! every change after that and keeps the sun/moon icons in sync.

use super::{Page, Storage, StorageScope, Target};
use crate::config::ThemeConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    /// Follow `prefers-color-scheme`.
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::System => "system",
        }
    }

    /// Parse a stored value. Unknown or missing values mean [`Theme::Dark`].
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            Some("system") => Theme::System,
            _ => Theme::Dark,
        }
    }

    /// The toggle button only alternates dark and light; `System` leaves
    /// through dark.
    pub fn cycle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light | Theme::System => Theme::Dark,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ThemeController {
    config: ThemeConfig,
    storage_key: String,
    preference: Theme,
    system_dark: bool,
}

impl ThemeController {
    /// Read the persisted preference.
    pub fn new<S: Storage + ?Sized>(config: &ThemeConfig, storage_key: &str, storage: &S) -> Self {
        let stored = storage.get(StorageScope::Local, storage_key);
        Self {
            config: config.clone(),
            storage_key: storage_key.to_string(),
            preference: Theme::from_stored(stored.as_deref()),
            system_dark: true,
        }
    }

    pub fn preference(&self) -> Theme {
        self.preference
    }

    /// Whether the page is currently dark.
    pub fn is_dark(&self) -> bool {
        match self.preference {
            Theme::Dark => true,
            Theme::Light => false,
            Theme::System => self.system_dark,
        }
    }

    /// Sync the icons with the stored preference on page load.
    pub fn init<P: Page + ?Sized>(&self, page: &mut P) {
        self.update_icons(page);
    }

    /// The theme toggle button.
    pub fn cycle<P: Page + ?Sized, S: Storage + ?Sized>(&mut self, page: &mut P, storage: &mut S) -> Theme {
        let next = self.preference.cycle();
        storage.set(StorageScope::Local, &self.storage_key, next.as_str());
        self.preference = next;
        tracing::debug!(theme = next.as_str(), "theme changed");

        page.set_class(&Target::Root, &self.config.dark_class, self.is_dark());
        self.update_icons(page);
        next
    }

    /// `prefers-color-scheme` changed. Only applied while following the system.
    pub fn system_changed<P: Page + ?Sized>(&mut self, page: &mut P, dark: bool) {
        self.system_dark = dark;
        if self.preference != Theme::System {
            return;
        }
        page.set_class(&Target::Root, &self.config.dark_class, dark);
        self.update_icons(page);
    }

    // Moon while dark, sun otherwise (including System).
    fn update_icons<P: Page + ?Sized>(&self, page: &mut P) {
        let dark = self.preference == Theme::Dark;
        page.set_class(&Target::all(&self.config.moon_selector), &self.config.hidden_class, !dark);
        page.set_class(&Target::all(&self.config.sun_selector), &self.config.hidden_class, dark);
    }
}
