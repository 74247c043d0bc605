// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `localStorage` survives the tab; `sessionStorage` does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageScope {
    Local,
    Session,
}

/// Per-origin key/value storage.
///
/// Writes are best-effort: browsers throw on quota or in private modes, and
/// a preference that fails to persist is not worth interrupting the visitor.
pub trait Storage {
    fn get(&self, scope: StorageScope, key: &str) -> Option<String>;

    fn set(&mut self, scope: StorageScope, key: &str, value: &str);
}

/// In-memory storage for native hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<(StorageScope, String), String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, as if a previous page view had written it.
    pub fn with(mut self, scope: StorageScope, key: &str, value: &str) -> Self {
        self.set(scope, key, value);
        self
    }

    /// Drop everything in one scope (a new tab clears session storage).
    pub fn clear_scope(&mut self, scope: StorageScope) {
        self.entries.retain(|(s, _), _| *s != scope);
    }
}

impl Storage for MemoryStorage {
    fn get(&self, scope: StorageScope, key: &str) -> Option<String> {
        self.entries.get(&(scope, key.to_string())).cloned()
    }

    fn set(&mut self, scope: StorageScope, key: &str, value: &str) {
        self.entries
            .insert((scope, key.to_string()), value.to_string());
    }
}
