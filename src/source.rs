// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Where the document list comes from.
//!
//! In the browser the fetch is done by the JS host (see `wasm.rs`), which
//! hands the body back through `DocumentIndexClient::finish_load`. Natively
//! the client drives a [`DocumentSource`] itself.

use crate::error::LoadError;

/// Fetches the raw bytes of the document list.
#[allow(async_fn_in_trait)]
pub trait DocumentSource {
    /// Fetch the resource at a site-absolute path such as `/index.json`.
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError>;
}

/// A document list already in memory.
#[derive(Debug, Clone)]
pub struct StaticSource {
    body: Vec<u8>,
}

impl StaticSource {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self { body: body.into() }
    }
}

impl DocumentSource for StaticSource {
    async fn fetch(&self, _path: &str) -> Result<Vec<u8>, LoadError> {
        Ok(self.body.clone())
    }
}

/// Serves site paths from a directory on disk, like a static file server
/// rooted at the site's `public/` folder.
#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct FileSource {
    root: std::path::PathBuf,
}

#[cfg(feature = "cli")]
impl FileSource {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> std::path::PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

#[cfg(feature = "cli")]
impl DocumentSource for FileSource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        let file = self.resolve(path);
        match tokio::fs::read(&file).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(LoadError::Status { status: 404 })
            }
            Err(err) => Err(LoadError::Network {
                path: file.display().to_string(),
                reason: err.to_string(),
            }),
        }
    }
}
