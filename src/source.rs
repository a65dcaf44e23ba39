//! Resource access for the stores: a file-backed source and an in-memory one.

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Malformed resource {path}: {reason}")]
    Malformed { path: String, reason: String },
}

/// Something that can hand out the text of a resource by relative path.
///
/// Implementations must be shareable across threads; the stores issue
/// independent loads concurrently.
pub trait ResourceSource: Send + Sync {
    fn fetch(&self, path: &str) -> Result<String, SourceError>;
}

/// Fetch a resource and decode it as one JSON document.
pub fn fetch_json<T: DeserializeOwned>(
    source: &dyn ResourceSource,
    path: &str,
) -> Result<T, SourceError> {
    let text = source.fetch(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Reads resources from a directory on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceSource for FileSource {
    fn fetch(&self, path: &str) -> Result<String, SourceError> {
        let full = self.root.join(path);
        tracing::debug!(path = %full.display(), "reading resource");
        match std::fs::read_to_string(&full) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(SourceError::NotFound(path.to_string()))
            }
            Err(err) => Err(SourceError::Io(err)),
        }
    }
}

/// Holds resources in memory and counts fetches per path.
///
/// Useful for embedding small data sets and for observing cache behavior.
#[derive(Debug, Default)]
pub struct MemorySource {
    resources: Mutex<HashMap<String, String>>,
    fetches: Mutex<HashMap<String, usize>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(path, body);
        self
    }

    pub fn insert(&self, path: impl Into<String>, body: impl Into<String>) {
        lock(&self.resources).insert(path.into(), body.into());
    }

    /// Number of fetches issued for one path, successful or not.
    pub fn fetch_count(&self, path: &str) -> usize {
        lock(&self.fetches).get(path).copied().unwrap_or(0)
    }
}

impl ResourceSource for MemorySource {
    fn fetch(&self, path: &str) -> Result<String, SourceError> {
        *lock(&self.fetches).entry(path.to_string()).or_default() += 1;
        lock(&self.resources)
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(path.to_string()))
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
