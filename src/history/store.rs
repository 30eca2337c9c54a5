// src/history/store.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::EndpointRef;

/// Number of entries kept per app after each run.
pub const HISTORY_LIMIT: usize = 600;

/// One probe result. Appended to an app's history, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_active: bool,
    pub timestamp: DateTime<Utc>,
}

impl StatusEntry {
    pub fn record(endpoint: &EndpointRef, is_active: bool, timestamp: DateTime<Utc>) -> Self {
        Self {
            name: endpoint.name.clone(),
            url: endpoint.url.clone(),
            kind: endpoint.kind.clone(),
            is_active,
            timestamp,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("failed to read status history {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse status history {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize status history: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write status history {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-app status history, keyed by app name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryStore {
    apps: BTreeMap<String, Vec<StatusEntry>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the history file. An absent file yields an empty store.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, HistoryError> {
        let path = path.as_ref();
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("{} not found, starting a new status history", path.display());
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(HistoryError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let store: Self = serde_json::from_str(&contents).map_err(|source| HistoryError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            "Loaded status history for {} apps from {}",
            store.apps.len(),
            path.display()
        );
        Ok(store)
    }

    /// Rewrites the whole history file.
    ///
    /// The document is written to a sibling temporary file first and then
    /// renamed over `path`, so readers never observe a half-written file.
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), HistoryError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;

        let write_error = |source| HistoryError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
        }

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, json).await.map_err(write_error)?;
        tokio::fs::rename(&tmp, path).await.map_err(write_error)?;
        Ok(())
    }

    /// Returns the app's history, creating an empty one if needed.
    pub fn entries_mut(&mut self, app: &str) -> &mut Vec<StatusEntry> {
        self.apps.entry(app.to_string()).or_default()
    }

    pub fn entries(&self, app: &str) -> Option<&[StatusEntry]> {
        self.apps.get(app).map(Vec::as_slice)
    }

    pub fn app_names(&self) -> impl Iterator<Item = &str> {
        self.apps.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

/// Drops the oldest entries so that at most `limit` remain.
pub fn trim_to_recent(entries: &mut Vec<StatusEntry>, limit: usize) {
    if entries.len() > limit {
        let excess = entries.len() - limit;
        entries.drain(..excess);
    }
}
