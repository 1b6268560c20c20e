//! Saved tournament progress, one JSON snapshot per tournament id

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::tournament::Tournament;

pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// What is written to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub format_version: u32,
    pub saved_at: DateTime<Utc>,
    pub tournament: Tournament,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid tournament id '{0}'")]
    InvalidId(String),
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize tournament: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("snapshot {} is corrupted: {reason}", .path.display())]
    Corrupted { path: PathBuf, reason: String },
}

/// Directory of tournament snapshots
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the snapshot for `id`
    pub fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }

    /// Write the tournament, replacing any earlier snapshot
    pub fn save(&self, tournament: &Tournament) -> Result<PathBuf, StoreError> {
        let path = self.path_for(&tournament.id)?;
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let snapshot = Snapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            saved_at: Utc::now(),
            tournament: tournament.clone(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;

        // Readers only ever see a complete file
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), revision = tournament.revision, "tournament saved");
        Ok(path)
    }

    /// Read a snapshot. `Ok(None)` when nothing was saved under `id`.
    pub fn load(&self, id: &str) -> Result<Option<Tournament>, StoreError> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let corrupted = |reason: String| StoreError::Corrupted {
            path: path.clone(),
            reason,
        };

        let snapshot: Snapshot =
            serde_json::from_str(&contents).map_err(|e| corrupted(e.to_string()))?;
        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(corrupted(format!(
                "unsupported format version {}",
                snapshot.format_version
            )));
        }
        if snapshot.tournament.id != id {
            return Err(corrupted(format!(
                "holds tournament '{}'",
                snapshot.tournament.id
            )));
        }
        snapshot
            .tournament
            .validate()
            .map_err(|e| corrupted(e.to_string()))?;

        info!(id, saved_at = %snapshot.saved_at, "tournament loaded");
        Ok(Some(snapshot.tournament))
    }

    /// Saved tournament, or `fresh()` when there is none or it cannot be read
    pub fn load_or_fresh(&self, id: &str, fresh: impl FnOnce() -> Tournament) -> Tournament {
        match self.load(id) {
            Ok(Some(tournament)) => tournament,
            Ok(None) => fresh(),
            Err(e) => {
                warn!(id, error = %e, "discarding unreadable snapshot, starting fresh");
                fresh()
            }
        }
    }

    pub fn exists(&self, id: &str) -> bool {
        self.path_for(id).map(|path| path.exists()).unwrap_or(false)
    }

    /// Delete the snapshot for `id`. Returns whether one existed.
    pub fn clear(&self, id: &str) -> Result<bool, StoreError> {
        let path = self.path_for(id)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                info!(id, "saved tournament cleared");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
