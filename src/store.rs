//! Snapshot persistence: one tournament, replaced as a whole after every change.

use crate::models::Tournament;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Errors from reading or writing the snapshot.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// The in-memory store lock was poisoned by a panicking writer.
    Poisoned,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "Storage error: {}", e),
            StoreError::Json(e) => write!(f, "Corrupt tournament snapshot: {}", e),
            StoreError::Poisoned => write!(f, "Storage lock error"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Json(e) => Some(e),
            StoreError::Poisoned => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

/// Durable storage for a single tournament snapshot.
#[allow(async_fn_in_trait)]
pub trait TournamentStore {
    /// The stored snapshot, or None if nothing was saved yet.
    async fn load(&self) -> Result<Option<Tournament>, StoreError>;
    /// Replace the stored snapshot.
    async fn save(&self, tournament: &Tournament) -> Result<(), StoreError>;
    /// Remove the stored snapshot.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// On-disk envelope around the snapshot.
#[derive(Serialize, Deserialize)]
struct StoredSnapshot {
    saved_at: DateTime<Utc>,
    tournament: Tournament,
}

/// JSON file store. Saves go through a temporary file and a rename.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl TournamentStore for FileStore {
    async fn load(&self) -> Result<Option<Tournament>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot: StoredSnapshot = serde_json::from_slice(&bytes)?;
        log::debug!(
            "Loaded tournament from {} (saved {})",
            self.path.display(),
            snapshot.saved_at
        );
        Ok(Some(snapshot.tournament))
    }

    async fn save(&self, tournament: &Tournament) -> Result<(), StoreError> {
        let snapshot = StoredSnapshot {
            saved_at: Utc::now(),
            tournament: tournament.clone(),
        };
        let json = serde_json::to_vec_pretty(&snapshot)?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        log::debug!("Saved tournament to {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store, mainly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Mutex<Option<Tournament>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TournamentStore for MemoryStore {
    async fn load(&self) -> Result<Option<Tournament>, StoreError> {
        let g = self.snapshot.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(g.clone())
    }

    async fn save(&self, tournament: &Tournament) -> Result<(), StoreError> {
        let mut g = self.snapshot.lock().map_err(|_| StoreError::Poisoned)?;
        *g = Some(tournament.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut g = self.snapshot.lock().map_err(|_| StoreError::Poisoned)?;
        *g = None;
        Ok(())
    }
}
