use std::{io::Error, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::config;

use super::{TrackStore, UploadStore};

/// Fixed key the snapshot is stored under.
pub const STORE_KEY: &str = "tracks-store";

#[derive(Debug)]
pub enum StoreError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::IoError(e) => write!(f, "Store I/O error: {e}"),
            StoreError::SerdeError(e) => write!(f, "Store serialization error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<Error> for StoreError {
    fn from(err: Error) -> Self {
        StoreError::IoError(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::SerdeError(err)
    }
}

/// Everything the client remembers between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryState {
    pub tracks: TrackStore,
    pub uploads: UploadStore,
}

/// Owns the [`LibraryState`] and its JSON snapshot on disk.
///
/// Construct one per process with [`StoreManager::load`], mutate through
/// [`StoreManager::tracks_mut`] / [`StoreManager::uploads_mut`], then
/// [`StoreManager::persist`].
pub struct StoreManager {
    path: PathBuf,
    state: LibraryState,
}

impl StoreManager {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: LibraryState::default(),
        }
    }

    /// Loads the snapshot at `path`.
    ///
    /// A missing file, unreadable file, or malformed content all yield an
    /// empty state; the latter two are logged.
    pub async fn load(path: PathBuf) -> Self {
        let state = match async_fs::read_to_string(&path).await {
            Ok(json) => serde_json::from_str::<LibraryState>(&json).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "malformed store snapshot, starting empty");
                LibraryState::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => LibraryState::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read store snapshot, starting empty");
                LibraryState::default()
            }
        };
        Self { path, state }
    }

    /// Loads from the configured location.
    pub async fn open() -> Self {
        Self::load(config::store_path()).await
    }

    pub async fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.state)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Resets all state and removes the snapshot file.
    pub async fn clear(&mut self) -> Result<(), StoreError> {
        self.state = LibraryState::default();
        match async_fs::remove_file(&self.path).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(StoreError::IoError(e)),
            _ => Ok(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn state(&self) -> &LibraryState {
        &self.state
    }

    pub fn tracks(&self) -> &TrackStore {
        &self.state.tracks
    }

    pub fn tracks_mut(&mut self) -> &mut TrackStore {
        &mut self.state.tracks
    }

    pub fn uploads(&self) -> &UploadStore {
        &self.state.uploads
    }

    pub fn uploads_mut(&mut self) -> &mut UploadStore {
        &mut self.state.uploads
    }
}
