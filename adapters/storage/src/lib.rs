#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Persistence boundary for Star Miner progress.
//!
//! Saves are flat JSON objects. Reading is lenient: every field is decoded on
//! its own and falls back to its default when it is missing or unusable, so a
//! damaged save never prevents the game from starting.

mod codec;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use starminer_core::SaveState;
use tracing::{debug, info};

pub use codec::{decode_save, encode_save};

/// Errors raised while moving saves in and out of storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("failed to access save file {path}")]
    Io {
        /// File that was accessed.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// The save could not be serialized.
    #[error("failed to encode save")]
    Encode(#[from] serde_json::Error),
}

/// Key-value persistence for a single save slot.
pub trait SaveStore {
    /// Returns the stored progress, or `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<SaveState>, StorageError>;

    /// Replaces the stored progress.
    fn save(&mut self, state: &SaveState) -> Result<(), StorageError>;
}

/// Save slot backed by a JSON file on disk.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store reading and writing `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the save file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SaveStore for FileStore {
    fn load(&self) -> Result<Option<SaveState>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no save file yet");
                return Ok(None);
            }
            Err(error) => return Err(self.io_error(error)),
        };

        let state = decode_save(&contents);
        info!(path = %self.path.display(), resources = state.resources, "save loaded");
        Ok(Some(state))
    }

    fn save(&mut self, state: &SaveState) -> Result<(), StorageError> {
        let encoded = encode_save(state)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|error| self.io_error(error))?;
        }

        // Stage beside the target, then rename into place.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, encoded).map_err(|error| self.io_error(error))?;
        fs::rename(&staging, &self.path).map_err(|error| self.io_error(error))?;
        debug!(path = %self.path.display(), "save written");
        Ok(())
    }
}

/// Save slot held in memory, mainly for tests and headless runs.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    contents: Option<String>,
}

impl MemoryStore {
    /// Creates a store preloaded with raw save text.
    #[must_use]
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
        }
    }

    /// Raw text of the last save, if any.
    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl SaveStore for MemoryStore {
    fn load(&self) -> Result<Option<SaveState>, StorageError> {
        Ok(self.contents.as_deref().map(decode_save))
    }

    fn save(&mut self, state: &SaveState) -> Result<(), StorageError> {
        self.contents = Some(encode_save(state)?);
        Ok(())
    }
}
