//! JSON-file persistence for whole record collections.
//!
//! The entire collection is the unit of durable storage: [`JsonStore::load`]
//! reads and parses the full backing file, [`JsonStore::save`] rewrites it
//! from scratch. There is no cache and no partial update; callers re-read
//! before every operation, so edits made to the file by other tools are
//! visible on the next request.

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Things that can go wrong when touching the backing file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file is missing, unreadable, or cannot be replaced.
    #[error("store i/o failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but does not parse as a record array.
    #[error("malformed store file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory records could not be serialized.
    #[error("failed to serialize records for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias using [`StoreError`].
pub type StoreResult<T> = Result<T, StoreError>;

/// Whole-file JSON store for an ordered record collection.
///
/// Generic over the record type. The on-disk representation is a single
/// pretty-printed JSON array; the store itself holds nothing but the path,
/// so every call hits the filesystem.
pub struct JsonStore<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a store over `path`. The file is not touched until the first
    /// `load` or `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the entire collection from disk.
    ///
    /// A missing file is an error, not an empty collection: the backing
    /// resource is expected to exist, and inventing records would mask a
    /// broken deployment.
    pub fn load(&self) -> StoreResult<Vec<T>> {
        let bytes = fs::read(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Replaces the entire collection on disk.
    ///
    /// Serializes pretty-printed, writes to a sibling temp file, and renames
    /// it over the target so a crash mid-write cannot leave a truncated
    /// file. This is a full overwrite, never an append or patch.
    pub fn save(&self, records: &[T]) -> StoreResult<()> {
        let mut bytes =
            serde_json::to_vec_pretty(records).map_err(|source| StoreError::Serialize {
                path: self.path.clone(),
                source,
            })?;
        bytes.push(b'\n');

        let tmp = self.tmp_path();
        fs::write(&tmp, &bytes).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn tmp_path(&self) -> PathBuf {
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("json");
        self.path.with_extension(format!("{ext}.tmp"))
    }
}

impl<T> std::fmt::Debug for JsonStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
