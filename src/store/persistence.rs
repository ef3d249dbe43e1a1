//! Flat-file JSON persistence for record collections.
//!
//! In file mode each collection lives in its own file under the data
//! directory:
//! ```text
//! <DATA_DIR>/
//!   meals.json
//!   workouts.json
//! ```
//! Files hold a pretty-printed JSON array of the record shape. Writes go
//! through a temp file and rename so a crash mid-write never leaves a
//! truncated collection behind.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

use super::RecordKind;

/// Persistence mode selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// No durability; state is lost on restart.
    Memory,
    /// Each collection is rewritten to its JSON file on every mutation.
    File,
}

impl FromStr for StorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StorageMode::Memory),
            "file" => Ok(StorageMode::File),
            other => Err(format!(
                "invalid storage mode '{}' (expected 'memory' or 'file')",
                other
            )),
        }
    }
}

impl std::fmt::Display for StorageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageMode::Memory => write!(f, "memory"),
            StorageMode::File => write!(f, "file"),
        }
    }
}

/// Errors that can occur loading or saving a collection file.
#[derive(Debug)]
pub enum PersistenceError {
    /// I/O error reading or writing a file.
    Io(PathBuf, io::Error),
    /// The file exists but does not parse as the expected JSON array.
    Malformed(PathBuf, serde_json::Error),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::Io(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            PersistenceError::Malformed(path, e) => {
                write!(f, "Malformed collection file {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io(_, e) => Some(e),
            PersistenceError::Malformed(_, e) => Some(e),
        }
    }
}

/// Backing medium for the store's collections.
#[derive(Debug, Clone)]
pub(crate) enum Backend {
    Memory,
    File { data_dir: PathBuf },
}

impl Backend {
    fn path_for(&self, kind: RecordKind) -> Option<PathBuf> {
        match self {
            Backend::Memory => None,
            Backend::File { data_dir } => Some(data_dir.join(kind.filename())),
        }
    }

    /// Loads a collection from its file.
    ///
    /// A missing file is not an error; it yields an empty collection.
    pub(crate) fn load<T: DeserializeOwned>(
        &self,
        kind: RecordKind,
    ) -> Result<Vec<T>, PersistenceError> {
        let Some(path) = self.path_for(kind) else {
            return Ok(Vec::new());
        };

        match fs::read_to_string(&path) {
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|e| PersistenceError::Malformed(path, e))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(PersistenceError::Io(path, e)),
        }
    }

    /// Writes the entire collection back to its file.
    ///
    /// No-op in memory mode. Uses temp file + rename so readers never see
    /// a partial write.
    pub(crate) fn save<T: Serialize>(
        &self,
        kind: RecordKind,
        records: &[T],
    ) -> Result<(), PersistenceError> {
        let Some(path) = self.path_for(kind) else {
            return Ok(());
        };

        let json = serde_json::to_string_pretty(records)
            .map_err(|e| PersistenceError::Malformed(path.clone(), e))?;

        let temp_path = path.with_extension("json.tmp");

        let mut file =
            File::create(&temp_path).map_err(|e| PersistenceError::Io(temp_path.clone(), e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| PersistenceError::Io(temp_path.clone(), e))?;
        file.sync_all()
            .map_err(|e| PersistenceError::Io(temp_path.clone(), e))?;

        fs::rename(&temp_path, &path).map_err(|e| PersistenceError::Io(path, e))?;

        Ok(())
    }
}
