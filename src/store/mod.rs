//! Whole-file JSON persistence for site content and link applications.

mod links;
mod models;
mod site;

pub use links::*;
pub use models::*;
pub use site::*;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Store error types.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed store file: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One JSON document on disk, read and replaced as a whole.
pub(crate) struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub(crate) fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the document. `Ok(None)` when the file does not exist.
    pub(crate) fn read<T: DeserializeOwned>(&self) -> Result<Option<T>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Serialize and replace the document, creating parent directories.
    pub(crate) fn write<T: Serialize>(&self, value: &T) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(value)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        count: u32,
    }

    #[test]
    fn test_read_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFile::new(dir.path().join("missing.json"));
        let doc: Option<Doc> = file.read().unwrap();
        assert!(doc.is_none());
    }

    #[test]
    fn test_write_creates_parents_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFile::new(dir.path().join("nested").join("doc.json"));

        let doc = Doc {
            name: "pingboard".to_string(),
            count: 3,
        };
        file.write(&doc).unwrap();

        let read: Doc = file.read().unwrap().unwrap();
        assert_eq!(read, doc);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();

        let file = JsonFile::new(path);
        let result: Result<Option<Doc>, StoreError> = file.read();
        assert!(matches!(result, Err(StoreError::Malformed(_))));
    }
}
