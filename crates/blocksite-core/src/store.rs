//! Record store: loads and validates the JSON source document.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{error::SourceError, record::RecordCollection};

/// Loads a [`RecordCollection`] from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    path: PathBuf,
}

impl JsonRecordStore {
    /// Create a store reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the source document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the source document, used to resolve passthrough files.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new(""))
    }

    /// Read, parse and validate the source document.
    pub fn load(&self) -> Result<RecordCollection, SourceError> {
        debug!(path = %self.path.display(), "loading records");

        if !self.path.exists() {
            return Err(SourceError::Missing {
                path: self.path.clone(),
            });
        }

        let json = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;

        let records = RecordCollection::from_json_str(&json)
            .map_err(|e| SourceError::invalid(&self.path, e.to_string()))?;

        info!(
            path = %self.path.display(),
            count = records.len(),
            "loaded records"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_valid_source() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("blocks.json");
        std::fs::write(&path, r#"[{"n": 1, "title": "A"}, {"n": 2}]"#).expect("write");

        let store = JsonRecordStore::new(&path);
        assert_eq!(store.path(), path);
        assert_eq!(store.base_dir(), dir.path());

        let records = store.load().expect("load");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("blocks.json");

        let err = JsonRecordStore::new(&path).load().unwrap_err();
        assert!(matches!(err, SourceError::Missing { .. }));
    }

    #[test]
    fn test_unparsable_source() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("blocks.json");
        std::fs::write(&path, "[{\"n\": 1,").expect("write");

        let err = JsonRecordStore::new(&path).load().unwrap_err();
        assert!(matches!(err, SourceError::Invalid { .. }));
    }

    #[test]
    fn test_empty_source() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("blocks.json");
        std::fs::write(&path, "[]").expect("write");

        let err = JsonRecordStore::new(&path).load().unwrap_err();
        match err {
            SourceError::Invalid { message, .. } => assert!(message.contains("empty")),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_base_dir() {
        let store = JsonRecordStore::new("site/data/blocks.json");
        assert_eq!(store.base_dir(), Path::new("site/data"));
        assert_eq!(JsonRecordStore::new("blocks.json").base_dir(), Path::new(""));
    }
}
