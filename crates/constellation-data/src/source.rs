//! Record sources: where the unit records come from.

use std::path::{Path, PathBuf};

use crate::record::{DataPayload, UnitRecord};

/// Errors that can occur while fetching records.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source document could not be read.
    #[error("failed to read {path:?}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The document is not valid JSON.
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Anything that can deliver the list of unit records.
///
/// Fetching happens once, off the frame loop.
pub trait RecordSource: Send + Sync {
    /// Fetch every record.
    fn fetch(&self) -> Result<Vec<UnitRecord>, SourceError>;

    /// Human readable description for logs.
    fn describe(&self) -> String;
}

/// Reads a `{ "users": [...] }` document from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for FileSource {
    fn fetch(&self) -> Result<Vec<UnitRecord>, SourceError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let payload = DataPayload::from_json(&content)?;
        let records = payload.records();
        tracing::info!(path = ?self.path, count = records.len(), "Loaded unit records");
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// An in-memory list of records.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<UnitRecord>,
}

impl StaticSource {
    /// Wrap a list of records.
    pub fn new(records: Vec<UnitRecord>) -> Self {
        Self { records }
    }
}

impl RecordSource for StaticSource {
    fn fetch(&self) -> Result<Vec<UnitRecord>, SourceError> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory records", self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_source_reads_payload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"users":[{{"gender":"f"}},{{"gender":"m"}}]}}"#).unwrap();

        let records = FileSource::new(file.path()).fetch().unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileSource::new(dir.path().join("missing.json")).fetch();
        assert!(matches!(result, Err(SourceError::Io { .. })));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = FileSource::new(file.path()).fetch();
        assert!(matches!(result, Err(SourceError::Json(_))));
    }

    #[test]
    fn test_static_source() {
        let source = StaticSource::new(vec![UnitRecord::new().with("gender", "f")]);
        assert_eq!(source.fetch().unwrap().len(), 1);
        assert_eq!(source.describe(), "1 in-memory records");
    }
}
