//! hydrate::metadata
//!
//! Persistence of the provenance record as `hydrator.metadata`.
//!
//! The record is serialized as 2-space-indented JSON so diffs stay readable
//! in review, and the file is replaced wholesale on every write.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::core::types::HydratorMetadata;

/// Fixed name of the metadata file within a hydrated path directory.
pub const METADATA_FILE: &str = "hydrator.metadata";

/// Errors from writing the metadata file.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The record could not be serialized.
    #[error("failed to serialize hydrator metadata: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The file could not be written.
    #[error("failed to write hydrator metadata: {0}")]
    Io(#[source] std::io::Error),
}

/// Write `metadata` to `hydrator.metadata` inside `dir`, replacing any
/// existing file.
///
/// # Errors
///
/// [`MetadataError::Serialize`] on serialization failure,
/// [`MetadataError::Io`] on any open/write failure.
pub fn write_metadata(dir: &Path, metadata: &HydratorMetadata) -> Result<(), MetadataError> {
    let json = serde_json::to_string_pretty(metadata).map_err(MetadataError::Serialize)?;
    fs::write(dir.join(METADATA_FILE), json).map_err(MetadataError::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read_metadata(dir: &Path) -> String {
        std::fs::read_to_string(dir.join(METADATA_FILE)).unwrap()
    }

    #[test]
    fn root_record_is_indented_json_without_commands() {
        let dir = TempDir::new().unwrap();
        let metadata = HydratorMetadata::root("https://example/repo", "abc123");

        write_metadata(dir.path(), &metadata).unwrap();

        let content = read_metadata(dir.path());
        assert_eq!(
            content,
            "{\n  \"drySha\": \"abc123\",\n  \"repoURL\": \"https://example/repo\"\n}"
        );
    }

    #[test]
    fn path_record_lists_commands_first() {
        let dir = TempDir::new().unwrap();
        let metadata = HydratorMetadata::for_path(
            "https://example/repo",
            "abc123",
            vec!["helm template".to_string()],
        );

        write_metadata(dir.path(), &metadata).unwrap();

        let content = read_metadata(dir.path());
        assert_eq!(
            content,
            "{\n  \"commands\": [\n    \"helm template\"\n  ],\n  \"drySha\": \"abc123\",\n  \"repoURL\": \"https://example/repo\"\n}"
        );
    }

    #[test]
    fn rewrite_replaces_previous_record() {
        let dir = TempDir::new().unwrap();
        write_metadata(
            dir.path(),
            &HydratorMetadata::for_path("https://example/repo", "old", vec!["x".to_string()]),
        )
        .unwrap();
        write_metadata(dir.path(), &HydratorMetadata::root("https://example/repo", "new"))
            .unwrap();

        let content = read_metadata(dir.path());
        assert!(content.contains("new"));
        assert!(!content.contains("old"));
        assert!(!content.contains("commands"));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("missing");
        let err = write_metadata(&gone, &HydratorMetadata::root("url", "sha")).unwrap_err();
        assert!(matches!(err, MetadataError::Io(_)));
    }
}
