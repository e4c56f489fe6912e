//! hydrate::manifests
//!
//! Canonical serialization of manifest payloads into `manifest.yaml`.
//!
//! Each raw payload is round-tripped through a generic untyped document tree
//! rather than a typed structure. The round trip catches malformed input and
//! normalizes key ordering and formatting, so the same ordered input always
//! produces byte-identical output. Downstream change detection hashes these
//! files; determinism is a hard requirement, not a nicety.
//!
//! The file is replaced wholesale on every write: an existing `manifest.yaml`
//! is truncated in place, then documents are appended in input order. The gap
//! between truncation and the last append is not crash-safe; callers that
//! need atomicity across a whole write must layer it on top (e.g., commit
//! only on success).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tracing::error;

use crate::core::types::ManifestRecord;

/// Fixed name of the manifest file within a hydrated path directory.
pub const MANIFEST_FILE: &str = "manifest.yaml";

/// Separator appended after every encoded document.
const DOCUMENT_SEPARATOR: &str = "\n---\n\n";

/// Errors from writing the manifest file.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// A raw payload was not parseable as a structured document.
    #[error("failed to parse manifest payload: {0}")]
    Parse(#[source] serde_json::Error),

    /// A parsed document could not be encoded as YAML.
    #[error("failed to encode manifest: {0}")]
    Encode(#[source] serde_yaml::Error),

    /// The existing manifest file could not be truncated.
    #[error("failed to empty manifest file: {0}")]
    Truncate(#[source] std::io::Error),

    /// The manifest file could not be opened for writing.
    #[error("failed to open manifest file: {0}")]
    Open(#[source] std::io::Error),

    /// A document or separator could not be written.
    #[error("failed to write manifest: {0}")]
    Write(#[source] std::io::Error),
}

/// Write `manifests` to `manifest.yaml` inside `dir`, in input order.
///
/// Each payload is parsed into a generic document tree, re-encoded as YAML
/// with 2-space indentation, and followed by a `---` separator line plus a
/// blank line. Map keys come out sorted, so output is stable across runs.
///
/// Processing stops at the first failure; manifests after the failing one are
/// not written. A sync failure after all documents are written successfully
/// is logged and ignored.
///
/// # Errors
///
/// One [`ManifestError`] variant per failure stage: parse, encode, truncate,
/// open, or write.
pub fn write_manifests(dir: &Path, manifests: &[ManifestRecord]) -> Result<(), ManifestError> {
    let manifest_path = dir.join(MANIFEST_FILE);

    // Full-replace semantics: truncate in place rather than delete/recreate.
    if manifest_path.exists() {
        OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&manifest_path)
            .map_err(ManifestError::Truncate)?;
    }

    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&manifest_path)
        .map_err(ManifestError::Open)?;

    for manifest in manifests {
        // serde_json::Value maps are BTreeMap-backed, so re-encoding sorts
        // keys and yields deterministic bytes for identical input.
        let document: serde_json::Value =
            serde_json::from_str(manifest.raw()).map_err(ManifestError::Parse)?;
        let encoded = serde_yaml::to_string(&document).map_err(ManifestError::Encode)?;

        file.write_all(encoded.as_bytes())
            .map_err(ManifestError::Write)?;
        file.write_all(DOCUMENT_SEPARATOR.as_bytes())
            .map_err(ManifestError::Write)?;
    }

    if let Err(err) = file.sync_all() {
        error!("failed to sync manifest file: {err}");
    }
    Ok(())
}
