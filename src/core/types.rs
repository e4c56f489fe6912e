//! core::types
//!
//! Types describing one hydration write: the request, the per-path bundles,
//! the raw manifest payloads, and the provenance metadata record persisted
//! alongside the manifests.
//!
//! # Types
//!
//! - [`HydrationRequest`] - Everything needed for one call to the writer
//! - [`PathBundle`] - One logical output unit (e.g., one application overlay)
//! - [`ManifestRecord`] - One manifest's raw payload, schemaless by contract
//! - [`HydratorMetadata`] - The provenance record written per path and at the
//!   root
//!
//! # Examples
//!
//! ```
//! use hydrator::core::types::{HydrationRequest, ManifestRecord, PathBundle};
//!
//! let request = HydrationRequest {
//!     root_path: "/tmp/out".into(),
//!     repo_url: "https://example/repo".to_string(),
//!     dry_sha: "abc123".to_string(),
//!     paths: vec![PathBundle {
//!         path: "app1".to_string(),
//!         manifests: vec![ManifestRecord::new(r#"{"kind":"ConfigMap"}"#)],
//!         commands: vec!["helm template".to_string()],
//!     }],
//! };
//! assert_eq!(request.paths.len(), 1);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Everything needed for one hydration write.
///
/// The repo URL and dry SHA are threaded, unchanged, into every metadata
/// record the write produces. Bundles are processed in the order given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydrationRequest {
    /// Root directory the artifact tree is written under. Must already exist.
    pub root_path: PathBuf,
    /// Identity of the source repository the manifests were hydrated from.
    pub repo_url: String,
    /// Content hash of the exact pre-hydration input state.
    pub dry_sha: String,
    /// Per-path artifact bundles, in output order.
    pub paths: Vec<PathBundle>,
}

/// One logical unit of output with its own directory under the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathBundle {
    /// Path relative to the root. The sentinel `"."` means the root itself.
    pub path: String,
    /// Raw manifest payloads, in the order they must appear in
    /// `manifest.yaml`.
    pub manifests: Vec<ManifestRecord>,
    /// Commands that produced the manifests, recorded as provenance.
    pub commands: Vec<String>,
}

/// One manifest's raw payload as supplied by the rendering subsystem.
///
/// The payload is opaque JSON text, not a fixed data class: manifests are
/// arbitrary nested maps, sequences, and scalars. Parsing into a generic
/// document tree happens at serialization time, so a malformed payload
/// surfaces as a write-time parse error rather than a construction error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRecord(String);

impl ManifestRecord {
    /// Wrap a raw manifest payload.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw payload text.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<String> for ManifestRecord {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for ManifestRecord {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// The provenance record persisted as `hydrator.metadata`.
///
/// Written once per path (with the commands that produced that path's
/// manifests) and once at the root (with no commands). Serialized as
/// indented JSON with the field names downstream tooling expects:
/// `commands` (omitted when empty), `drySha`, `repoURL`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HydratorMetadata {
    /// Commands that generated the manifests. Empty at the root.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,
    /// Content hash of the pre-hydration input state.
    #[serde(rename = "drySha")]
    pub dry_sha: String,
    /// Identity of the source repository.
    #[serde(rename = "repoURL")]
    pub repo_url: String,
}

impl HydratorMetadata {
    /// The root-level record: repo identity and dry SHA only.
    pub fn root(repo_url: impl Into<String>, dry_sha: impl Into<String>) -> Self {
        Self {
            commands: Vec::new(),
            dry_sha: dry_sha.into(),
            repo_url: repo_url.into(),
        }
    }

    /// A per-path record carrying the bundle's provenance commands.
    pub fn for_path(
        repo_url: impl Into<String>,
        dry_sha: impl Into<String>,
        commands: Vec<String>,
    ) -> Self {
        Self {
            commands,
            dry_sha: dry_sha.into(),
            repo_url: repo_url.into(),
        }
    }
}
