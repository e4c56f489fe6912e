//! hydrate
//!
//! The hydration-artifact writer.
//!
//! [`write_for_paths`] is the single entry point: given a
//! [`HydrationRequest`], it writes a root-level provenance record, then for
//! each path bundle (in input order) resolves the target directory safely
//! under the root, creates it, and writes manifests, metadata, and README in
//! that fixed order.
//!
//! # Failure Semantics
//!
//! The first failure aborts the whole call with an error naming the stage
//! and, where applicable, the path being processed. There is no rollback:
//! paths written before the failure stay on disk. Callers that need
//! all-or-nothing semantics across the path set must provide them externally
//! (e.g., commit the tree only when the call succeeds).
//!
//! # Modules
//!
//! - [`paths`] - Traversal-safe join of untrusted relative paths
//! - [`manifests`] - Canonical multi-document YAML serialization
//! - [`metadata`] - Provenance record persistence
//! - [`readme`] - Human-readable summary rendering

pub mod manifests;
pub mod metadata;
pub mod paths;
pub mod readme;

use std::fs;

use thiserror::Error;
use tracing::debug;

use crate::core::types::{HydrationRequest, HydratorMetadata};

use self::manifests::ManifestError;
use self::metadata::MetadataError;
use self::paths::JoinError;
use self::readme::ReadmeError;

/// Errors from a hydration write, identifying the stage that failed and the
/// path being processed when it did.
#[derive(Debug, Error)]
pub enum HydrateError {
    /// The root-level metadata record could not be written. Nothing else was
    /// attempted.
    #[error("failed to write top-level hydrator metadata: {0}")]
    RootMetadata(#[source] MetadataError),

    /// A bundle's relative path could not be resolved under the root.
    #[error("failed to construct hydrate path for {path:?}: {source}")]
    Join {
        path: String,
        #[source]
        source: JoinError,
    },

    /// The resolved directory could not be created.
    #[error("failed to create path {path:?}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The manifest file for a path could not be written.
    #[error("failed to write manifests for {path:?}: {source}")]
    Manifests {
        path: String,
        #[source]
        source: ManifestError,
    },

    /// The metadata record for a path could not be written.
    #[error("failed to write hydrator metadata for {path:?}: {source}")]
    Metadata {
        path: String,
        #[source]
        source: MetadataError,
    },

    /// The README for a path could not be written.
    #[error("failed to write readme for {path:?}: {source}")]
    Readme {
        path: String,
        #[source]
        source: ReadmeError,
    },
}

/// Write hydrated artifacts for every path bundle in `request`.
///
/// Writes the root-level `hydrator.metadata` first; a failure there aborts
/// before any path is touched. Bundles are then processed strictly in input
/// order, each one receiving `manifest.yaml`, `hydrator.metadata`, and
/// `README.md` in that order. The sentinel path `"."` hydrates into the root
/// itself.
///
/// The root directory must already exist. Target directories and their
/// missing ancestors are created as needed; existing directories and files
/// are reused and overwritten.
///
/// # Errors
///
/// The first failure at any stage is returned as a [`HydrateError`]; bundles
/// after the failing one are not processed, and nothing already written is
/// undone.
pub fn write_for_paths(request: &HydrationRequest) -> Result<(), HydrateError> {
    let root_metadata = HydratorMetadata::root(&request.repo_url, &request.dry_sha);
    metadata::write_metadata(&request.root_path, &root_metadata)
        .map_err(HydrateError::RootMetadata)?;

    for bundle in &request.paths {
        // "." means the bundle hydrates into the root itself.
        let hydrate_path = if bundle.path == "." { "" } else { bundle.path.as_str() };

        let full_path = paths::secure_join(&request.root_path, hydrate_path).map_err(|source| {
            HydrateError::Join {
                path: bundle.path.clone(),
                source,
            }
        })?;

        fs::create_dir_all(&full_path).map_err(|source| HydrateError::CreateDir {
            path: bundle.path.clone(),
            source,
        })?;

        debug!(path = %bundle.path, manifests = bundle.manifests.len(), "writing hydrated artifacts");

        manifests::write_manifests(&full_path, &bundle.manifests).map_err(|source| {
            HydrateError::Manifests {
                path: bundle.path.clone(),
                source,
            }
        })?;

        let path_metadata = HydratorMetadata::for_path(
            &request.repo_url,
            &request.dry_sha,
            bundle.commands.clone(),
        );
        metadata::write_metadata(&full_path, &path_metadata).map_err(|source| {
            HydrateError::Metadata {
                path: bundle.path.clone(),
                source,
            }
        })?;

        readme::write_readme(&full_path, &path_metadata).map_err(|source| HydrateError::Readme {
            path: bundle.path.clone(),
            source,
        })?;
    }
    Ok(())
}
