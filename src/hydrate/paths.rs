//! hydrate::paths
//!
//! Traversal-safe path resolution for untrusted relative paths.
//!
//! The writer receives relative paths from an external caller and must never
//! let them resolve outside the hydration root, whether via `..` segments,
//! absolute paths, or symlinks already present under the root. [`secure_join`]
//! is the single guard every path goes through; call sites never join
//! untrusted input themselves.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use hydrator::hydrate::paths::secure_join;
//!
//! let root = Path::new("/out");
//! assert!(secure_join(root, "app1/overlays").is_ok());
//! assert!(secure_join(root, "../escape").is_err());
//! assert!(secure_join(root, "/etc").is_err());
//! ```

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Errors from resolving an untrusted path under the hydration root.
#[derive(Debug, Error)]
pub enum JoinError {
    /// The supplied path is absolute; only root-relative paths are allowed.
    #[error("path {0:?} is absolute; paths must be relative to the hydration root")]
    Absolute(String),

    /// Resolution would leave the hydration root.
    #[error("path {0:?} escapes the hydration root")]
    Traversal(String),

    /// The root or an ancestor of the target could not be resolved on disk.
    #[error("failed to resolve {path:?} under the hydration root: {source}")]
    Resolve {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Join an untrusted relative path onto `root`, refusing any resolution that
/// would land outside `root`.
///
/// Resolution is lexical first: `.` segments are dropped and `..` segments
/// pop the most recent segment, erroring the moment they would climb above
/// the root. The deepest already-existing ancestor of the result is then
/// canonicalized and checked against the canonicalized root, so a symlink
/// under the root cannot redirect the write elsewhere.
///
/// An empty path resolves to the root itself.
///
/// # Errors
///
/// - [`JoinError::Absolute`] for absolute paths
/// - [`JoinError::Traversal`] for `..` escapes and symlink escapes
/// - [`JoinError::Resolve`] when the root cannot be canonicalized
pub fn secure_join(root: &Path, untrusted: &str) -> Result<PathBuf, JoinError> {
    let relative = Path::new(untrusted);
    if relative.is_absolute() {
        return Err(JoinError::Absolute(untrusted.to_string()));
    }

    let mut resolved = root.to_path_buf();
    let mut depth: usize = 0;
    for component in relative.components() {
        match component {
            Component::CurDir => {}
            Component::Normal(segment) => {
                resolved.push(segment);
                depth += 1;
            }
            Component::ParentDir => {
                if depth == 0 {
                    return Err(JoinError::Traversal(untrusted.to_string()));
                }
                resolved.pop();
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(JoinError::Absolute(untrusted.to_string()));
            }
        }
    }

    verify_within_root(root, &resolved, untrusted)?;
    Ok(resolved)
}

/// Check that the deepest existing ancestor of `resolved` still lives under
/// `root` once symlinks are resolved.
fn verify_within_root(root: &Path, resolved: &Path, untrusted: &str) -> Result<(), JoinError> {
    let canonical_root = root.canonicalize().map_err(|source| JoinError::Resolve {
        path: untrusted.to_string(),
        source,
    })?;

    let mut probe = resolved;
    let existing = loop {
        if probe.exists() {
            break probe;
        }
        match probe.parent() {
            Some(parent) => probe = parent,
            None => break root,
        }
    };

    let canonical = existing.canonicalize().map_err(|source| JoinError::Resolve {
        path: untrusted.to_string(),
        source,
    })?;
    if !canonical.starts_with(&canonical_root) {
        return Err(JoinError::Traversal(untrusted.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_path_resolves_to_root() {
        let root = TempDir::new().unwrap();
        let joined = secure_join(root.path(), "").unwrap();
        assert_eq!(joined, root.path());
    }

    #[test]
    fn plain_relative_path_resolves_under_root() {
        let root = TempDir::new().unwrap();
        let joined = secure_join(root.path(), "app1/overlays").unwrap();
        assert_eq!(joined, root.path().join("app1").join("overlays"));
    }

    #[test]
    fn current_dir_segments_are_dropped() {
        let root = TempDir::new().unwrap();
        let joined = secure_join(root.path(), "./app1/./prod").unwrap();
        assert_eq!(joined, root.path().join("app1").join("prod"));
    }

    #[test]
    fn internal_parent_segments_resolve_lexically() {
        let root = TempDir::new().unwrap();
        let joined = secure_join(root.path(), "app1/../app2").unwrap();
        assert_eq!(joined, root.path().join("app2"));
    }

    #[test]
    fn parent_escape_is_rejected() {
        let root = TempDir::new().unwrap();
        let err = secure_join(root.path(), "../outside").unwrap_err();
        assert!(matches!(err, JoinError::Traversal(_)));
    }

    #[test]
    fn deep_parent_escape_is_rejected() {
        let root = TempDir::new().unwrap();
        let err = secure_join(root.path(), "app1/../../outside").unwrap_err();
        assert!(matches!(err, JoinError::Traversal(_)));
    }

    #[test]
    fn absolute_path_is_rejected() {
        let root = TempDir::new().unwrap();
        let err = secure_join(root.path(), "/etc/passwd").unwrap_err();
        assert!(matches!(err, JoinError::Absolute(_)));
    }

    #[test]
    fn missing_root_is_a_resolve_error() {
        let root = TempDir::new().unwrap();
        let gone = root.path().join("never-created");
        let err = secure_join(&gone, "app1").unwrap_err();
        assert!(matches!(err, JoinError::Resolve { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_escape_is_rejected() {
        let outside = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        std::os::unix::fs::symlink(outside.path(), root.path().join("link")).unwrap();

        let err = secure_join(root.path(), "link/app1").unwrap_err();
        assert!(matches!(err, JoinError::Traversal(_)));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_within_root_is_allowed() {
        let root = TempDir::new().unwrap();
        std::fs::create_dir(root.path().join("real")).unwrap();
        std::os::unix::fs::symlink(root.path().join("real"), root.path().join("alias")).unwrap();

        let joined = secure_join(root.path(), "alias/app1").unwrap();
        assert_eq!(joined, root.path().join("alias").join("app1"));
    }
}
