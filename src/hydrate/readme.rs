//! hydrate::readme
//!
//! Human-readable summary of a hydrated path, written as `README.md`.
//!
//! # Design
//!
//! Rendering is a pure function from the metadata record to a markdown
//! string: immutable input, formatted output, no side effects. The file
//! write is a thin wrapper around it.
//!
//! # Example Output
//!
//! ````text
//! # Manifest Hydration
//!
//! To hydrate the manifests in this repository, run the following commands:
//!
//! ```shell
//! git clone https://example/repo
//! # cd into the cloned directory
//! git checkout abc123
//! helm template .
//! ```
//! ````

use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tracing::error;

use crate::core::types::HydratorMetadata;

/// Fixed name of the README file within a hydrated path directory.
pub const README_FILE: &str = "README.md";

/// Errors from writing the README file.
#[derive(Debug, Error)]
pub enum ReadmeError {
    /// The file could not be created.
    #[error("failed to create README file: {0}")]
    Create(#[source] std::io::Error),

    /// The rendered content could not be written.
    #[error("failed to write README file: {0}")]
    Write(#[source] std::io::Error),
}

/// Render the README content for a hydrated path.
///
/// Produces reproduction instructions from the metadata record: clone the
/// source repository, check out the dry SHA, and run the recorded hydration
/// commands (if any).
pub fn render_readme(metadata: &HydratorMetadata) -> String {
    let mut readme = String::new();
    readme.push_str("# Manifest Hydration\n\n");
    readme.push_str("To hydrate the manifests in this repository, run the following commands:\n\n");
    readme.push_str("```shell\n");
    let _ = writeln!(readme, "git clone {}", metadata.repo_url);
    readme.push_str("# cd into the cloned directory\n");
    let _ = writeln!(readme, "git checkout {}", metadata.dry_sha);
    for command in &metadata.commands {
        readme.push_str(command);
        readme.push('\n');
    }
    readme.push_str("```\n");
    readme
}

/// Write the rendered README to `README.md` inside `dir`, replacing any
/// existing file.
///
/// A sync failure after a successful write is logged and ignored; the
/// artifact is already on disk and the write as a whole still counts as
/// successful.
///
/// # Errors
///
/// [`ReadmeError::Create`] if the file cannot be created,
/// [`ReadmeError::Write`] if the content cannot be written.
pub fn write_readme(dir: &Path, metadata: &HydratorMetadata) -> Result<(), ReadmeError> {
    let readme_path = dir.join(README_FILE);
    let mut file = File::create(&readme_path).map_err(ReadmeError::Create)?;
    file.write_all(render_readme(metadata).as_bytes())
        .map_err(ReadmeError::Write)?;
    if let Err(err) = file.sync_all() {
        error!("failed to close README file: {err}");
    }
    Ok(())
}
