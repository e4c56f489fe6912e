//! Hydrator - persists hydrated manifests and provenance metadata
//!
//! Hydrator takes the output of a manifest-hydration step (rendered Kubernetes
//! manifests plus the commands that produced them) and writes it into a
//! directory tree that mirrors a set of logical paths under one root. For each
//! path it writes three artifacts:
//!
//! - `manifest.yaml` - the rendered manifests as canonical multi-document YAML
//! - `hydrator.metadata` - a machine-readable provenance record
//! - `README.md` - a human-readable summary of how to reproduce the hydration
//!
//! A root-level `hydrator.metadata` describing the whole operation is written
//! once, before any path is processed.
//!
//! # Architecture
//!
//! - [`core`] - Domain types ([`core::types::HydrationRequest`] and friends)
//! - [`hydrate`] - The writer: orchestration, canonical manifest
//!   serialization, metadata and README generation, and traversal-safe path
//!   resolution
//!
//! # Correctness Invariants
//!
//! 1. Every per-path metadata record carries the same repo URL and dry SHA as
//!    the request it came from
//! 2. Manifest order within a path is preserved end-to-end
//! 3. No resolved path ever escapes the hydration root, regardless of the
//!    relative paths supplied by the caller
//! 4. Output is deterministic: the same request always produces byte-identical
//!    files

pub mod core;
pub mod hydrate;
