//! core
//!
//! Core domain types for the hydration-artifact writer.
//!
//! # Modules
//!
//! - [`types`] - Request, bundle, manifest, and metadata types
//!
//! # Design Principles
//!
//! - All types are transient: constructed from a request, consumed by one
//!   write, never retained across invocations
//! - Manifest payloads stay schemaless; structure is imposed only at
//!   serialization time

pub mod types;
