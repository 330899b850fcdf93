//! Core type definitions for termbank.
//!
//! This crate defines the fundamental types shared by the store and the
//! persistence layer:
//! - Headword fingerprints (truncated SHA-256 content digests)
//! - The `Entry` and `DefinitionRecord` model types with their validation
//!
//! Everything session- or storage-specific (tombstones, snapshots, the merge
//! algorithm) belongs to the store and storage crates, not here.

mod fingerprint;
mod model;

pub use fingerprint::{Fingerprint, ParseFingerprintError};
pub use model::{DefinitionRecord, Entry, ModelError};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, ModelError>;
