//! The entry and definition model.
//!
//! An `Entry` is a short term (headword) plus its category and group
//! metadata, identified by the fingerprint of the headword. A
//! `DefinitionRecord` is free text attached to an entry; its identity is the
//! pair (owning entry's key, exact text). Neither type is mutable after
//! construction — "renaming" an entry means deleting it and creating a new
//! one, because the key is derived from the headword.

use crate::Fingerprint;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from model validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("headword must not be empty")]
    EmptyHeadword,

    #[error("definition text must not be empty")]
    EmptyDefinition,
}

/// A glossary entry: a headword with category and group metadata.
///
/// Identity is the `key` alone; two entries with equal keys are the same
/// entity regardless of their attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "fingerprint")]
    key: Fingerprint,
    headword: String,
    category: String,
    group: String,
}

impl Entry {
    /// Creates an entry, computing its key from the headword.
    ///
    /// The headword must be non-empty after trimming; category and group may
    /// be empty.
    pub fn new(
        headword: impl Into<String>,
        category: impl Into<String>,
        group: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let headword = headword.into();
        if headword.trim().is_empty() {
            return Err(ModelError::EmptyHeadword);
        }
        Ok(Self {
            key: Fingerprint::of(&headword),
            headword,
            category: category.into(),
            group: group.into(),
        })
    }

    /// The entry's storage key.
    #[must_use]
    pub fn key(&self) -> Fingerprint {
        self.key
    }

    #[must_use]
    pub fn headword(&self) -> &str {
        &self.headword
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }
}

/// A definition attached to an entry.
///
/// `key` names the owning entry, not the definition itself — a definition
/// has no identity beyond (entry key, exact text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionRecord {
    #[serde(rename = "fingerprint")]
    key: Fingerprint,
    text: String,
}

impl DefinitionRecord {
    /// Creates a definition record for the entry identified by `key`.
    ///
    /// The text must be non-empty after trimming.
    pub fn new(key: Fingerprint, text: impl Into<String>) -> Result<Self, ModelError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ModelError::EmptyDefinition);
        }
        Ok(Self { key, text })
    }

    /// Assembles a record without validation.
    ///
    /// For snapshot assembly and other paths that carry texts the store
    /// already holds; user input goes through [`DefinitionRecord::new`].
    #[must_use]
    pub fn from_parts(key: Fingerprint, text: String) -> Self {
        Self { key, text }
    }

    /// The owning entry's key.
    #[must_use]
    pub fn key(&self) -> Fingerprint {
        self.key
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the record, returning its parts.
    #[must_use]
    pub fn into_parts(self) -> (Fingerprint, String) {
        (self.key, self.text)
    }
}
