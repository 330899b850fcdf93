//! The persisted snapshot shape.
//!
//! A snapshot is the full entry + definition set at one point in time, as
//! read from or written to the dictionary file. Record order carries no
//! meaning: reload does not depend on it and re-serialization need not
//! preserve it.

use serde::{Deserialize, Serialize};
use termbank_types::{DefinitionRecord, Entry};

/// Flat carrier of everything the dictionary file holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub entries: Vec<Entry>,
    pub definitions: Vec<DefinitionRecord>,
}

impl Snapshot {
    /// An empty dictionary.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}
