//! Definition texts, grouped by the fingerprint of the owning entry.

use crate::{AddOutcome, RemoveOutcome};
use std::collections::HashMap;
use termbank_types::Fingerprint;

/// Owns all definitions in the store.
///
/// A definition has no identity beyond (owning key, exact text); within one
/// entry's group no two texts are ever equal. Insertion order within a group
/// is preserved so a session sees its definitions in the order it wrote
/// them.
#[derive(Debug, Clone, Default)]
pub struct DefinitionStore {
    groups: HashMap<Fingerprint, Vec<String>>,
}

impl DefinitionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All definition texts for an entry; empty slice when there are none.
    #[must_use]
    pub fn definitions_for(&self, key: Fingerprint) -> &[String] {
        self.groups.get(&key).map_or(&[], Vec::as_slice)
    }

    /// Adds texts to an entry's group, one outcome per input text.
    ///
    /// A text equal to one already in the group (including one earlier in
    /// the same batch) is left untouched and reported `AlreadyPresent`.
    pub fn add(&mut self, key: Fingerprint, texts: Vec<String>) -> Vec<AddOutcome> {
        if texts.is_empty() {
            return Vec::new();
        }
        let group = self.groups.entry(key).or_default();
        texts
            .into_iter()
            .map(|text| {
                if group.iter().any(|existing| *existing == text) {
                    AddOutcome::AlreadyPresent
                } else {
                    group.push(text);
                    AddOutcome::Added
                }
            })
            .collect()
    }

    /// Removes texts from an entry's group, one outcome per input text.
    pub fn remove(&mut self, key: Fingerprint, texts: &[String]) -> Vec<RemoveOutcome> {
        let Some(group) = self.groups.get_mut(&key) else {
            return vec![RemoveOutcome::NotFound; texts.len()];
        };
        let outcomes = texts
            .iter()
            .map(|text| match group.iter().position(|t| t == text) {
                Some(idx) => {
                    group.remove(idx);
                    RemoveOutcome::Removed
                }
                None => RemoveOutcome::NotFound,
            })
            .collect();
        if group.is_empty() {
            self.groups.remove(&key);
        }
        outcomes
    }

    /// Drops the entire group for an entry, returning the dropped texts.
    ///
    /// Used by the cascade when an entry is deleted. Tombstoning is the
    /// caller's business, not this store's.
    pub fn remove_all(&mut self, key: Fingerprint) -> Vec<String> {
        self.groups.remove(&key).unwrap_or_default()
    }

    /// Iterates over every (owning key, texts) group. Order unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (Fingerprint, &[String])> {
        self.groups.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Total number of definitions across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Drops every group.
    pub fn clear(&mut self) {
        self.groups.clear();
    }
}
