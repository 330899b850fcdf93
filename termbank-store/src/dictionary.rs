//! The session-facing store facade.

use crate::{
    AddOutcome, DefinitionStore, EntryStore, RemoveOutcome, Snapshot, TombstoneTracker,
};
use termbank_types::{DefinitionRecord, Entry, Fingerprint};
use tracing::warn;

/// A session's live dictionary: entries, definitions, and the delete log,
/// plus the clean/dirty state.
///
/// All mutation goes through this type so the cascade invariant (definitions
/// never outlive their entry) and the tombstone bookkeeping have exactly one
/// owner. Lifecycle per session: built empty or from a snapshot, mutated,
/// then either persisted (via a reconciling save, after which
/// [`Dictionary::mark_saved`] returns it to clean) or abandoned.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: EntryStore,
    definitions: DefinitionStore,
    tombstones: TombstoneTracker,
    dirty: bool,
}

impl Dictionary {
    /// Creates an empty, clean dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dictionary from a loaded snapshot. The result is clean and
    /// has no tombstones.
    ///
    /// Definition records whose fingerprint matches no entry are tolerated
    /// and preserved, as the original file format allows them; they are
    /// surfaced in the log so a session can notice.
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut dict = Self::new();
        for entry in snapshot.entries {
            dict.entries.add(entry);
        }
        let mut orphans = 0usize;
        for record in snapshot.definitions {
            let (key, text) = record.into_parts();
            if !dict.entries.contains(key) {
                orphans += 1;
            }
            dict.definitions.add(key, vec![text]);
        }
        if orphans > 0 {
            warn!(orphans, "snapshot contains definitions with no matching entry");
        }
        dict
    }

    /// Serializes the current state into a snapshot: every entry, followed
    /// by all definitions for every entry.
    #[must_use]
    pub fn to_snapshot(&self) -> Snapshot {
        let entries: Vec<Entry> = self.entries.iter().cloned().collect();
        let mut definitions = Vec::with_capacity(self.definitions.len());
        for (key, texts) in self.definitions.iter() {
            for text in texts {
                definitions.push(DefinitionRecord::from_parts(key, text.clone()));
            }
        }
        Snapshot {
            entries,
            definitions,
        }
    }

    // ── Entries ──────────────────────────────────────────────────

    /// Inserts an entry; an existing entry with the same key is kept as-is.
    pub fn add_entry(&mut self, entry: Entry) -> AddOutcome {
        let outcome = self.entries.add(entry);
        if outcome.was_added() {
            self.dirty = true;
        }
        outcome
    }

    /// Deletes an entry, tombstones its key, and cascades to drop all of
    /// its definitions.
    pub fn remove_entry(&mut self, key: Fingerprint) -> RemoveOutcome {
        if self.entries.remove(key).is_none() {
            return RemoveOutcome::NotFound;
        }
        self.tombstones.record_entry(key);
        self.definitions.remove_all(key);
        self.dirty = true;
        RemoveOutcome::Removed
    }

    #[must_use]
    pub fn get(&self, key: Fingerprint) -> Option<&Entry> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: Fingerprint) -> bool {
        self.entries.contains(key)
    }

    #[must_use]
    pub fn find_by_headword(&self, headword: &str) -> Option<&Entry> {
        self.entries.find_by_headword(headword)
    }

    /// See [`EntryStore::search`].
    #[must_use]
    pub fn search(&self, pattern: &str, category: &str, group: &str) -> Vec<&Entry> {
        self.entries.search(pattern, category, group)
    }

    /// Iterates over all entries in unspecified order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    // ── Definitions ──────────────────────────────────────────────

    #[must_use]
    pub fn definitions_for(&self, key: Fingerprint) -> &[String] {
        self.definitions.definitions_for(key)
    }

    /// Adds definition texts under an entry key, one outcome per text.
    pub fn add_definitions(&mut self, key: Fingerprint, texts: Vec<String>) -> Vec<AddOutcome> {
        let outcomes = self.definitions.add(key, texts);
        if outcomes.iter().any(|o| o.was_added()) {
            self.dirty = true;
        }
        outcomes
    }

    /// Removes definition texts under an entry key, tombstoning each one
    /// actually removed.
    pub fn remove_definitions(
        &mut self,
        key: Fingerprint,
        texts: &[String],
    ) -> Vec<RemoveOutcome> {
        let outcomes = self.definitions.remove(key, texts);
        for (text, outcome) in texts.iter().zip(&outcomes) {
            if outcome.was_removed() {
                self.tombstones.record_definition(key, text.clone());
                self.dirty = true;
            }
        }
        outcomes
    }

    #[must_use]
    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    // ── Session state ────────────────────────────────────────────

    /// The session's delete log, read-only.
    #[must_use]
    pub fn tombstones(&self) -> &TombstoneTracker {
        &self.tombstones
    }

    /// Whether the store has unsaved changes.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the store clean after a successful (reconciling) save and
    /// drops the tombstones — their job is done once the merged state is on
    /// disk.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
        self.tombstones.clear();
    }

    /// Full reset: drops entries, definitions, and tombstones. Used only
    /// when abandoning all session changes.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.definitions.clear();
        self.tombstones.clear();
        self.dirty = false;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.definitions.is_empty()
    }
}
