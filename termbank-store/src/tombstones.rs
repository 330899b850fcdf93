//! The session's delete log.
//!
//! Records what this session has explicitly removed since the store was
//! loaded, so a later reconcile does not re-import it. The sets only grow
//! while a session is live; they are cleared when the store is reloaded or
//! a reconciling save completes.

use std::collections::{HashMap, HashSet};
use termbank_types::Fingerprint;

/// Tombstones for deleted entries and definitions.
///
/// Populated only by explicit deletes; the reconciler consults it but never
/// writes to it.
#[derive(Debug, Clone, Default)]
pub struct TombstoneTracker {
    entries: HashSet<Fingerprint>,
    definitions: HashMap<Fingerprint, HashSet<String>>,
}

impl TombstoneTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that this session deleted the entry with this key.
    pub fn record_entry(&mut self, key: Fingerprint) {
        self.entries.insert(key);
    }

    /// Records that this session deleted one definition text of an entry.
    pub fn record_definition(&mut self, key: Fingerprint, text: String) {
        self.definitions.entry(key).or_default().insert(text);
    }

    /// Whether this session deleted the entry with this key.
    #[must_use]
    pub fn entry_is_tombstoned(&self, key: Fingerprint) -> bool {
        self.entries.contains(&key)
    }

    /// Which of `texts` this session deleted under `key`.
    ///
    /// `None` means no tombstone record exists for this key at all — the
    /// caller must treat that as "nothing to filter", distinct from a record
    /// that exists but matches none of the candidates.
    #[must_use]
    pub fn definitions_tombstoned(&self, key: Fingerprint, texts: &[String]) -> Option<Vec<bool>> {
        let dead = self.definitions.get(&key)?;
        Some(texts.iter().map(|t| dead.contains(t)).collect())
    }

    /// Whether any tombstone has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.definitions.is_empty()
    }

    /// Drops every tombstone. Only valid when the session's changes have
    /// been persisted or abandoned.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.definitions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(word: &str) -> Fingerprint {
        Fingerprint::of(word)
    }

    #[test]
    fn entry_tombstone_recorded() {
        let mut t = TombstoneTracker::new();
        assert!(!t.entry_is_tombstoned(key("alpha")));
        t.record_entry(key("alpha"));
        assert!(t.entry_is_tombstoned(key("alpha")));
        assert!(!t.entry_is_tombstoned(key("beta")));
    }

    #[test]
    fn no_record_for_key_is_none() {
        let t = TombstoneTracker::new();
        assert_eq!(
            t.definitions_tombstoned(key("alpha"), &["x".to_string()]),
            None
        );
    }

    #[test]
    fn record_exists_but_no_candidate_matches() {
        let mut t = TombstoneTracker::new();
        t.record_definition(key("alpha"), "gone".to_string());
        let flags = t
            .definitions_tombstoned(key("alpha"), &["still here".to_string()])
            .unwrap();
        assert_eq!(flags, vec![false]);
    }

    #[test]
    fn flags_align_with_candidates() {
        let mut t = TombstoneTracker::new();
        t.record_definition(key("alpha"), "d1".to_string());
        let texts = vec!["d1".to_string(), "d2".to_string()];
        let flags = t.definitions_tombstoned(key("alpha"), &texts).unwrap();
        assert_eq!(flags, vec![true, false]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut t = TombstoneTracker::new();
        t.record_entry(key("alpha"));
        t.record_definition(key("beta"), "d".to_string());
        assert!(!t.is_empty());
        t.clear();
        assert!(t.is_empty());
        assert!(!t.entry_is_tombstoned(key("alpha")));
    }
}
