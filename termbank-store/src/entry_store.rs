//! The entry set, keyed by headword fingerprint.

use crate::AddOutcome;
use regex::Regex;
use std::collections::hash_map::Entry as MapEntry;
use std::collections::HashMap;
use termbank_types::{Entry, Fingerprint};

/// Owns the set of entries. No other component mutates this set directly.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: HashMap<Fingerprint, Entry>,
}

impl EntryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry unless one with the same key already exists.
    ///
    /// An existing entry is kept as-is — there is no silent overwrite.
    pub fn add(&mut self, entry: Entry) -> AddOutcome {
        match self.entries.entry(entry.key()) {
            MapEntry::Occupied(_) => AddOutcome::AlreadyPresent,
            MapEntry::Vacant(slot) => {
                slot.insert(entry);
                AddOutcome::Added
            }
        }
    }

    /// Removes and returns the entry with this key, if present.
    pub fn remove(&mut self, key: Fingerprint) -> Option<Entry> {
        self.entries.remove(&key)
    }

    #[must_use]
    pub fn get(&self, key: Fingerprint) -> Option<&Entry> {
        self.entries.get(&key)
    }

    #[must_use]
    pub fn contains(&self, key: Fingerprint) -> bool {
        self.entries.contains_key(&key)
    }

    /// Exact headword lookup, for user-facing "show this term" paths.
    ///
    /// Matches on the stored headword rather than recomputing the digest,
    /// so entries loaded from a snapshot written under an older fingerprint
    /// scheme still resolve.
    #[must_use]
    pub fn find_by_headword(&self, headword: &str) -> Option<&Entry> {
        self.entries.values().find(|e| e.headword() == headword)
    }

    /// Three-stage narrowing search.
    ///
    /// Stages apply in sequence: headword substring match, then category
    /// pattern match, then exact group match. An empty argument skips its
    /// stage entirely. The category is matched as an anchored regex, falling
    /// back to substring match when the pattern does not compile.
    #[must_use]
    pub fn search(&self, pattern: &str, category: &str, group: &str) -> Vec<&Entry> {
        let category_matcher = CategoryMatcher::new(category);
        self.entries
            .values()
            .filter(|e| pattern.is_empty() || e.headword().contains(pattern))
            .filter(|e| category_matcher.matches(e.category()))
            .filter(|e| group.is_empty() || e.group() == group)
            .collect()
    }

    /// Iterates over all entries. Iteration order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Category filter: match-all when empty, anchored regex when the pattern
/// compiles, plain substring otherwise.
enum CategoryMatcher {
    All,
    Pattern(Regex),
    Substring(String),
}

impl CategoryMatcher {
    fn new(pattern: &str) -> Self {
        if pattern.is_empty() {
            return Self::All;
        }
        match Regex::new(&format!("^(?:{pattern})$")) {
            Ok(re) => Self::Pattern(re),
            Err(_) => Self::Substring(pattern.to_string()),
        }
    }

    fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Pattern(re) => re.is_match(category),
            Self::Substring(needle) => category.contains(needle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(headword: &str, category: &str, group: &str) -> Entry {
        Entry::new(headword, category, group).unwrap()
    }

    #[test]
    fn add_then_get() {
        let mut store = EntryStore::new();
        let e = entry("take up", "phrasal verb", "u1");
        let key = e.key();
        assert_eq!(store.add(e), AddOutcome::Added);
        assert_eq!(store.get(key).unwrap().headword(), "take up");
    }

    #[test]
    fn duplicate_add_keeps_original() {
        let mut store = EntryStore::new();
        store.add(entry("take up", "phrasal verb", "u1"));
        let dup = entry("take up", "verb", "u9");
        assert_eq!(store.add(dup), AddOutcome::AlreadyPresent);
        let kept = store.find_by_headword("take up").unwrap();
        assert_eq!(kept.category(), "phrasal verb");
        assert_eq!(kept.group(), "u1");
    }

    #[test]
    fn search_empty_arguments_match_all() {
        let mut store = EntryStore::new();
        store.add(entry("alpha", "noun", "u1"));
        store.add(entry("beta", "verb", "u2"));
        assert_eq!(store.search("", "", "").len(), 2);
    }

    #[test]
    fn search_narrows_in_sequence() {
        let mut store = EntryStore::new();
        store.add(entry("carry on", "phrasal verb", "u1"));
        store.add(entry("carry out", "phrasal verb", "u2"));
        store.add(entry("carrot", "noun", "u1"));

        let hits = store.search("carry", "", "");
        assert_eq!(hits.len(), 2);

        let hits = store.search("carry", "phrasal verb", "u2");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].headword(), "carry out");
    }

    #[test]
    fn search_category_accepts_alternation() {
        let mut store = EntryStore::new();
        store.add(entry("alpha", "noun", "u1"));
        store.add(entry("beta", "verb", "u1"));
        store.add(entry("gamma", "adjective", "u1"));
        let hits = store.search("", "noun|verb", "");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn search_category_invalid_regex_falls_back_to_substring() {
        let mut store = EntryStore::new();
        store.add(entry("alpha", "noun (count", "u1"));
        let hits = store.search("", "(count", "");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn search_group_is_exact() {
        let mut store = EntryStore::new();
        store.add(entry("alpha", "noun", "u1"));
        store.add(entry("beta", "noun", "u12"));
        let hits = store.search("", "", "u1");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].headword(), "alpha");
    }

    #[test]
    fn remove_returns_entry() {
        let mut store = EntryStore::new();
        let e = entry("alpha", "noun", "u1");
        let key = e.key();
        store.add(e);
        assert!(store.remove(key).is_some());
        assert!(store.remove(key).is_none());
        assert!(store.is_empty());
    }
}
