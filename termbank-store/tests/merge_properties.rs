//! Property tests for the tombstone-guarded merge.

use proptest::prelude::*;
use std::collections::HashSet;
use termbank_store::{reconcile, Dictionary, Snapshot};
use termbank_types::{DefinitionRecord, Entry};

fn word() -> impl Strategy<Value = String> {
    "[a-f]{1,4}"
}

fn snapshot_from_words(words: &HashSet<String>) -> Snapshot {
    let entries: Vec<Entry> = words
        .iter()
        .map(|w| Entry::new(w.clone(), "cat", "grp").unwrap())
        .collect();
    let definitions = entries
        .iter()
        .map(|e| DefinitionRecord::new(e.key(), format!("def of {}", e.headword())).unwrap())
        .collect();
    Snapshot {
        entries,
        definitions,
    }
}

proptest! {
    // After a merge, the local headword set is exactly
    // (local ∪ external) − locally-deleted.
    #[test]
    fn merge_is_tombstone_filtered_union(
        local_words in prop::collection::hash_set(word(), 0..12),
        external_words in prop::collection::hash_set(word(), 0..12),
        deleted_picks in prop::collection::vec(any::<prop::sample::Index>(), 0..4),
    ) {
        let mut local = Dictionary::from_snapshot(snapshot_from_words(&local_words));

        // delete a few local entries to create tombstones
        let mut deleted: HashSet<String> = HashSet::new();
        let local_list: Vec<&String> = local_words.iter().collect();
        for pick in &deleted_picks {
            if local_list.is_empty() {
                break;
            }
            let w = local_list[pick.index(local_list.len())];
            local.remove_entry(Entry::new(w.clone(), "", "").unwrap().key());
            deleted.insert(w.clone());
        }

        reconcile(&mut local, &snapshot_from_words(&external_words));

        let got: HashSet<String> =
            local.entries().map(|e| e.headword().to_string()).collect();
        let expected: HashSet<String> = local_words
            .union(&external_words)
            .filter(|w| !deleted.contains(*w))
            .cloned()
            .collect();
        prop_assert_eq!(got, expected);
    }

    // Merging the same snapshot twice changes nothing the second time.
    #[test]
    fn merge_is_idempotent(
        local_words in prop::collection::hash_set(word(), 0..8),
        external_words in prop::collection::hash_set(word(), 0..8),
    ) {
        let mut local = Dictionary::from_snapshot(snapshot_from_words(&local_words));
        let external = snapshot_from_words(&external_words);

        reconcile(&mut local, &external);
        let entries_after_first = local.entry_count();
        let defs_after_first = local.definition_count();

        let second = reconcile(&mut local, &external);
        prop_assert_eq!(second.entries_imported, 0);
        prop_assert_eq!(second.definitions_imported, 0);
        prop_assert_eq!(local.entry_count(), entries_after_first);
        prop_assert_eq!(local.definition_count(), defs_after_first);
    }

    // A merge never removes anything from the local store.
    #[test]
    fn merge_never_deletes(
        local_words in prop::collection::hash_set(word(), 0..8),
        external_words in prop::collection::hash_set(word(), 0..8),
    ) {
        let mut local = Dictionary::from_snapshot(snapshot_from_words(&local_words));
        reconcile(&mut local, &snapshot_from_words(&external_words));
        for w in &local_words {
            let key = Entry::new(w.clone(), "", "").unwrap().key();
            prop_assert!(local.get(key).is_some());
        }
    }
}
