use std::collections::HashSet;
use std::fs;
use tempfile::tempdir;
use termbank_storage::{create_dictionary, load_snapshot, save_snapshot, StorageError};
use termbank_store::{Dictionary, Snapshot};
use termbank_types::{DefinitionRecord, Entry};

fn sample_snapshot() -> Snapshot {
    let a = Entry::new("take up", "phrasal verb", "u1").unwrap();
    let b = Entry::new("serendipity", "noun", "u2").unwrap();
    let definitions = vec![
        DefinitionRecord::new(a.key(), "start doing something").unwrap(),
        DefinitionRecord::new(a.key(), "occupy space or time").unwrap(),
        DefinitionRecord::new(b.key(), "a happy accident").unwrap(),
    ];
    Snapshot {
        entries: vec![a, b],
        definitions,
    }
}

// ── Round trips ──────────────────────────────────────────────────

#[test]
fn save_then_load_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("glossary.json");

    let original = sample_snapshot();
    save_snapshot(&path, &original).unwrap();
    let loaded = load_snapshot(&path).unwrap();

    let entries: HashSet<_> = loaded.entries.iter().map(Entry::key).collect();
    assert_eq!(
        entries,
        original.entries.iter().map(Entry::key).collect::<HashSet<_>>()
    );
    let defs: HashSet<_> = loaded
        .definitions
        .iter()
        .map(|d| (d.key(), d.text().to_string()))
        .collect();
    assert_eq!(defs.len(), 3);
    assert_eq!(
        defs,
        original
            .definitions
            .iter()
            .map(|d| (d.key(), d.text().to_string()))
            .collect()
    );
}

#[test]
fn roundtrip_through_dictionary_is_order_independent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("glossary.json");

    let dict = Dictionary::from_snapshot(sample_snapshot());
    save_snapshot(&path, &dict.to_snapshot()).unwrap();
    let restored = Dictionary::from_snapshot(load_snapshot(&path).unwrap());

    assert_eq!(restored.entry_count(), dict.entry_count());
    assert_eq!(restored.definition_count(), dict.definition_count());
    for entry in dict.entries() {
        let mut a = restored.definitions_for(entry.key()).to_vec();
        let mut b = dict.definitions_for(entry.key()).to_vec();
        a.sort();
        b.sort();
        assert_eq!(a, b, "definitions differ for {}", entry.headword());
    }
}

// ── Failure policy ───────────────────────────────────────────────

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = load_snapshot(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, StorageError::Io(_)));
}

#[test]
fn malformed_file_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    let err = load_snapshot(&path).unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn wrong_shape_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wrong.json");
    fs::write(&path, r#"{"entries": "not an array", "definitions": []}"#).unwrap();
    assert!(load_snapshot(&path).unwrap_err().is_parse());
}

#[test]
fn failed_save_leaves_previous_file_intact() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("glossary.json");
    save_snapshot(&path, &sample_snapshot()).unwrap();

    // saving into a directory that no longer exists must fail...
    let gone = dir.path().join("missing-subdir").join("glossary.json");
    assert!(save_snapshot(&gone, &Snapshot::empty()).is_err());

    // ...and the original file still loads
    let loaded = load_snapshot(&path).unwrap();
    assert_eq!(loaded.entries.len(), 2);
}

#[test]
fn no_tmp_file_left_behind_after_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("glossary.json");
    save_snapshot(&path, &sample_snapshot()).unwrap();
    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["glossary.json".to_string()]);
}

// ── Creation ─────────────────────────────────────────────────────

#[test]
fn create_writes_an_empty_dictionary() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fresh.json");
    create_dictionary(&path).unwrap();
    let loaded = load_snapshot(&path).unwrap();
    assert!(loaded.entries.is_empty());
    assert!(loaded.definitions.is_empty());
}

#[test]
fn create_refuses_to_overwrite() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("existing.json");
    save_snapshot(&path, &sample_snapshot()).unwrap();

    let err = create_dictionary(&path).unwrap_err();
    assert!(matches!(err, StorageError::AlreadyExists(_)));
    // untouched
    assert_eq!(load_snapshot(&path).unwrap().entries.len(), 2);
}
