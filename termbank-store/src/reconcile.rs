//! The merge algorithm.
//!
//! A session that has made local edits folds the current on-disk snapshot
//! into its live store before saving. The merge is a one-sided,
//! tombstone-guarded union: everything new in the external snapshot is
//! imported, except what this session explicitly deleted. The external
//! side's own delete log is irrelevant here — it only matters once that
//! snapshot becomes some session's live store.
//!
//! This is not a CRDT merge: definitions are content-addressed by their
//! text, so "editing" one is delete-old + add-new, which the tombstones
//! handle. Entry attributes (category/group) are not merge-aware — an entry
//! already present locally keeps its local attributes, with no
//! reconciliation against concurrent external edits.

use crate::{AddOutcome, Dictionary, Snapshot};
use std::collections::HashMap;
use std::fmt;
use termbank_types::Fingerprint;
use tracing::debug;

/// Counts of what a reconcile imported and suppressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// External entries added to the local store.
    pub entries_imported: usize,
    /// External entries skipped because this session deleted them.
    pub entries_suppressed: usize,
    /// External definition texts added to the local store.
    pub definitions_imported: usize,
    /// External definition texts skipped because this session deleted them.
    pub definitions_suppressed: usize,
}

impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries and {} definitions imported, {} entries and {} definitions suppressed",
            self.entries_imported,
            self.definitions_imported,
            self.entries_suppressed,
            self.definitions_suppressed
        )
    }
}

/// Merges an external snapshot into the live local store, in place.
///
/// Per external entry:
/// - not present locally: skipped entirely if this session tombstoned its
///   key; otherwise imported together with all of its external definitions
///   (dedup applies, no tombstone filtering — the entry is brand new here).
/// - present locally: its external definitions are filtered through the
///   session's definition tombstones (no record for the key means nothing
///   to filter), and the remainder added under the normal dedup contract.
///
/// Filtered definition lists are built fresh; no collection is mutated
/// while being walked.
pub fn reconcile(local: &mut Dictionary, external: &Snapshot) -> MergeReport {
    // Group the external definitions by owning key up front. Definitions
    // whose entry does not appear in the external snapshot are ignored,
    // as in the original format.
    let mut external_defs: HashMap<Fingerprint, Vec<String>> = HashMap::new();
    for record in &external.definitions {
        external_defs
            .entry(record.key())
            .or_default()
            .push(record.text().to_string());
    }

    let mut report = MergeReport::default();

    for entry in &external.entries {
        let key = entry.key();
        let texts = external_defs.remove(&key).unwrap_or_default();

        if !local.contains(key) {
            if local.tombstones().entry_is_tombstoned(key) {
                report.entries_suppressed += 1;
                continue;
            }
            local.add_entry(entry.clone());
            report.entries_imported += 1;
            report.definitions_imported += count_added(local.add_definitions(key, texts));
        } else {
            let offered = texts.len();
            let kept: Vec<String> = match local.tombstones().definitions_tombstoned(key, &texts) {
                None => texts,
                Some(dead) => texts
                    .into_iter()
                    .zip(dead)
                    .filter_map(|(text, is_dead)| (!is_dead).then_some(text))
                    .collect(),
            };
            report.definitions_suppressed += offered - kept.len();
            report.definitions_imported += count_added(local.add_definitions(key, kept));
        }
    }

    debug!(%report, "reconciled external snapshot");
    report
}

fn count_added(outcomes: Vec<AddOutcome>) -> usize {
    outcomes.iter().filter(|o| o.was_added()).count()
}
