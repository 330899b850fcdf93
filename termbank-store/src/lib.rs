//! In-memory glossary store for termbank.
//!
//! This crate owns the session-side state and the merge algorithm:
//!
//! - [`EntryStore`] — the set of entries, keyed by headword fingerprint
//! - [`DefinitionStore`] — definition texts, grouped by owning entry
//! - [`TombstoneTracker`] — what this session has deliberately deleted
//! - [`Dictionary`] — the facade tying the three together, with the
//!   dirty/clean session state
//! - [`reconcile`] — one-sided, tombstone-guarded union of an external
//!   snapshot into the live store
//!
//! The store is single-threaded and synchronous; every operation completes
//! before returning. Cross-session "concurrency" exists only over time,
//! mediated by the persisted snapshot and the tombstone merge: a session
//! that deleted something locally will not see it resurrected by a merge,
//! and a merge never drops anything another session added.

mod def_store;
mod dictionary;
mod entry_store;
mod outcome;
mod reconcile;
mod snapshot;
mod tombstones;

pub use def_store::DefinitionStore;
pub use dictionary::Dictionary;
pub use entry_store::EntryStore;
pub use outcome::{AddOutcome, RemoveOutcome};
pub use reconcile::{reconcile, MergeReport};
pub use snapshot::Snapshot;
pub use tombstones::TombstoneTracker;
