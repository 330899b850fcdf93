//! Snapshot persistence for termbank.
//!
//! The dictionary file is a flat JSON document holding every entry record
//! followed by every definition record (order carries no meaning on reload).
//! This crate is the only place that touches the filesystem; the store
//! itself never does.
//!
//! Failure policy: a load either produces a complete [`Snapshot`] or an
//! error — never a half-read result. A save writes to a sibling temp file
//! and renames it into place, so a failed write leaves the previous
//! dictionary file intact.

mod error;

pub use error::{StorageError, StorageResult};

use std::fs;
use std::path::Path;
use termbank_store::Snapshot;
use tracing::debug;

/// Loads a snapshot from a dictionary file.
///
/// An unreadable file surfaces as [`StorageError::Io`]; a readable but
/// malformed one as [`StorageError::Parse`].
pub fn load_snapshot(path: &Path) -> StorageResult<Snapshot> {
    let raw = fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&raw)?;
    debug!(
        path = %path.display(),
        entries = snapshot.entries.len(),
        definitions = snapshot.definitions.len(),
        "loaded dictionary snapshot"
    );
    Ok(snapshot)
}

/// Writes a snapshot to a dictionary file.
///
/// The document is written to `<file>.tmp` beside the target and renamed
/// into place, replacing any previous version atomically on platforms where
/// rename is atomic.
pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> StorageResult<()> {
    let doc = serde_json::to_string_pretty(snapshot)?;
    let tmp = sibling_tmp_path(path);
    fs::write(&tmp, doc)?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    debug!(
        path = %path.display(),
        entries = snapshot.entries.len(),
        definitions = snapshot.definitions.len(),
        "saved dictionary snapshot"
    );
    Ok(())
}

/// Creates a new, empty dictionary file.
///
/// Refuses to overwrite: an existing file at `path` is an error.
pub fn create_dictionary(path: &Path) -> StorageResult<()> {
    if path.exists() {
        return Err(StorageError::AlreadyExists(path.to_path_buf()));
    }
    save_snapshot(path, &Snapshot::empty())
}

fn sibling_tmp_path(path: &Path) -> std::path::PathBuf {
    let mut name = path.file_name().map_or_else(
        || std::ffi::OsString::from("dictionary"),
        ToOwned::to_owned,
    );
    name.push(".tmp");
    path.with_file_name(name)
}
