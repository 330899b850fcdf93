//! The editing session: one open dictionary, its path, and its sharing mode.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use termbank_storage::{load_snapshot, save_snapshot};
use termbank_store::{reconcile, Dictionary, MergeReport};
use tracing::info;

/// How the dictionary file is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Sole editor; save writes directly.
    Offline,
    /// The file may have been edited by other sessions; save re-loads the
    /// on-disk snapshot and reconciles before writing.
    Online,
}

/// A dictionary opened by this session.
#[derive(Debug)]
pub struct OpenDictionary {
    path: PathBuf,
    mode: Mode,
    dictionary: Dictionary,
}

impl OpenDictionary {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    #[must_use]
    pub fn dictionary_mut(&mut self) -> &mut Dictionary {
        &mut self.dictionary
    }
}

/// Context object handed to every command handler.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<OpenDictionary>,
}

impl Session {
    /// A session with no dictionary open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a dictionary file into this session, replacing any dictionary
    /// already open.
    pub fn open(&mut self, path: PathBuf, mode: Mode) -> Result<()> {
        let snapshot = load_snapshot(&path)
            .with_context(|| format!("could not load dictionary {}", path.display()))?;
        let dictionary = Dictionary::from_snapshot(snapshot);
        info!(
            path = %path.display(),
            entries = dictionary.entry_count(),
            "dictionary opened"
        );
        self.current = Some(OpenDictionary {
            path,
            mode,
            dictionary,
        });
        Ok(())
    }

    /// The open dictionary, or an error telling the user to open one first.
    pub fn require_open(&mut self) -> Result<&mut OpenDictionary> {
        match self.current.as_mut() {
            Some(open) => Ok(open),
            None => bail!("no dictionary open (use `open <path>` or `new <path>`)"),
        }
    }

    #[must_use]
    pub fn open_dictionary(&self) -> Option<&OpenDictionary> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Persists the open dictionary.
    ///
    /// In online mode the current on-disk snapshot is loaded and reconciled
    /// into the live store first, so edits from other sessions survive and
    /// this session's deletes stay deleted. A failed load or write leaves
    /// the in-memory store's saved/dirty state unchanged.
    pub fn save(&mut self) -> Result<Option<MergeReport>> {
        let open = self.require_open()?;
        let report = match open.mode {
            Mode::Offline => None,
            Mode::Online => {
                let on_disk = load_snapshot(&open.path).with_context(|| {
                    format!(
                        "could not re-load {} for reconciliation",
                        open.path.display()
                    )
                })?;
                Some(reconcile(&mut open.dictionary, &on_disk))
            }
        };
        save_snapshot(&open.path, &open.dictionary.to_snapshot())
            .with_context(|| format!("could not write {}", open.path.display()))?;
        open.dictionary.mark_saved();
        info!(path = %open.path.display(), "dictionary saved");
        Ok(report)
    }

    /// Abandons all session changes, reloading the dictionary from disk and
    /// dropping every tombstone.
    pub fn discard(&mut self) -> Result<()> {
        let open = self.require_open()?;
        let snapshot = load_snapshot(&open.path)
            .with_context(|| format!("could not re-load {}", open.path.display()))?;
        open.dictionary = Dictionary::from_snapshot(snapshot);
        info!(path = %open.path.display(), "session changes discarded");
        Ok(())
    }
}
