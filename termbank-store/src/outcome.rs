//! Per-item outcomes for batch add/remove operations.
//!
//! Duplicate adds and missing removes are expected, common cases — they are
//! reported as outcomes, never as errors, matching the idempotent-union
//! design of the merge.

/// Outcome of inserting one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The item was not present and has been inserted.
    Added,
    /// An equal item already existed; the store is unchanged.
    AlreadyPresent,
}

impl AddOutcome {
    #[must_use]
    pub fn was_added(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Outcome of removing one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The item existed and has been removed.
    Removed,
    /// No such item; the store is unchanged.
    NotFound,
}

impl RemoveOutcome {
    #[must_use]
    pub fn was_removed(self) -> bool {
        matches!(self, Self::Removed)
    }
}
