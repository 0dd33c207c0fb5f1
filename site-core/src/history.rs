//! Linear undo/redo history of whole-page component snapshots.
//!
//! The history holds an ordered list of snapshots and a cursor pointing at
//! the snapshot that matches the current page state. Pushing truncates the
//! redo tail; undo and redo move the cursor and hand back the snapshot the
//! caller should install.

use crate::component::Component;

/// Snapshot limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of snapshots kept; oldest entries are dropped first.
    /// Zero means unbounded.
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_entries: 100 }
    }
}

impl HistoryConfig {
    /// Create a config with the given limit.
    #[must_use]
    pub const fn with_max_entries(max_entries: usize) -> Self {
        Self { max_entries }
    }
}

/// Undo/redo history for the current page.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Vec<Component>>,
    cursor: usize,
    config: HistoryConfig,
}

impl History {
    /// Create a history seeded with one snapshot.
    #[must_use]
    pub fn new(initial: Vec<Component>, config: HistoryConfig) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            config,
        }
    }

    /// Discard everything and start over from a single snapshot.
    pub fn reset(&mut self, initial: Vec<Component>) {
        self.entries.clear();
        self.entries.push(initial);
        self.cursor = 0;
    }

    /// Record a snapshot after the cursor, dropping any redo tail.
    ///
    /// Returns `false` when the snapshot equals the one at the cursor.
    pub fn push(&mut self, snapshot: Vec<Component>) -> bool {
        if self.current() == Some(snapshot.as_slice()) {
            return false;
        }

        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        self.cursor = self.entries.len() - 1;

        let max = self.config.max_entries;
        if max > 0 && self.entries.len() > max {
            let excess = self.entries.len() - max;
            self.entries.drain(..excess);
            self.cursor -= excess;
        }
        true
    }

    /// Step back one snapshot, returning the state to install.
    pub fn undo(&mut self) -> Option<&[Component]> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.current()
    }

    /// Step forward one snapshot, returning the state to install.
    pub fn redo(&mut self) -> Option<&[Component]> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.current()
    }

    /// Snapshot at the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&[Component]> {
        self.entries.get(self.cursor).map(Vec::as_slice)
    }

    /// Whether an earlier snapshot exists.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether a later snapshot exists.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a history holds at least one snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the cursor.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> HistoryConfig {
        self.config
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Vec::new(), HistoryConfig::default())
    }
}
