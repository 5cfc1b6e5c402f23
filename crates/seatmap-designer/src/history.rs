//! Snapshot history with linear undo/redo.
//!
//! Every entry is a full [`LayoutDocument`]; the cursor points at the
//! snapshot that matches the live document between gestures.

use crate::document::LayoutDocument;

/// Direction of a history move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Undo,
    Redo,
}

#[derive(Debug, Clone)]
pub struct HistoryStack {
    snapshots: Vec<LayoutDocument>,
    cursor: usize,
    max_depth: usize,
}

impl HistoryStack {
    /// Start a history whose index 0 is `initial`
    pub fn new(initial: LayoutDocument, max_depth: usize) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            max_depth: max_depth.max(1),
        }
    }

    /// Discard every entry and restart from `initial`
    pub fn reset(&mut self, initial: LayoutDocument) {
        self.snapshots.clear();
        self.snapshots.push(initial);
        self.cursor = 0;
    }

    /// Snapshot at the cursor
    pub fn current(&self) -> &LayoutDocument {
        &self.snapshots[self.cursor]
    }

    /// Record a completed operation.
    ///
    /// Returns false when `doc` equals the current snapshot. Otherwise the
    /// redo tail is dropped and the oldest entries are trimmed beyond
    /// `max_depth`.
    pub fn push(&mut self, doc: LayoutDocument) -> bool {
        if *self.current() == doc {
            return false;
        }

        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(doc);

        if self.snapshots.len() > self.max_depth {
            let excess = self.snapshots.len() - self.max_depth;
            self.snapshots.drain(..excess);
        }
        self.cursor = self.snapshots.len() - 1;
        true
    }

    /// Step back one entry; `None` at index 0
    pub fn undo(&mut self) -> Option<&LayoutDocument> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Step forward one entry; `None` at the newest entry
    pub fn redo(&mut self) -> Option<&LayoutDocument> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of undo steps available
    pub fn undo_depth(&self) -> usize {
        self.cursor
    }

    /// Number of redo steps available
    pub fn redo_depth(&self) -> usize {
        self.snapshots.len() - 1 - self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(LayoutDocument::new(), 200)
    }
}
