//! Bounded, branch-truncating undo/redo log.

use std::collections::VecDeque;
use std::ops::Range;

use crate::cursor::CursorPosition;
use crate::error::EditorError;

/// What produced a change. `AdaptText` entries are reflow side effects and never show up as
/// an undo step of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Unnamed,
    AppendLine,
    AdaptText,
}

/// One recorded edit: the lines in `range` were `old_state` and became `new_changes`.
///
/// `range` addresses the document *before* the edit, so `range.len() == old_state.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub range: Range<usize>,
    pub old_state: Vec<String>,
    pub new_changes: Vec<String>,
    pub old_cursor: CursorPosition,
    pub new_cursor: CursorPosition,
    pub kind: ChangeKind,
}

impl Change {
    pub fn new(
        start: usize,
        old_state: Vec<String>,
        new_changes: Vec<String>,
        old_cursor: CursorPosition,
        new_cursor: CursorPosition,
        kind: ChangeKind,
    ) -> Self {
        Self {
            range: start..start + old_state.len(),
            old_state,
            new_changes,
            old_cursor,
            new_cursor,
            kind,
        }
    }

    /// Lines the change occupies once applied.
    pub fn applied_range(&self) -> Range<usize> {
        self.range.start..self.range.start + self.new_changes.len()
    }
}

/// Linear history: entries before `applied` can be undone, the rest can be redone.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Change>,
    applied: usize,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self { entries: VecDeque::new(), applied: 0, limit: limit.max(1) }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of entries that can currently be undone.
    pub fn undo_depth(&self) -> usize {
        self.applied
    }

    /// Number of entries that can currently be redone.
    pub fn redo_depth(&self) -> usize {
        self.entries.len() - self.applied
    }

    /// Record a change, dropping the redo branch and evicting the oldest entry when full.
    pub fn add(&mut self, change: Change) {
        self.entries.truncate(self.applied);
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(change);
        self.applied = self.entries.len();
    }

    /// Step back over the most recent applied change and return it.
    pub fn undo(&mut self) -> Result<&Change, EditorError> {
        if self.applied == 0 {
            return Err(EditorError::ValueOutOfRange { what: "nothing to undo" });
        }
        self.applied -= 1;
        Ok(&self.entries[self.applied])
    }

    /// Step forward over the next undone change and return it.
    pub fn redo(&mut self) -> Result<&Change, EditorError> {
        if self.applied == self.entries.len() {
            return Err(EditorError::ValueOutOfRange { what: "nothing to redo" });
        }
        self.applied += 1;
        Ok(&self.entries[self.applied - 1])
    }

    /// The change `redo` would return next, if any.
    pub fn peek_redo(&self) -> Option<&Change> {
        self.entries.get(self.applied)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.applied = 0;
    }
}
