//! Cursor over the display form of the document.
//!
//! `left` is a column in the *display* line, gutter included, so it is never smaller than the
//! prefix length. Horizontal moves that fall off either end of a line continue on the
//! neighbouring line, which makes the list of independently prefixed lines feel like one
//! continuous text.

use crate::error::EditorError;
use crate::formatter::{index_to_line_number, Formatter};

/// Position of the cursor: row index and display column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    pub top: usize,
    pub left: usize,
}

impl CursorPosition {
    pub fn new(top: usize, left: usize) -> Self {
        Self { top, left }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Cursor {
    pos: CursorPosition,
}

impl Cursor {
    /// A cursor at the start of the first line's content.
    pub fn at_start(lines: &[String]) -> Self {
        let left = crate::formatter::gutter_width(lines.len());
        Self { pos: CursorPosition::new(0, left) }
    }

    pub fn position(&self) -> CursorPosition {
        self.pos
    }

    pub fn top(&self) -> usize {
        self.pos.top
    }

    pub fn left(&self) -> usize {
        self.pos.left
    }

    /// Place the cursor without any validation. Used when restoring recorded snapshots.
    pub fn restore(&mut self, pos: CursorPosition) {
        self.pos = pos;
    }

    /// Move to row `position`, keeping the column when it still fits on that row.
    pub fn set_top(&mut self, lines: &[String], position: usize) -> Result<(), EditorError> {
        let f = Formatter::new(lines);
        if position >= lines.len() {
            return Err(EditorError::OutOfBufferRange {
                line: index_to_line_number(position),
                size: lines.len(),
            });
        }
        let old_prefix = f.prefix_length(index_to_line_number(self.pos.top.min(lines.len() - 1)))?;
        let target = index_to_line_number(position);
        let target_prefix = f.prefix_length(target)?;
        let target_empty = f.content(target)?.is_empty();
        let target_len = f.display_len(target)?;

        let at_line_start = self.pos.left == old_prefix;
        self.pos.top = position;
        // start of content stays start of content; an empty line only has that one column
        self.pos.left = if at_line_start || target_empty {
            target_prefix
        } else if self.pos.left >= target_len {
            target_len - 1
        } else if self.pos.left < target_prefix {
            target_prefix
        } else {
            self.pos.left
        };
        Ok(())
    }

    /// Move to display column `position`, wrapping onto the next or previous line when the
    /// column falls outside the current one.
    pub fn set_left(&mut self, lines: &[String], position: usize) -> Result<(), EditorError> {
        let f = Formatter::new(lines);
        let line_number = index_to_line_number(self.pos.top);
        let prefix = f.prefix_length(line_number)?;
        let len = f.display_len(line_number)?;
        let is_last = self.pos.top + 1 == lines.len();
        let is_first = self.pos.top == 0;

        if position > len - 1 {
            if !is_last {
                let next = line_number + 1;
                self.pos = CursorPosition::new(self.pos.top + 1, f.prefix_length(next)?);
            }
        } else if position < prefix {
            if !is_first {
                let prev = line_number - 1;
                self.pos = CursorPosition::new(self.pos.top - 1, f.display_len(prev)? - 1);
            }
        } else {
            self.pos.left = position;
        }
        Ok(())
    }

    pub fn inc_left(&mut self, lines: &[String]) -> Result<(), EditorError> {
        self.set_left(lines, self.pos.left + 1)
    }

    pub fn dec_left(&mut self, lines: &[String]) -> Result<(), EditorError> {
        self.set_left(lines, self.pos.left.saturating_sub(1))
    }

    pub fn inc_top(&mut self, lines: &[String]) -> Result<(), EditorError> {
        self.set_top(lines, self.pos.top + 1)
    }

    pub fn dec_top(&mut self, lines: &[String]) -> Result<(), EditorError> {
        match self.pos.top.checked_sub(1) {
            Some(top) => self.set_top(lines, top),
            None => Err(EditorError::OutOfBufferRange { line: 0, size: lines.len() }),
        }
    }

    /// Pull the cursor back inside the document after lines were removed.
    pub fn clamp(&mut self, lines: &[String]) {
        let f = Formatter::new(lines);
        let top = self.pos.top.min(lines.len().saturating_sub(1));
        let line_number = index_to_line_number(top);
        let prefix = f.prefix_length(line_number).unwrap_or(0);
        let max_left = f.display_len(line_number).map_or(prefix, |len| len - 1);
        self.pos = CursorPosition::new(top, self.pos.left.clamp(prefix, max_left));
    }
}
