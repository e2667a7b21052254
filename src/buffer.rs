//! The document buffer: the line list plus the cursor and history that edit it.

use std::ops::Range;

use crate::cursor::{Cursor, CursorPosition};
use crate::error::EditorError;
use crate::formatter::{self, gutter_width, index_to_line_number, line_number_to_index, Formatter};
use crate::history::{Change, ChangeKind, History};
use crate::utils::{char_len, char_to_byte_index, split_lines};

/// The mutable document.
///
/// The document is never empty: every path that could remove the last line leaves a single
/// empty line behind instead. Every mutator except [`TextBuffer::replace_line_at`] records
/// a [`Change`] so it can be undone.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    lines: Vec<String>,
    cursor: Cursor,
    history: History,
}

impl TextBuffer {
    /// Create a new empty buffer with a single empty line.
    pub fn new(history_limit: usize) -> Self {
        Self::from_lines(vec![String::new()], history_limit)
    }

    /// Build a buffer from file contents.
    pub fn from_string(s: &str, history_limit: usize) -> Self {
        Self::from_lines(split_lines(s), history_limit)
    }

    fn from_lines(mut lines: Vec<String>, history_limit: usize) -> Self {
        if lines.is_empty() {
            lines.push(String::new());
        }
        let cursor = Cursor::at_start(&lines);
        Self { lines, cursor, history: History::new(history_limit) }
    }

    fn formatter(&self) -> Formatter<'_> {
        Formatter::new(&self.lines)
    }

    // ==================== read accessors ====================

    /// The document joined with `\n`.
    pub fn text(&self) -> String {
        self.formatter().text()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn code_with_line_numbers(&self) -> String {
        self.formatter().code_with_line_numbers()
    }

    /// Content of the row the cursor is on.
    pub fn current_line(&self) -> &str {
        &self.lines[self.cursor.top()]
    }

    pub fn size(&self) -> usize {
        self.lines.len()
    }

    pub fn line_at(&self, line_number: usize) -> Result<&str, EditorError> {
        self.formatter().content(line_number)
    }

    pub fn cursor_position(&self) -> CursorPosition {
        self.cursor.position()
    }

    pub fn cursor_position_from_top(&self) -> usize {
        self.cursor.top()
    }

    pub fn cursor_position_from_left(&self) -> usize {
        self.cursor.left()
    }

    /// Current gutter width; identical for every line.
    pub fn prefix_length(&self) -> usize {
        gutter_width(self.lines.len())
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    // ==================== cursor movement ====================

    pub fn set_cursor_position_from_top(&mut self, top: usize) -> Result<(), EditorError> {
        self.cursor.set_top(&self.lines, top)
    }

    pub fn set_cursor_position_from_left(&mut self, left: usize) -> Result<(), EditorError> {
        self.cursor.set_left(&self.lines, left)
    }

    pub fn move_left(&mut self) -> Result<(), EditorError> {
        self.cursor.dec_left(&self.lines)
    }

    pub fn move_right(&mut self) -> Result<(), EditorError> {
        self.cursor.inc_left(&self.lines)
    }

    pub fn move_up(&mut self) -> Result<(), EditorError> {
        self.cursor.dec_top(&self.lines)
    }

    pub fn move_down(&mut self) -> Result<(), EditorError> {
        self.cursor.inc_top(&self.lines)
    }

    // ==================== recording helpers ====================

    fn record(&mut self, start: usize, old: Vec<String>, new: Vec<String>, old_cursor: CursorPosition, kind: ChangeKind) {
        let change = Change::new(start, old, new, old_cursor, self.cursor.position(), kind);
        self.history.add(change);
    }

    /// Shift the cursor column after the gutter changed width.
    fn reprefix(&mut self, old_prefix: usize) {
        let pos = self.cursor.position();
        let left = pos.left.saturating_sub(old_prefix) + self.prefix_length();
        self.cursor.restore(CursorPosition::new(pos.top, left));
    }

    fn check_line(&self, line_number: usize) -> Result<(), EditorError> {
        self.formatter().content(line_number).map(|_| ())
    }

    /// Insert whole lines at `index`, keeping the cursor on the text it was on.
    fn insert_lines(&mut self, index: usize, new: Vec<String>) {
        if new.is_empty() {
            return;
        }
        let old_cursor = self.cursor.position();
        let old_prefix = self.prefix_length();
        let count = new.len();
        self.lines.splice(index..index, new.iter().cloned());
        if index <= old_cursor.top {
            self.cursor.restore(CursorPosition::new(old_cursor.top + count, old_cursor.left));
        }
        self.reprefix(old_prefix);
        self.record(index, Vec::new(), new, old_cursor, ChangeKind::Unnamed);
    }

    // ==================== line-level edits ====================

    /// Insert `line` as a new line at the cursor row.
    pub fn write(&mut self, line: &str) {
        self.insert_lines(self.cursor.top(), vec![line.to_string()]);
    }

    pub fn write_after(&mut self, line_number: usize, line: &str) -> Result<(), EditorError> {
        self.check_line(line_number)?;
        self.insert_lines(line_number, vec![line.to_string()]);
        Ok(())
    }

    pub fn write_before(&mut self, line_number: usize, line: &str) -> Result<(), EditorError> {
        self.check_line(line_number)?;
        self.insert_lines(line_number_to_index(line_number), vec![line.to_string()]);
        Ok(())
    }

    /// Add an empty line at the end of the document.
    pub fn increase_buffer_size(&mut self) {
        self.insert_lines(self.lines.len(), vec![String::new()]);
    }

    /// Remove one line. The only line of the document can't be removed this way.
    pub fn remove_line_at(&mut self, line_number: usize) -> Result<(), EditorError> {
        self.check_line(line_number)?;
        if self.lines.len() == 1 {
            return Err(EditorError::OutOfBufferRange { line: line_number, size: 1 });
        }
        let old_cursor = self.cursor.position();
        let old_prefix = self.prefix_length();
        let index = line_number_to_index(line_number);
        let removed = self.lines.remove(index);
        self.reprefix(old_prefix);
        self.cursor.clamp(&self.lines);
        self.record(index, vec![removed], Vec::new(), old_cursor, ChangeKind::Unnamed);
        Ok(())
    }

    /// Remove the lines `[start, end)` (1-based line numbers).
    ///
    /// Removing every line leaves one empty line and puts the cursor at its start.
    pub fn remove_text_block(&mut self, block: Range<usize>) -> Result<(), EditorError> {
        if block.start == 0 || block.end == 0 || block.start > block.end {
            return Err(EditorError::ValueOutOfRange { what: "invalid block range" });
        }
        if block.end > self.lines.len() + 1 {
            return Err(EditorError::OutOfBufferRange { line: block.end - 1, size: self.lines.len() });
        }
        if block.is_empty() {
            return Ok(());
        }
        let old_cursor = self.cursor.position();
        let start = line_number_to_index(block.start);
        let end = line_number_to_index(block.end);

        if start == 0 && end == self.lines.len() {
            let removed = std::mem::replace(&mut self.lines, vec![String::new()]);
            self.cursor = Cursor::at_start(&self.lines);
            self.record(0, removed, vec![String::new()], old_cursor, ChangeKind::Unnamed);
            return Ok(());
        }

        let old_prefix = self.prefix_length();
        let removed: Vec<String> = self.lines.drain(start..end).collect();
        self.reprefix(old_prefix);
        self.cursor.clamp(&self.lines);
        self.record(start, removed, Vec::new(), old_cursor, ChangeKind::Unnamed);
        Ok(())
    }

    /// Overwrite a line in place. Not recorded in history.
    pub fn replace_line_at(&mut self, line_number: usize, text: &str) -> Result<(), EditorError> {
        self.check_line(line_number)?;
        self.lines[line_number_to_index(line_number)] = text.to_string();
        self.cursor.clamp(&self.lines);
        Ok(())
    }

    /// Swap in a whole new document (file load). Resets cursor and history.
    pub fn replace_current_content_by(&mut self, lines: Vec<String>) {
        self.lines = if lines.is_empty() { vec![String::new()] } else { lines };
        self.cursor = Cursor::at_start(&self.lines);
        self.history.clear();
    }

    // ==================== character-level edits ====================

    /// Insert `text` at the cursor and advance past it.
    pub fn append_line(&mut self, text: &str) -> Result<(), EditorError> {
        let old_cursor = self.cursor.position();
        let top = old_cursor.top;
        let updated = self.formatter().insert_at(text, top, old_cursor.left)?;
        let old = std::mem::replace(&mut self.lines[top], updated.clone());
        self.cursor.restore(CursorPosition::new(top, old_cursor.left + char_len(text)));
        self.record(top, vec![old], vec![updated], old_cursor, ChangeKind::AppendLine);
        Ok(())
    }

    /// Split the current line at the cursor.
    pub fn enter(&mut self) -> Result<(), EditorError> {
        let old_cursor = self.cursor.position();
        let top = old_cursor.top;
        let at = old_cursor.left.saturating_sub(self.prefix_length());
        let line = self.lines[top].clone();
        let split = char_to_byte_index(&line, at);
        let (head, tail) = (line[..split].to_string(), line[split..].to_string());

        self.lines[top].clone_from(&head);
        self.lines.insert(top + 1, tail.clone());
        let prefix = self.formatter().prefix_length(index_to_line_number(top + 1))?;
        self.cursor.restore(CursorPosition::new(top + 1, prefix));
        self.record(top, vec![line], vec![head, tail], old_cursor, ChangeKind::Unnamed);
        Ok(())
    }

    /// Delete the char left of the cursor, or join the line onto the previous one when the
    /// cursor sits at the start of the content.
    pub fn backspace(&mut self) -> Result<(), EditorError> {
        let old_cursor = self.cursor.position();
        let top = old_cursor.top;
        let prefix = self.prefix_length();

        if old_cursor.left <= prefix {
            if top == 0 {
                return Ok(());
            }
            let prev = self.lines[top - 1].clone();
            let cur = self.lines.remove(top);
            let junction = char_len(&prev);
            let merged = format!("{prev}{cur}");
            self.lines[top - 1].clone_from(&merged);
            let left = self.prefix_length() + junction;
            self.cursor.restore(CursorPosition::new(top - 1, left));
            self.record(top - 1, vec![prev, cur], vec![merged], old_cursor, ChangeKind::Unnamed);
            return Ok(());
        }

        let old = self.lines[top].clone();
        let at = old_cursor.left - prefix - 1;
        let line = &mut self.lines[top];
        let start = char_to_byte_index(line, at);
        let end = char_to_byte_index(line, at + 1);
        line.replace_range(start..end, "");
        let updated = line.clone();
        self.cursor.restore(CursorPosition::new(top, old_cursor.left - 1));
        self.record(top, vec![old], vec![updated], old_cursor, ChangeKind::Unnamed);
        Ok(())
    }

    /// Insert `text` as whole lines at the cursor row.
    pub fn paste_text(&mut self, text: &str) {
        self.insert_lines(self.cursor.top(), split_lines(text));
    }

    // ==================== reflow ====================

    /// Reflow until no line is wider than `max_width` (gutter included).
    ///
    /// Records a single `AdaptText` change holding both full snapshots. The cursor follows
    /// the char it was on, even when that char moved onto a following line.
    pub fn adapt_text_for_buffer_size(&mut self, max_width: usize) -> bool {
        let before = self.lines.clone();
        let old_cursor = self.cursor.position();
        let old_prefix = self.prefix_length();

        let mut changed = false;
        while formatter::reflow(&mut self.lines, max_width) {
            changed = true;
        }
        if !changed {
            return false;
        }

        let row_len = char_len(&before[old_cursor.top]);
        let offset = old_cursor.left.saturating_sub(old_prefix).min(row_len);
        let at_row_end = offset == row_len;
        let target = before[..old_cursor.top].iter().map(|l| char_len(l)).sum::<usize>() + offset;

        // Reflow keeps the concatenated text and only pushes chars forward, so the cursor's
        // char is found at the same absolute offset on its old row or a later one.
        let mut top = old_cursor.top;
        let mut start: usize = self.lines[..top].iter().map(|l| char_len(l)).sum();
        loop {
            let end = start + char_len(&self.lines[top]);
            if target < end || (at_row_end && target == end) || top + 1 == self.lines.len() {
                break;
            }
            start = end;
            top += 1;
        }
        let left = self.prefix_length() + (target - start).min(char_len(&self.lines[top]));
        self.cursor.restore(CursorPosition::new(top, left));

        let after = self.lines.clone();
        self.record(0, before, after, old_cursor, ChangeKind::AdaptText);
        true
    }

    /// Add an empty last line and move the cursor onto it, for a cursor pushed past the right
    /// edge. Recorded as reflow, so it undoes together with the edit that caused it.
    pub fn overflow_onto_new_line(&mut self) {
        let old_cursor = self.cursor.position();
        let index = self.lines.len();
        self.lines.push(String::new());
        self.cursor.restore(CursorPosition::new(index, self.prefix_length()));
        self.record(index, Vec::new(), vec![String::new()], old_cursor, ChangeKind::AdaptText);
    }

    // ==================== history ====================

    fn apply(&mut self, change: &Change) {
        self.lines.splice(change.range.clone(), change.new_changes.iter().cloned());
        self.cursor.restore(change.new_cursor);
    }

    fn revert(&mut self, change: &Change) {
        self.lines.splice(change.applied_range(), change.old_state.iter().cloned());
        self.cursor.restore(change.old_cursor);
    }

    /// Undo the last visible change. Reflow entries are undone together with the edit that
    /// caused them.
    pub fn undo(&mut self) -> Result<(), EditorError> {
        let change = self.history.undo()?.clone();
        self.revert(&change);
        if change.kind == ChangeKind::AdaptText {
            ignore_exhausted(self.undo())?;
        }
        Ok(())
    }

    /// Redo the next visible change together with any reflow that followed it.
    pub fn redo(&mut self) -> Result<(), EditorError> {
        let change = self.history.redo()?.clone();
        self.apply(&change);
        if change.kind == ChangeKind::AdaptText {
            return ignore_exhausted(self.redo());
        }
        while self.history.peek_redo().is_some_and(|c| c.kind == ChangeKind::AdaptText) {
            let next = self.history.redo()?.clone();
            self.apply(&next);
        }
        Ok(())
    }
}

/// A chained history step that runs off the end of the log is not an error: the step that
/// started the chain already happened.
fn ignore_exhausted(result: Result<(), EditorError>) -> Result<(), EditorError> {
    match result {
        Err(EditorError::ValueOutOfRange { .. }) => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> TextBuffer {
        TextBuffer::from_string(text, 100)
    }

    fn lines(buf: &TextBuffer) -> Vec<&str> {
        buf.lines().iter().map(String::as_str).collect()
    }

    /// Apply `edit`, undo it, and check both document and cursor are back.
    fn assert_undoes(mut buf: TextBuffer, edit: impl FnOnce(&mut TextBuffer)) {
        let text = buf.text();
        let pos = buf.cursor_position();
        edit(&mut buf);
        buf.undo().unwrap();
        assert_eq!(buf.text(), text);
        assert_eq!(buf.cursor_position(), pos);
    }

    // ==================== creation / accessors ====================

    #[test]
    fn new_buffer_has_one_empty_line() {
        let buf = TextBuffer::new(10);
        assert_eq!(buf.size(), 1);
        assert_eq!(buf.current_line(), "");
        assert_eq!(buf.cursor_position(), CursorPosition::new(0, 5));
    }

    #[test]
    fn line_at_matches_line_sequence() {
        let buf = buffer("one\ntwo\nthree");
        for n in 1..=buf.size() {
            assert_eq!(buf.line_at(n).unwrap(), buf.lines()[n - 1]);
        }
        assert!(buf.line_at(0).is_err());
        assert!(buf.line_at(4).is_err());
    }

    #[test]
    fn code_with_line_numbers_scenario() {
        let buf = buffer("abc\nde");
        assert_eq!(buf.code_with_line_numbers(), "  1 |abc\n  2 |de");
    }

    // ==================== character edits ====================

    #[test]
    fn append_line_in_the_middle_and_undo() {
        let mut buf = buffer("----------");
        buf.set_cursor_position_from_left(10).unwrap();
        buf.append_line("X").unwrap();
        assert_eq!(buf.current_line(), "-----X-----");
        assert_eq!(buf.cursor_position_from_left(), 11);
        buf.undo().unwrap();
        assert_eq!(buf.current_line(), "----------");
        assert_eq!(buf.cursor_position_from_left(), 10);
    }

    #[test]
    fn typing_advances_cursor() {
        let mut buf = TextBuffer::new(10);
        for ch in ["h", "i", "!"] {
            buf.append_line(ch).unwrap();
        }
        assert_eq!(buf.text(), "hi!");
        assert_eq!(buf.cursor_position(), CursorPosition::new(0, 8));
    }

    #[test]
    fn backspace_joins_lines() {
        let mut buf = buffer("abc\ndef");
        buf.set_cursor_position_from_top(1).unwrap();
        buf.backspace().unwrap();
        assert_eq!(lines(&buf), vec!["abcdef"]);
        assert_eq!(buf.cursor_position(), CursorPosition::new(0, 5 + 3));
    }

    #[test]
    fn backspace_mid_line_deletes_left_char() {
        let mut buf = buffer("héllo");
        buf.set_cursor_position_from_left(7).unwrap();
        buf.backspace().unwrap();
        assert_eq!(buf.current_line(), "hllo");
        assert_eq!(buf.cursor_position_from_left(), 6);
    }

    #[test]
    fn backspace_at_document_start_is_noop() {
        let mut buf = buffer("abc");
        buf.backspace().unwrap();
        assert_eq!(buf.text(), "abc");
        assert!(buf.history().is_empty());
    }

    #[test]
    fn enter_splits_line() {
        let mut buf = buffer("hello world");
        buf.set_cursor_position_from_left(10).unwrap();
        buf.enter().unwrap();
        assert_eq!(lines(&buf), vec!["hello", " world"]);
        assert_eq!(buf.cursor_position(), CursorPosition::new(1, 5));
    }

    #[test]
    fn enter_across_ten_lines_widens_prefix() {
        let mut buf = buffer(&"x\n".repeat(8));
        assert_eq!(buf.size(), 9);
        buf.enter().unwrap();
        assert_eq!(buf.size(), 10);
        assert_eq!(buf.cursor_position(), CursorPosition::new(1, 6));
    }

    // ==================== line edits ====================

    #[test]
    fn write_before_and_after() {
        let mut buf = buffer("b");
        buf.write_before(1, "a").unwrap();
        buf.write_after(2, "c").unwrap();
        assert_eq!(lines(&buf), vec!["a", "b", "c"]);
        assert_eq!(buf.current_line(), "b");
        assert!(buf.write_after(4, "z").is_err());
        assert!(buf.write_before(0, "z").is_err());
    }

    #[test]
    fn write_inserts_at_cursor_row() {
        let mut buf = buffer("first\nsecond");
        buf.set_cursor_position_from_top(1).unwrap();
        buf.write("new");
        assert_eq!(lines(&buf), vec!["first", "new", "second"]);
        assert_eq!(buf.current_line(), "second");
    }

    #[test]
    fn remove_line_at_reclamps_cursor() {
        let mut buf = buffer("a\nb\nc");
        buf.set_cursor_position_from_top(2).unwrap();
        buf.remove_line_at(3).unwrap();
        assert_eq!(lines(&buf), vec!["a", "b"]);
        assert_eq!(buf.cursor_position_from_top(), 1);
    }

    #[test]
    fn remove_line_at_rejects_last_remaining_line() {
        let mut buf = buffer("only");
        assert_eq!(buf.remove_line_at(1), Err(EditorError::OutOfBufferRange { line: 1, size: 1 }));
        assert_eq!(buf.remove_line_at(2), Err(EditorError::OutOfBufferRange { line: 2, size: 1 }));
        assert_eq!(buf.text(), "only");
    }

    #[test]
    fn remove_whole_block_leaves_one_empty_line() {
        let mut buf = buffer("a\nb\nc");
        buf.set_cursor_position_from_top(2).unwrap();
        buf.remove_text_block(1..4).unwrap();
        assert_eq!(lines(&buf), vec![""]);
        assert_eq!(buf.cursor_position(), CursorPosition::new(0, 5));
    }

    #[test]
    fn remove_partial_block() {
        let mut buf = buffer("a\nb\nc\nd");
        buf.remove_text_block(2..4).unwrap();
        assert_eq!(lines(&buf), vec!["a", "d"]);
    }

    #[test]
    fn remove_block_validates_pointers() {
        let mut buf = buffer("a\nb");
        let invalid = EditorError::ValueOutOfRange { what: "invalid block range" };
        assert_eq!(buf.remove_text_block(0..2), Err(invalid.clone()));
        assert_eq!(buf.remove_text_block(2..1), Err(invalid));
        assert!(buf.remove_text_block(1..5).is_err());
        assert_eq!(buf.text(), "a\nb");
    }

    #[test]
    fn replace_line_at_is_not_recorded() {
        let mut buf = buffer("a\nb");
        buf.replace_line_at(2, "B").unwrap();
        assert_eq!(buf.text(), "a\nB");
        assert!(buf.history().is_empty());
        assert!(buf.undo().is_err());
    }

    #[test]
    fn paste_inserts_lines_above_cursor_row() {
        let mut buf = buffer("keep");
        buf.paste_text("one\ntwo");
        assert_eq!(lines(&buf), vec!["one", "two", "keep"]);
        assert_eq!(buf.cursor_position(), CursorPosition::new(2, 5));
    }

    #[test]
    fn paste_shifts_column_by_prefix_delta() {
        let mut buf = buffer(&"x\n".repeat(8));
        buf.set_cursor_position_from_left(6).unwrap();
        buf.paste_text("p\nq");
        assert_eq!(buf.size(), 11);
        assert_eq!(buf.cursor_position(), CursorPosition::new(2, 7));
    }

    #[test]
    fn replace_content_resets_state() {
        let mut buf = buffer("a");
        buf.append_line("b").unwrap();
        buf.replace_current_content_by(vec![]);
        assert_eq!(lines(&buf), vec![""]);
        assert!(buf.history().is_empty());
    }

    // ==================== undo / redo ====================

    #[test]
    fn every_recorded_mutation_undoes_exactly() {
        assert_undoes(buffer("abc\ndef"), |b| b.append_line("zz").unwrap());
        assert_undoes(buffer("abc\ndef"), |b| b.enter().unwrap());
        assert_undoes(buffer("abc\ndef"), |b| {
            b.set_cursor_position_from_top(1).unwrap();
            b.backspace().unwrap();
        });
        assert_undoes(buffer("abc\ndef"), |b| b.write("w"));
        assert_undoes(buffer("abc\ndef"), |b| b.remove_line_at(2).unwrap());
        assert_undoes(buffer("abc\ndef"), |b| b.remove_text_block(1..3).unwrap());
        assert_undoes(buffer("abc\ndef"), |b| b.paste_text("1\n2\n3"));
        assert_undoes(buffer("abc\ndef"), TextBuffer::increase_buffer_size);
    }

    #[test]
    fn redo_reapplies_change_and_cursor() {
        let mut buf = buffer("abc");
        buf.set_cursor_position_from_left(8).unwrap();
        buf.append_line("d").unwrap();
        let after = (buf.text(), buf.cursor_position());
        buf.undo().unwrap();
        buf.redo().unwrap();
        assert_eq!((buf.text(), buf.cursor_position()), after);
        assert!(buf.redo().is_err());
    }

    #[test]
    fn undo_at_oldest_fails_without_mutating() {
        let mut buf = buffer("abc");
        buf.append_line("x").unwrap();
        buf.undo().unwrap();
        let text = buf.text();
        assert_eq!(buf.undo(), Err(EditorError::ValueOutOfRange { what: "nothing to undo" }));
        assert_eq!(buf.text(), text);
    }

    #[test]
    fn new_edit_after_undo_discards_redo() {
        let mut buf = buffer("");
        buf.append_line("a").unwrap();
        buf.append_line("b").unwrap();
        buf.undo().unwrap();
        buf.append_line("c").unwrap();
        assert_eq!(buf.text(), "ac");
        assert!(buf.redo().is_err());
    }

    #[test]
    fn history_limit_is_respected() {
        let mut buf = TextBuffer::new(3);
        for _ in 0..10 {
            buf.append_line("x").unwrap();
        }
        assert_eq!(buf.history().len(), 3);
        for _ in 0..3 {
            buf.undo().unwrap();
        }
        assert_eq!(buf.text(), "xxxxxxx");
        assert!(buf.undo().is_err());
    }

    // ==================== reflow ====================

    #[test]
    fn adapt_is_idempotent_at_fixed_point() {
        let mut buf = buffer("a line that is far too long for ten columns");
        assert!(buf.adapt_text_for_buffer_size(10));
        let snapshot = buf.lines().to_vec();
        assert!(!buf.adapt_text_for_buffer_size(10));
        assert_eq!(buf.lines(), snapshot.as_slice());
    }

    #[test]
    fn adapt_undoes_together_with_the_edit_that_caused_it() {
        let mut buf = buffer("abcde");
        buf.set_cursor_position_from_left(10).unwrap();
        buf.append_line("f").unwrap();
        assert!(buf.adapt_text_for_buffer_size(10));
        assert_eq!(lines(&buf), vec!["abcde", "f"]);
        assert_eq!(buf.cursor_position(), CursorPosition::new(1, 6));

        buf.undo().unwrap();
        assert_eq!(lines(&buf), vec!["abcde"]);
        assert_eq!(buf.cursor_position(), CursorPosition::new(0, 10));

        buf.redo().unwrap();
        assert_eq!(lines(&buf), vec!["abcde", "f"]);
        assert_eq!(buf.cursor_position(), CursorPosition::new(1, 6));
        assert!(buf.redo().is_err());
    }

    #[test]
    fn adapt_without_changes_records_nothing() {
        let mut buf = buffer("short");
        assert!(!buf.adapt_text_for_buffer_size(80));
        assert!(buf.history().is_empty());
    }

    #[test]
    fn adapt_keeps_cursor_on_its_char_when_earlier_rows_overflow() {
        let mut buf = buffer("aaaaaaa\nbX");
        buf.set_cursor_position_from_top(1).unwrap();
        buf.set_cursor_position_from_left(6).unwrap();
        assert!(buf.adapt_text_for_buffer_size(10));
        assert_eq!(lines(&buf), vec!["aaaaa", "aabX"]);
        assert_eq!(buf.cursor_position(), CursorPosition::new(1, 5 + 3));
    }

    #[test]
    fn adapt_keeps_cursor_at_start_of_its_row() {
        let mut buf = buffer("ab\n\nabcdefgh");
        buf.set_cursor_position_from_top(1).unwrap();
        assert!(buf.adapt_text_for_buffer_size(10));
        assert_eq!(lines(&buf), vec!["ab", "", "abcde", "fgh"]);
        assert_eq!(buf.cursor_position(), CursorPosition::new(1, 5));
    }

    #[test]
    fn adapt_keeps_cursor_behind_text_pushed_onto_its_row() {
        let mut buf = buffer("abcdefg\nxy");
        buf.set_cursor_position_from_top(1).unwrap();
        buf.set_cursor_position_from_left(7).unwrap();
        assert!(buf.adapt_text_for_buffer_size(10));
        assert_eq!(lines(&buf), vec!["abcde", "fgxy"]);
        assert_eq!(buf.cursor_position(), CursorPosition::new(1, 5 + 4));
    }

    #[test]
    fn line_added_for_overflow_undoes_with_the_edit() {
        let mut buf = buffer("abcd");
        buf.set_cursor_position_from_left(9).unwrap();
        buf.append_line("e").unwrap();
        buf.overflow_onto_new_line();
        assert_eq!(lines(&buf), vec!["abcde", ""]);
        assert_eq!(buf.cursor_position(), CursorPosition::new(1, 5));

        buf.undo().unwrap();
        assert_eq!(lines(&buf), vec!["abcd"]);
        assert_eq!(buf.cursor_position(), CursorPosition::new(0, 9));

        buf.redo().unwrap();
        assert_eq!(lines(&buf), vec!["abcde", ""]);
        assert_eq!(buf.cursor_position(), CursorPosition::new(1, 5));
    }

    #[test]
    fn undo_of_leading_adapt_entry_is_not_an_error() {
        let mut buf = buffer("abcdefgh");
        assert!(buf.adapt_text_for_buffer_size(10));
        buf.undo().unwrap();
        assert_eq!(buf.text(), "abcdefgh");
    }
}
