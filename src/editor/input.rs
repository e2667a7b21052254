//! Input handling: overlay keys, key bindings and plain editing keys.

use crate::commands::canonical_key_string;
use crate::cursor::CursorPosition;
use crate::error::EditorError;
use crate::utils::char_len;
use crate::widget::{Widget, WidgetOutcome};
use super::{is_interrupt, Editor, Overlay, OverlayKind};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Moving into a document edge is a no-op, not an error worth an alert.
fn stop_at_edge(result: Result<(), EditorError>) -> Result<(), EditorError> {
    match result {
        Err(EditorError::OutOfBufferRange { .. }) => Ok(()),
        other => other,
    }
}

impl Editor {
    /// Top-level key handler.
    ///
    /// A mounted widget consumes every key. Otherwise bound chords run their command and the
    /// remaining keys edit the buffer. Recoverable failures are reported in an alert; only
    /// the quit signal is returned as an error.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if let Some(overlay) = self.overlay.as_mut() {
            let outcome = overlay.widget.handle_key(&key);
            let kind = overlay.kind;
            return self.resolve_overlay(kind, outcome);
        }

        let key_str = canonical_key_string(&key);
        let result = match self.commands.resolve_key(&key_str) {
            Some(cmd) => {
                let action = cmd.action;
                action(self)
            }
            None => self.edit_key(key).map_err(anyhow::Error::from),
        };
        self.absorb(result)
    }

    /// Turn a recoverable failure into an alert; pass the quit signal through.
    pub(crate) fn absorb(&mut self, result: Result<()>) -> Result<()> {
        match result {
            Err(e) if is_interrupt(&e) => Err(e),
            Err(e) => {
                self.report(&e);
                Ok(())
            }
            Ok(()) => Ok(()),
        }
    }

    fn resolve_overlay(&mut self, kind: OverlayKind, outcome: WidgetOutcome) -> Result<()> {
        match (kind, outcome) {
            (_, WidgetOutcome::Pending) => Ok(()),
            (OverlayKind::Alert, _) => {
                self.close_overlay();
                Ok(())
            }
            (OverlayKind::QuitConfirm, WidgetOutcome::Confirmed(0)) => {
                self.close_overlay();
                let saved = self.cmd_save();
                self.absorb(saved)?;
                if self.dirty {
                    Ok(())
                } else {
                    Err(EditorError::InterruptedExecution.into())
                }
            }
            (OverlayKind::QuitConfirm, WidgetOutcome::Confirmed(1)) => {
                tracing::info!("quitting without saving");
                Err(EditorError::InterruptedExecution.into())
            }
            (OverlayKind::QuitConfirm, _) => {
                self.close_overlay();
                Ok(())
            }
        }
    }

    /// Quit right away when clean, otherwise ask first.
    pub fn try_quit(&mut self) -> Result<()> {
        if !self.dirty {
            return Err(EditorError::InterruptedExecution.into());
        }
        let widget = Widget::dialog(
            "Quit",
            "There are unsaved changes.",
            &["Save & quit", "Quit", "Cancel"],
        );
        self.overlay = Some(Overlay { widget, kind: OverlayKind::QuitConfirm });
        Ok(())
    }

    fn insert_text(&mut self, text: &str) -> Result<(), EditorError> {
        self.buffer.append_line(text)?;
        self.dirty = true;
        Ok(())
    }

    /// Keys with no binding: typing, line editing and cursor movement.
    fn edit_key(&mut self, key: KeyEvent) -> Result<(), EditorError> {
        let chord = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        let buf = &mut self.buffer;
        match key.code {
            KeyCode::Char(ch) if !chord => self.insert_text(&ch.to_string())?,
            KeyCode::Tab => self.insert_text(&" ".repeat(self.config.tab_width))?,
            KeyCode::Enter => {
                buf.enter()?;
                self.dirty = true;
            }
            KeyCode::Backspace => {
                if buf.cursor_position() != CursorPosition::new(0, buf.prefix_length()) {
                    buf.backspace()?;
                    self.dirty = true;
                }
            }
            KeyCode::Left => buf.move_left()?,
            KeyCode::Right => buf.move_right()?,
            KeyCode::Up => stop_at_edge(buf.move_up())?,
            KeyCode::Down => stop_at_edge(buf.move_down())?,
            KeyCode::Home => buf.set_cursor_position_from_left(buf.prefix_length())?,
            KeyCode::End => {
                let end = buf.prefix_length() + char_len(buf.current_line());
                buf.set_cursor_position_from_left(end)?;
            }
            KeyCode::PageUp => {
                let top = buf.cursor_position_from_top().saturating_sub(self.viewport_rows);
                buf.set_cursor_position_from_top(top)?;
            }
            KeyCode::PageDown => {
                let last = buf.size() - 1;
                let top = (buf.cursor_position_from_top() + self.viewport_rows).min(last);
                buf.set_cursor_position_from_top(top)?;
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::editor;
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(ed: &mut Editor, s: &str) {
        for ch in s.chars() {
            ed.handle_key(key(KeyCode::Char(ch))).unwrap();
        }
    }

    // ==================== editing keys ====================

    #[test]
    fn typing_enter_and_backspace() {
        let mut ed = editor();
        type_str(&mut ed, "ab");
        ed.handle_key(key(KeyCode::Enter)).unwrap();
        type_str(&mut ed, "cd");
        assert_eq!(ed.buffer().text(), "ab\ncd");
        ed.handle_key(key(KeyCode::Home)).unwrap();
        ed.handle_key(key(KeyCode::Backspace)).unwrap();
        assert_eq!(ed.buffer().text(), "abcd");
        assert!(ed.is_dirty());
    }

    #[test]
    fn backspace_at_document_start_keeps_clean() {
        let mut ed = editor();
        ed.handle_key(key(KeyCode::Backspace)).unwrap();
        assert!(!ed.is_dirty());
        assert!(ed.overlay().is_none());
    }

    #[test]
    fn tab_inserts_configured_spaces() {
        let mut ed = editor();
        ed.config.tab_width = 2;
        ed.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(ed.buffer().text(), "  ");
    }

    #[test]
    fn chords_are_not_typed() {
        let mut ed = editor();
        ed.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT)).unwrap();
        assert_eq!(ed.buffer().text(), "");
    }

    #[test]
    fn home_end_and_vertical_edges() {
        let mut ed = editor();
        type_str(&mut ed, "hello");
        ed.handle_key(key(KeyCode::Home)).unwrap();
        assert_eq!(ed.buffer().cursor_position_from_left(), 5);
        ed.handle_key(key(KeyCode::End)).unwrap();
        assert_eq!(ed.buffer().cursor_position_from_left(), 10);
        ed.handle_key(key(KeyCode::Up)).unwrap();
        ed.handle_key(key(KeyCode::Down)).unwrap();
        assert!(ed.overlay().is_none());
    }

    #[test]
    fn paging_moves_by_viewport() {
        let mut ed = editor();
        ed.buffer.replace_current_content_by(vec![String::new(); 30]);
        ed.viewport_rows = 10;
        ed.handle_key(key(KeyCode::PageDown)).unwrap();
        assert_eq!(ed.buffer().cursor_position_from_top(), 10);
        ed.handle_key(key(KeyCode::PageDown)).unwrap();
        ed.handle_key(key(KeyCode::PageDown)).unwrap();
        assert_eq!(ed.buffer().cursor_position_from_top(), 29);
        ed.handle_key(key(KeyCode::PageUp)).unwrap();
        assert_eq!(ed.buffer().cursor_position_from_top(), 19);
    }

    // ==================== bindings and overlays ====================

    #[test]
    fn undo_past_oldest_shows_alert() {
        let mut ed = editor();
        ed.handle_key(ctrl('z')).unwrap();
        let overlay = ed.overlay().unwrap();
        assert_eq!(overlay.kind, OverlayKind::Alert);
        assert!(overlay.widget.lines()[0].contains("nothing to undo"));

        type_str(&mut ed, "x");
        assert_eq!(ed.buffer().text(), "", "keys go to the alert while it is mounted");
        ed.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(ed.overlay().is_none());
    }

    #[test]
    fn undo_and_redo_bindings() {
        let mut ed = editor();
        type_str(&mut ed, "ab");
        ed.handle_key(ctrl('z')).unwrap();
        assert_eq!(ed.buffer().text(), "a");
        ed.handle_key(ctrl('y')).unwrap();
        assert_eq!(ed.buffer().text(), "ab");
    }

    #[test]
    fn quit_when_clean_interrupts() {
        let mut ed = editor();
        let err = ed.handle_key(ctrl('q')).unwrap_err();
        assert!(is_interrupt(&err));
    }

    #[test]
    fn quit_when_dirty_asks_first() {
        let mut ed = editor();
        type_str(&mut ed, "x");
        ed.handle_key(ctrl('q')).unwrap();
        assert_eq!(ed.overlay().map(|o| o.kind), Some(OverlayKind::QuitConfirm));

        ed.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(ed.overlay().is_none());

        ed.handle_key(ctrl('q')).unwrap();
        ed.handle_key(key(KeyCode::Right)).unwrap();
        let err = ed.handle_key(key(KeyCode::Enter)).unwrap_err();
        assert!(is_interrupt(&err));
    }

    #[test]
    fn save_and_quit_without_a_path_stays_open() {
        let mut ed = editor();
        type_str(&mut ed, "x");
        ed.handle_key(ctrl('q')).unwrap();
        ed.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(ed.overlay().map(|o| o.kind), Some(OverlayKind::Alert));
        assert!(ed.is_dirty());
    }

    #[test]
    fn save_and_quit_writes_then_interrupts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut ed = editor();
        ed.file_path = Some(path.clone());
        type_str(&mut ed, "bye");
        ed.handle_key(ctrl('q')).unwrap();
        let err = ed.handle_key(key(KeyCode::Enter)).unwrap_err();
        assert!(is_interrupt(&err));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "bye");
    }
}
