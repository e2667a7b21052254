//! Modal overlay widgets (alerts and dialogs) painted over the scene.

use crossterm::event::{KeyCode, KeyEvent};

use crate::scene::{Scene, ScenePainter};
use crate::utils::char_len;

/// Result of feeding one key to a mounted widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetOutcome {
    /// Still waiting for the user.
    Pending,
    /// Enter pressed on the button at this index.
    Confirmed(usize),
    Cancelled,
}

/// A bordered box with a title, some text and a row of buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    title: String,
    lines: Vec<String>,
    buttons: Vec<String>,
    active: usize,
}

impl Widget {
    /// A message with a single "OK" button.
    pub fn alert(title: impl Into<String>, text: &str) -> Self {
        Self::dialog(title, text, &["OK"])
    }

    pub fn dialog(title: impl Into<String>, text: &str, buttons: &[&str]) -> Self {
        Self {
            title: title.into(),
            lines: text.lines().map(str::to_string).collect(),
            buttons: buttons.iter().map(|b| (*b).to_string()).collect(),
            active: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn buttons(&self) -> &[String] {
        &self.buttons
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> WidgetOutcome {
        let count = self.buttons.len().max(1);
        match key.code {
            KeyCode::Right | KeyCode::Tab => self.active = (self.active + 1) % count,
            KeyCode::Left | KeyCode::BackTab => self.active = (self.active + count - 1) % count,
            KeyCode::Enter => return WidgetOutcome::Confirmed(self.active),
            KeyCode::Esc => return WidgetOutcome::Cancelled,
            _ => {}
        }
        WidgetOutcome::Pending
    }

    fn button_row(&self) -> String {
        self.buttons
            .iter()
            .enumerate()
            .map(|(i, b)| if i == self.active { format!("[ {b} ]") } else { format!("  {b}  ") })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The box as rows of equal char length, at most `max_width` wide.
    pub fn frame(&self, max_width: usize) -> Vec<String> {
        let buttons = self.button_row();
        let content = self
            .lines
            .iter()
            .map(|l| char_len(l))
            .chain([char_len(&self.title) + 2, char_len(&buttons)])
            .max()
            .unwrap_or(0);
        let inner = (content + 2).min(max_width.saturating_sub(2));

        let fit = |text: &str| -> String {
            let mut s: String = text.chars().take(inner).collect();
            s.push_str(&" ".repeat(inner - char_len(&s)));
            s
        };
        let centered = |text: &str| -> String {
            let pad = inner.saturating_sub(char_len(text)) / 2;
            fit(&format!("{}{text}", " ".repeat(pad)))
        };

        let title: String = format!(" {} ", self.title).chars().take(inner).collect();
        let mut rows = vec![format!("┌{title}{}┐", "─".repeat(inner - char_len(&title)))];
        for line in &self.lines {
            rows.push(format!("│{}│", fit(&format!(" {line}"))));
        }
        if !self.buttons.is_empty() {
            rows.push(format!("│{}│", fit("")));
            rows.push(format!("│{}│", centered(&buttons)));
        }
        rows.push(format!("└{}┘", "─".repeat(inner)));
        rows
    }
}

impl ScenePainter for Widget {
    /// Center the box over the scene.
    fn paint(&self, scene: &mut Scene) {
        let rows = self.frame(scene.width());
        let box_width = rows.first().map_or(0, |r| char_len(r));
        let top = scene.height().saturating_sub(rows.len()) / 2;
        let left = scene.width().saturating_sub(box_width) / 2;
        for (i, row) in rows.iter().enumerate() {
            scene.overwrite(top + i, left, row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    // ==================== input ====================

    #[test]
    fn arrows_cycle_buttons() {
        let mut w = Widget::dialog("Quit", "Unsaved changes", &["Save", "Discard", "Cancel"]);
        assert_eq!(w.handle_key(&key(KeyCode::Right)), WidgetOutcome::Pending);
        assert_eq!(w.active(), 1);
        w.handle_key(&key(KeyCode::Tab));
        w.handle_key(&key(KeyCode::Right));
        assert_eq!(w.active(), 0);
        w.handle_key(&key(KeyCode::Left));
        assert_eq!(w.active(), 2);
    }

    #[test]
    fn enter_and_escape_resolve() {
        let mut w = Widget::dialog("Q", "?", &["Yes", "No"]);
        w.handle_key(&key(KeyCode::Right));
        assert_eq!(w.handle_key(&key(KeyCode::Enter)), WidgetOutcome::Confirmed(1));
        assert_eq!(w.handle_key(&key(KeyCode::Esc)), WidgetOutcome::Cancelled);
        assert_eq!(w.handle_key(&key(KeyCode::Char('x'))), WidgetOutcome::Pending);
    }

    #[test]
    fn alert_has_one_ok_button() {
        let mut w = Widget::alert("Error", "line 9 is outside the buffer");
        assert_eq!(w.buttons(), ["OK"]);
        w.handle_key(&key(KeyCode::Right));
        assert_eq!(w.handle_key(&key(KeyCode::Enter)), WidgetOutcome::Confirmed(0));
    }

    // ==================== painting ====================

    #[test]
    fn frame_marks_active_button() {
        let w = Widget::dialog("Quit", "Save first?", &["Yes", "No"]);
        let rows = w.frame(80);
        assert!(rows[0].starts_with("┌ Quit ─"));
        assert!(rows.iter().any(|r| r.contains("[ Yes ]   No  ")));
        assert!(rows.iter().all(|r| char_len(r) == char_len(&rows[0])));
        assert!(rows.last().unwrap().starts_with('└'));
    }

    #[test]
    fn frame_is_cut_to_max_width() {
        let w = Widget::alert("T", &"x".repeat(50));
        let rows = w.frame(20);
        assert!(rows.iter().all(|r| char_len(r) == 20));
    }

    #[test]
    fn paint_centers_the_box() {
        let mut scene = Scene::build("", 11, 0, 30);
        let w = Widget::alert("Hi", "hello");
        w.paint(&mut scene);
        let rows = w.frame(30);
        let top = (10 - rows.len()) / 2;
        let left = (30 - char_len(&rows[0])) / 2;
        assert_eq!(scene.glyph_at(top, left), Some('┌'));
        assert!(scene.rows()[top + 1].contains(" hello "));
        assert_eq!(scene.glyph_at(0, 0), Some(' '));
    }
}
