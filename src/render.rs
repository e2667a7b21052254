//! The console renderer: reflow, scroll, build the scene, flush it, paint the virtual cursor.

use anyhow::{Context, Result};
use crossterm::style::Color;

use crate::buffer::TextBuffer;
use crate::cursor::CursorPosition;
use crate::error::EditorError;
use crate::scene::{Scene, ScenePainter};
use crate::sink::OutputSink;

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Draws a [`TextBuffer`] onto an [`OutputSink`].
///
/// The hardware cursor stays hidden; the cursor cell is repainted with swapped colors instead.
/// The last row of the sink is the status bar.
pub struct CuiRender<S: OutputSink> {
    sink: S,
    top_offset: usize,
    cursor_visible: bool,
}

impl<S: OutputSink> CuiRender<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, top_offset: 0, cursor_visible: true }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Index of the first document row shown.
    pub fn top_offset(&self) -> usize {
        self.top_offset
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Turn the virtual cursor on or off (off while an overlay owns the input).
    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    /// Rows available to document text.
    pub fn viewport_rows(&self) -> usize {
        usize::from(self.sink.size().1).saturating_sub(1).max(1)
    }

    /// Blank the whole surface, used before repainting after a resize.
    pub fn clear(&mut self) -> Result<()> {
        self.sink.clear().context("clear output")
    }

    /// Render one frame. `painters` run in order over the scene before it is flushed.
    pub fn render(
        &mut self,
        buffer: &mut TextBuffer,
        painters: &[&dyn ScenePainter],
        status: &str,
    ) -> Result<()> {
        let (w, h) = self.sink.size();
        let (width, height) = (usize::from(w), usize::from(h));
        if width == 0 || height == 0 {
            return Ok(());
        }

        self.settle(buffer, width, height)?;

        let mut scene = Scene::build(&buffer.code_with_line_numbers(), height, self.top_offset, width);
        for painter in painters {
            painter.paint(&mut scene);
        }

        for (row, text) in scene.rows().iter().enumerate() {
            self.sink.set_cursor_position(0, to_u16(row))?;
            self.sink.write(text)?;
        }
        self.draw_status(status, height - 1, width)?;
        if self.cursor_visible {
            self.paint_cursor(&scene, buffer.cursor_position())?;
        }
        self.sink.flush().context("flush output")?;
        Ok(())
    }

    /// Reflow to the viewport, then correct horizontal overflow and scrolling until the
    /// cursor is on screen and nothing moves any more.
    fn settle(&mut self, buffer: &mut TextBuffer, width: usize, height: usize) -> Result<(), EditorError> {
        let reflow_width = width.saturating_sub(2);
        let right_edge = reflow_width.saturating_sub(1);
        let rows = height.saturating_sub(1).max(1);

        loop {
            buffer.adapt_text_for_buffer_size(reflow_width);
            let pos = buffer.cursor_position();

            if pos.left > right_edge && buffer.prefix_length() < right_edge {
                if pos.top + 1 == buffer.size() {
                    buffer.overflow_onto_new_line();
                } else {
                    buffer.set_cursor_position_from_top(pos.top + 1)?;
                    buffer.set_cursor_position_from_left(buffer.prefix_length())?;
                }
                continue;
            }
            if pos.top >= self.top_offset + rows {
                self.top_offset = pos.top + 1 - rows;
                continue;
            }
            if pos.top < self.top_offset {
                self.top_offset = pos.top;
                continue;
            }
            return Ok(());
        }
    }

    fn draw_status(&mut self, status: &str, row: usize, width: usize) -> Result<()> {
        let mut bar: String = status.chars().take(width).collect();
        let used = bar.chars().count();
        bar.push_str(&" ".repeat(width - used));

        self.sink.set_cursor_position(0, to_u16(row))?;
        self.sink.set_colors(Color::Black, Color::White)?;
        self.sink.write(&bar)?;
        self.sink.reset_colors()?;
        Ok(())
    }

    fn paint_cursor(&mut self, scene: &Scene, pos: CursorPosition) -> Result<()> {
        let row = pos.top.saturating_sub(self.top_offset);
        let glyph = scene.glyph_at(row, pos.left).unwrap_or(' ');
        let col = scene.screen_column(row, pos.left);
        if row >= scene.height() || col >= scene.width() {
            return Ok(());
        }

        self.sink.set_cursor_position(to_u16(col), to_u16(row))?;
        self.sink.set_colors(Color::Black, Color::White)?;
        self.sink.write(&glyph.to_string())?;
        self.sink.reset_colors()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    fn numbered(count: usize) -> String {
        (1..=count).map(|i| format!("l{i}")).collect::<Vec<_>>().join("\n")
    }

    struct Banner;

    impl ScenePainter for Banner {
        fn paint(&self, scene: &mut Scene) {
            scene.overwrite(0, 0, "##");
        }
    }

    // ==================== frame contents ====================

    #[test]
    fn draws_numbered_rows_and_status() {
        let mut buf = TextBuffer::from_string("abc\nde", 10);
        let mut render = CuiRender::new(MemorySink::new(16, 4));
        render.render(&mut buf, &[], "ready").unwrap();
        let sink = render.sink();
        assert_eq!(sink.row_text(0), "  1 |abc        ");
        assert_eq!(sink.row_text(1), "  2 |de         ");
        assert_eq!(sink.row_text(2), " ".repeat(16));
        assert_eq!(sink.row_text(3), format!("ready{}", " ".repeat(11)));
        assert_eq!(sink.flushes(), 1);
    }

    #[test]
    fn virtual_cursor_swaps_colors_of_its_cell() {
        let mut buf = TextBuffer::from_string("abc", 10);
        buf.set_cursor_position_from_left(6).unwrap();
        let mut render = CuiRender::new(MemorySink::new(16, 3));
        render.render(&mut buf, &[], "").unwrap();
        let cell = render.sink().cell(6, 0).unwrap();
        assert_eq!(cell.ch, 'b');
        assert_eq!((cell.fg, cell.bg), (Some(Color::Black), Some(Color::White)));
        assert_eq!(render.sink().cell(5, 0).unwrap().bg, None);
    }

    #[test]
    fn hidden_virtual_cursor_is_not_painted() {
        let mut buf = TextBuffer::from_string("abc", 10);
        let mut render = CuiRender::new(MemorySink::new(16, 3));
        render.set_cursor_visible(false);
        render.render(&mut buf, &[], "").unwrap();
        assert_eq!(render.sink().cell(5, 0).unwrap().bg, None);
    }

    #[test]
    fn painters_run_before_flush() {
        let mut buf = TextBuffer::from_string("abc", 10);
        let mut render = CuiRender::new(MemorySink::new(16, 3));
        render.render(&mut buf, &[&Banner], "").unwrap();
        assert!(render.sink().row_text(0).starts_with("##1 |abc"));
    }

    // ==================== corrections ====================

    #[test]
    fn long_lines_are_reflowed_to_viewport() {
        let mut buf = TextBuffer::from_string("abcdefgh", 10);
        let mut render = CuiRender::new(MemorySink::new(12, 4));
        render.render(&mut buf, &[], "").unwrap();
        assert_eq!(buf.lines(), ["abcde", "fgh"]);
        assert_eq!(render.sink().row_text(0), "  1 |abcde  ");
        assert_eq!(render.sink().row_text(1), "  2 |fgh    ");
    }

    #[test]
    fn cursor_past_right_edge_moves_to_a_new_line() {
        let mut buf = TextBuffer::from_string("abcde", 10);
        buf.set_cursor_position_from_left(10).unwrap();
        let mut render = CuiRender::new(MemorySink::new(12, 4));
        render.render(&mut buf, &[], "").unwrap();
        assert_eq!(buf.lines(), ["abcde", ""]);
        assert_eq!(buf.cursor_position(), CursorPosition::new(1, 5));
    }

    #[test]
    fn typing_that_fills_the_last_line_can_be_undone() {
        let mut buf = TextBuffer::from_string("abcd", 10);
        buf.set_cursor_position_from_left(9).unwrap();
        let mut render = CuiRender::new(MemorySink::new(12, 4));

        buf.append_line("e").unwrap();
        render.render(&mut buf, &[], "").unwrap();
        assert_eq!(buf.lines(), ["abcde", ""]);

        buf.undo().unwrap();
        render.render(&mut buf, &[], "").unwrap();
        assert_eq!(buf.lines(), ["abcd"]);
        assert_eq!(buf.cursor_position(), CursorPosition::new(0, 9));
        assert!(buf.undo().is_err());

        buf.redo().unwrap();
        render.render(&mut buf, &[], "").unwrap();
        assert_eq!(buf.lines(), ["abcde", ""]);
        assert_eq!(buf.cursor_position(), CursorPosition::new(1, 5));
    }

    #[test]
    fn scrolls_down_to_cursor_and_back_up() {
        let mut buf = TextBuffer::from_string(&numbered(10), 10);
        let mut render = CuiRender::new(MemorySink::new(20, 5));
        buf.set_cursor_position_from_top(9).unwrap();
        render.render(&mut buf, &[], "").unwrap();
        assert_eq!(render.top_offset(), 6);
        assert!(render.sink().row_text(0).starts_with("  7  |l7"));
        assert_eq!(render.sink().cell(6, 3).unwrap().ch, 'l');
        assert_eq!(render.sink().cell(6, 3).unwrap().bg, Some(Color::White));

        buf.set_cursor_position_from_top(2).unwrap();
        render.render(&mut buf, &[], "").unwrap();
        assert_eq!(render.top_offset(), 2);
        assert!(render.sink().row_text(0).starts_with("  3  |l3"));
    }

    #[test]
    fn zero_sized_surface_is_skipped() {
        let mut buf = TextBuffer::new(10);
        let mut render = CuiRender::new(MemorySink::new(0, 0));
        render.render(&mut buf, &[], "").unwrap();
        assert_eq!(render.sink().flushes(), 0);
    }
}
