//! Output sinks: where finished scene rows and the virtual cursor end up.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color},
    terminal::{self, ClearType},
    QueueableCommand,
};

/// Abstract painting surface. Coordinates are terminal cells, `(col, row)`.
pub trait OutputSink {
    fn clear(&mut self) -> io::Result<()>;
    fn write(&mut self, text: &str) -> io::Result<()>;
    fn write_line(&mut self, text: &str) -> io::Result<()>;
    fn set_cursor_position(&mut self, col: u16, row: u16) -> io::Result<()>;
    fn set_colors(&mut self, fg: Color, bg: Color) -> io::Result<()>;
    fn reset_colors(&mut self) -> io::Result<()>;
    /// Show or hide the hardware cursor.
    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
    /// `(width, height)` in cells.
    fn size(&self) -> (u16, u16);
}

/// Queues crossterm commands on any writer; nothing reaches the terminal until `flush`.
pub struct CrosstermSink<W: Write> {
    out: W,
    size: (u16, u16),
}

impl<W: Write> CrosstermSink<W> {
    pub fn new(out: W) -> io::Result<Self> {
        let size = terminal::size()?;
        Ok(Self { out, size })
    }

    /// Re-read the terminal size. Returns whether it changed.
    pub fn refresh_size(&mut self) -> io::Result<bool> {
        let size = terminal::size()?;
        let changed = size != self.size;
        self.size = size;
        Ok(changed)
    }
}

impl<W: Write> OutputSink for CrosstermSink<W> {
    fn clear(&mut self) -> io::Result<()> {
        self.out.queue(terminal::Clear(ClearType::All))?;
        Ok(())
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.out.queue(style::Print(text))?;
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.out.queue(style::Print(text))?;
        self.out.queue(cursor::MoveToNextLine(1))?;
        Ok(())
    }

    fn set_cursor_position(&mut self, col: u16, row: u16) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(col, row))?;
        Ok(())
    }

    fn set_colors(&mut self, fg: Color, bg: Color) -> io::Result<()> {
        self.out.queue(style::SetForegroundColor(fg))?;
        self.out.queue(style::SetBackgroundColor(bg))?;
        Ok(())
    }

    fn reset_colors(&mut self) -> io::Result<()> {
        self.out.queue(style::ResetColor)?;
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            self.out.queue(cursor::Show)?;
        } else {
            self.out.queue(cursor::Hide)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn size(&self) -> (u16, u16) {
        self.size
    }
}

/// One painted cell of a [`MemorySink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl Default for Cell {
    fn default() -> Self {
        Self { ch: ' ', fg: None, bg: None }
    }
}

/// A screen held in memory, for driving the renderer without a terminal.
#[derive(Debug, Clone)]
pub struct MemorySink {
    cells: Vec<Vec<Cell>>,
    col: usize,
    row: usize,
    fg: Option<Color>,
    bg: Option<Color>,
    cursor_visible: bool,
    flushes: usize,
}

impl MemorySink {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![vec![Cell::default(); usize::from(width)]; usize::from(height)],
            col: 0,
            row: 0,
            fg: None,
            bg: None,
            cursor_visible: true,
            flushes: 0,
        }
    }

    /// Change the screen size, dropping everything painted so far.
    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self { flushes: self.flushes, ..Self::new(width, height) };
    }

    pub fn row_text(&self, row: usize) -> String {
        self.cells.get(row).map(|r| r.iter().map(|c| c.ch).collect()).unwrap_or_default()
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<Cell> {
        self.cells.get(row)?.get(col).copied()
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl OutputSink for MemorySink {
    fn clear(&mut self) -> io::Result<()> {
        for row in &mut self.cells {
            row.fill(Cell::default());
        }
        Ok(())
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        for ch in text.chars() {
            if let Some(cell) = self.cells.get_mut(self.row).and_then(|r| r.get_mut(self.col)) {
                *cell = Cell { ch, fg: self.fg, bg: self.bg };
            }
            self.col += 1;
        }
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write(text)?;
        self.col = 0;
        self.row += 1;
        Ok(())
    }

    fn set_cursor_position(&mut self, col: u16, row: u16) -> io::Result<()> {
        self.col = usize::from(col);
        self.row = usize::from(row);
        Ok(())
    }

    fn set_colors(&mut self, fg: Color, bg: Color) -> io::Result<()> {
        self.fg = Some(fg);
        self.bg = Some(bg);
        Ok(())
    }

    fn reset_colors(&mut self) -> io::Result<()> {
        self.fg = None;
        self.bg = None;
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.cursor_visible = visible;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        let height = self.cells.len();
        let width = self.cells.first().map_or(0, Vec::len);
        (u16::try_from(width).unwrap_or(u16::MAX), u16::try_from(height).unwrap_or(u16::MAX))
    }
}
