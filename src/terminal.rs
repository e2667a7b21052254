//! Terminal setup and teardown.

use anyhow::{Context, Result};
use crossterm::{
    cursor, style,
    terminal::{self, ClearType},
    ExecutableCommand,
};
use std::io::{self, Write};

/// Raw mode plus alternate screen for as long as the guard lives.
///
/// The hardware cursor is hidden for the whole session: the renderer paints its own.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn new(out: &mut impl Write) -> Result<Self> {
        terminal::enable_raw_mode().context("enable_raw_mode failed")?;
        let guard = Self;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        out.execute(terminal::Clear(ClearType::All))?;
        out.flush()?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = out.execute(style::ResetColor);
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = out.flush();
    }
}
