//! Clipboard operations: copy the current line, paste.

use super::Editor;
use anyhow::Result;

impl Editor {
    /// Copy the current line to the system clipboard.
    pub fn copy_line(&mut self) -> Result<()> {
        let text = self.buffer.current_line().to_string();
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text)) {
            Ok(()) => self.set_status("Copied line."),
            Err(e) => {
                tracing::warn!("clipboard: {e}");
                self.set_status("Clipboard unavailable.");
            }
        }
        Ok(())
    }

    /// Paste from the system clipboard.
    pub fn paste(&mut self) -> Result<()> {
        match arboard::Clipboard::new().and_then(|mut cb| cb.get_text()) {
            Ok(text) => self.paste_str(&text),
            Err(e) => {
                tracing::warn!("clipboard: {e}");
                self.set_status("Clipboard unavailable.");
                Ok(())
            }
        }
    }

    /// Single-line text is typed at the cursor; multi-line text goes in as whole lines above
    /// the cursor row. A trailing line break ends the last line; it adds no empty line.
    pub fn paste_str(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            self.set_status("Clipboard is empty.");
            return Ok(());
        }
        if text.contains('\n') {
            let whole_lines = text.strip_suffix('\n').map_or(text, |t| t.strip_suffix('\r').unwrap_or(t));
            self.buffer.paste_text(whole_lines);
        } else {
            self.buffer.append_line(text)?;
        }
        self.dirty = true;
        self.set_status("Pasted.");
        Ok(())
    }
}
