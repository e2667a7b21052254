//! Conversion between raw document lines and their numbered, gutter-prefixed display form.
//!
//! A display line looks like `"  12 |content\n"`. Every gutter in a document has the same
//! width, `4 + digits(line_count)`, so the width grows by one whenever the line count crosses
//! a power of ten and every column the cursor tracks shifts with it.

use crate::error::EditorError;
use crate::utils::{char_len, char_to_byte_index, chars_fitting, digits, display_width};

/// Separates the gutter from the line content.
pub const GUTTER_SEPARATOR: char = '|';

/// 1-based line number to 0-based index.
pub fn line_number_to_index(line_number: usize) -> usize {
    line_number.saturating_sub(1)
}

/// 0-based index to 1-based line number.
pub fn index_to_line_number(index: usize) -> usize {
    index + 1
}

/// Width of the `"  N |"` segment for a document of `line_count` lines.
pub fn gutter_width(line_count: usize) -> usize {
    4 + digits(line_count.max(1))
}

/// Content of a display line: everything after the first separator, minus the line break.
pub fn strip_gutter(display_line: &str) -> &str {
    let content = display_line
        .split_once(GUTTER_SEPARATOR)
        .map_or(display_line, |(_, rest)| rest);
    content.strip_suffix('\n').unwrap_or(content)
}

/// One reflow pass: every line whose content plus gutter exceeds `max_width` terminal cells
/// is cut at the allowed width and the overflow is prepended to the following line (created
/// if absent). A line always keeps its first char, even one too wide to fit.
///
/// Returns whether anything moved. Pushing text forward can make the next line overflow and
/// adding a line can widen the gutter, so callers repeat until this returns `false`.
pub fn reflow(lines: &mut Vec<String>, max_width: usize) -> bool {
    let mut changed = false;
    let mut i = 0;
    while i < lines.len() {
        let allowed = max_width.saturating_sub(gutter_width(lines.len())).max(1);
        let keep = chars_fitting(&lines[i], allowed).max(1);
        if display_width(&lines[i]) > allowed && keep < char_len(&lines[i]) {
            let cut = char_to_byte_index(&lines[i], keep);
            let overflow = lines[i].split_off(cut);
            if i + 1 == lines.len() {
                lines.push(overflow);
            } else {
                lines[i + 1].insert_str(0, &overflow);
            }
            changed = true;
        }
        i += 1;
    }
    changed
}

/// Read-only view answering every "what does line N look like on screen" question.
#[derive(Debug, Clone, Copy)]
pub struct Formatter<'a> {
    lines: &'a [String],
}

impl<'a> Formatter<'a> {
    pub fn new(lines: &'a [String]) -> Self {
        Self { lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn check(&self, line_number: usize) -> Result<&'a str, EditorError> {
        if line_number == 0 || line_number > self.lines.len() {
            return Err(EditorError::OutOfBufferRange { line: line_number, size: self.lines.len() });
        }
        Ok(self.lines[line_number - 1].as_str())
    }

    /// Content of a line without its gutter.
    pub fn content(&self, line_number: usize) -> Result<&'a str, EditorError> {
        self.check(line_number)
    }

    /// Width of the gutter in front of `line_number`.
    ///
    /// The value depends only on the total line count; the line number is validated so that
    /// callers asking about rows that do not exist get an error instead of a plausible width.
    pub fn prefix_length(&self, line_number: usize) -> Result<usize, EditorError> {
        self.check(line_number)?;
        Ok(gutter_width(self.lines.len()))
    }

    /// `"  N{pad}|content\n"`, with `pad` right-aligning every gutter separator.
    pub fn display_line(&self, line_number: usize) -> Result<String, EditorError> {
        let content = self.check(line_number)?;
        let pad = 1 + digits(self.lines.len()) - digits(line_number);
        Ok(format!(
            "  {line_number}{}{GUTTER_SEPARATOR}{content}\n",
            " ".repeat(pad)
        ))
    }

    /// Length of the display line in chars, trailing line break included.
    pub fn display_len(&self, line_number: usize) -> Result<usize, EditorError> {
        let content = self.check(line_number)?;
        Ok(gutter_width(self.lines.len()) + char_len(content) + 1)
    }

    /// The content of row `top` with `new_part` inserted at display column `left`.
    ///
    /// `left` already includes the gutter, so it must lie in `[prefix, display_len - 1]`.
    pub fn insert_at(&self, new_part: &str, top: usize, left: usize) -> Result<String, EditorError> {
        let line_number = index_to_line_number(top);
        let prefix = self.prefix_length(line_number)?;
        let mut display = self.display_line(line_number)?;
        if left < prefix || left >= char_len(&display) {
            return Err(EditorError::ValueOutOfRange { what: "column outside the display line" });
        }
        let at = char_to_byte_index(&display, left);
        display.insert_str(at, new_part);
        Ok(strip_gutter(&display).to_string())
    }

    /// The whole document with gutters, without a trailing line break.
    pub fn code_with_line_numbers(&self) -> String {
        let mut out = String::new();
        for n in 1..=self.lines.len() {
            let content = &self.lines[n - 1];
            let pad = 1 + digits(self.lines.len()) - digits(n);
            out.push_str(&format!("  {n}{}{GUTTER_SEPARATOR}{content}\n", " ".repeat(pad)));
        }
        out.pop();
        out
    }

    /// The raw document joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}
