//! The scene: a fixed window of padded display rows ready to be flushed.

use crate::utils::cell_width;

/// Something that draws over the scene right before it is flushed (overlay widgets).
pub trait ScenePainter {
    fn paint(&self, scene: &mut Scene);
}

/// `height - 1` rows of display text, each exactly `width` cells wide. The last terminal row
/// is left to the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    rows: Vec<String>,
    width: usize,
    top_offset: usize,
}

/// Pad or cut `text` so it fills exactly `width` terminal cells.
fn fit_to_width(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;
    for ch in text.chars() {
        let w = cell_width(ch);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}

impl Scene {
    /// Slice `display_text` (one display line per `\n`) starting at row `top_offset`.
    pub fn build(display_text: &str, height: usize, top_offset: usize, width: usize) -> Self {
        let visible = height.saturating_sub(1);
        let mut rows: Vec<String> = display_text
            .split('\n')
            .skip(top_offset)
            .take(visible)
            .map(|line| fit_to_width(line, width))
            .collect();
        rows.resize(visible, " ".repeat(width));
        Self { rows, width, top_offset }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn top_offset(&self) -> usize {
        self.top_offset
    }

    /// The char at `(row, col)`, where `col` counts chars.
    pub fn glyph_at(&self, row: usize, col: usize) -> Option<char> {
        self.rows.get(row)?.chars().nth(col)
    }

    /// Terminal cell where char `col` of `row` starts.
    pub fn screen_column(&self, row: usize, col: usize) -> usize {
        self.rows.get(row).map_or(col, |r| {
            r.chars().take(col).map(cell_width).sum()
        })
    }

    /// Overwrite chars of `row` starting at char `col`. Writes outside the scene are dropped
    /// and the row keeps its width.
    pub fn overwrite(&mut self, row: usize, col: usize, text: &str) {
        let width = self.width;
        let Some(line) = self.rows.get_mut(row) else { return };
        let mut chars: Vec<char> = line.chars().collect();
        for (i, ch) in text.chars().enumerate() {
            match chars.get_mut(col + i) {
                Some(slot) => *slot = ch,
                None => break,
            }
        }
        *line = fit_to_width(&chars.into_iter().collect::<String>(), width);
    }
}
