//! Informational alerts: help and document statistics.

use crate::commands::CommandRegistry;
use super::Editor;

/// Statistics about the current document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStats {
    pub line_count: usize,
    pub word_count: usize,
    pub char_count: usize,
    /// Size on disk once saved with `\n` line breaks.
    pub byte_count: usize,
    /// Line lengths in buckets of ten chars; the last bucket holds 90 and up.
    pub line_length_histogram: Vec<usize>,
}

impl DocumentStats {
    pub fn from_lines(lines: &[String]) -> Self {
        let mut histogram = vec![0; 10];
        let mut stats = Self {
            line_count: lines.len(),
            word_count: 0,
            char_count: 0,
            byte_count: lines.len().saturating_sub(1),
            line_length_histogram: Vec::new(),
        };
        for line in lines {
            let chars = line.chars().count();
            stats.char_count += chars;
            stats.byte_count += line.len();
            stats.word_count += line.split_whitespace().count();
            histogram[(chars / 10).min(9)] += 1;
        }
        stats.line_length_histogram = histogram;
        stats
    }

    /// Multi-line report with a small bar chart of the histogram.
    pub fn report(&self) -> String {
        let mut lines = vec![
            format!("Lines:      {}", self.line_count),
            format!("Words:      {}", self.word_count),
            format!("Characters: {}", self.char_count),
            format!("Size:       {} bytes", self.byte_count),
            String::new(),
            "Line lengths:".to_string(),
        ];

        let max_val = self.line_length_histogram.iter().copied().max().unwrap_or(0).max(1);
        let chart_width = 20;
        for (i, &count) in self.line_length_histogram.iter().enumerate() {
            let label = if i == 9 { "90+  ".to_string() } else { format!("{:>2}-{:<2}", i * 10, i * 10 + 9) };
            let bar = "█".repeat(count * chart_width / max_val);
            lines.push(format!("{label} {bar:<chart_width$} {count}"));
        }
        lines.join("\n")
    }
}

/// Key reference built from the registry plus the unbound editing keys.
pub fn help_text(commands: &CommandRegistry) -> String {
    let mut lines: Vec<String> = commands
        .list()
        .into_iter()
        .map(|c| format!("{:<8} {}", c.key.as_deref().unwrap_or("-"), c.description))
        .collect();
    lines.push(String::new());
    lines.push("Arrows   Move (wraps across lines)".to_string());
    lines.push("Home/End Start / end of line".to_string());
    lines.push("PgUp/Dn  Move one screen".to_string());
    lines.push("Tab      Insert spaces".to_string());
    lines.join("\n")
}

impl Editor {
    pub fn calculate_stats(&self) -> DocumentStats {
        DocumentStats::from_lines(self.buffer.lines())
    }

    pub fn show_help(&mut self) {
        let text = help_text(&self.commands);
        self.show_alert("Help", &text);
    }

    pub fn show_stats(&mut self) {
        let text = self.calculate_stats().report();
        self.show_alert("Document statistics", &text);
    }
}
