//! Utility functions.

use std::cmp::min; // comparison helpers
use unicode_width::UnicodeWidthChar;

/// Convert a "character index" to a "byte index" in a UTF‑8 string.
///
/// Every column the editor tracks is a char index; slicing a `String` needs byte offsets that
/// lie on character boundaries. Indices past the end clamp to `s.len()`.
pub fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    s.char_indices().nth(char_idx).map_or(s.len(), |(bi, _)| bi)
}

/// Number of chars in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Terminal cells `ch` takes up. Control chars count as one.
pub fn cell_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Terminal cells `s` takes up.
pub fn display_width(s: &str) -> usize {
    s.chars().map(cell_width).sum()
}

/// How many leading chars of `s` fit into `cells` terminal cells.
pub fn chars_fitting(s: &str, cells: usize) -> usize {
    let mut used = 0;
    s.chars()
        .take_while(|&ch| {
            used += cell_width(ch);
            used <= cells
        })
        .count()
}

/// Number of decimal digits in `n` (used to size the line-number gutter).
pub fn digits(n: usize) -> usize {
    n.to_string().len()
}

/// Split `text` into lines on `\n`, dropping a `\r` left over from CRLF endings.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|l| l.trim_end_matches('\r').to_string())
        .collect()
}

/// Calculate the Levenshtein distance between two strings.
/// This is used for "did you mean?" suggestions for unknown commands.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    if a.is_empty() { return b.len(); }
    if b.is_empty() { return a.len(); }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0; b.len() + 1];
    for i in 1..=a.len() {
        cur[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            cur[j] = min(prev[j] + 1, min(cur[j - 1] + 1, prev[j - 1] + cost));
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}
