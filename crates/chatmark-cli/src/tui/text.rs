//! Span-aware line wrapping for the transcript
//!
//! IMPORTANT: all width calculations use unicode display width, not byte
//! length, so multi-byte UTF-8 and wide characters (CJK, emoji) wrap at
//! the right column. Wrapping happens per character and preserves each
//! span's style across the break.

use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

/// Break one styled line into rows no wider than max_width
///
/// An empty line yields a single empty row. A character wider than
/// max_width still gets placed (on a row of its own) rather than dropped.
pub fn wrap_line(line: &Line<'static>, max_width: usize) -> Vec<Line<'static>> {
    if max_width == 0 {
        return vec![line.clone()];
    }

    let mut rows: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut current_width = 0usize;

    for span in &line.spans {
        let mut chunk = String::new();

        for c in span.content.chars() {
            let char_width = c.width().unwrap_or(0);

            if current_width + char_width > max_width && current_width > 0 {
                if !chunk.is_empty() {
                    current.push(Span::styled(std::mem::take(&mut chunk), span.style));
                }
                rows.push(Line::from(std::mem::take(&mut current)));
                current_width = 0;
            }

            chunk.push(c);
            current_width += char_width;
        }

        if !chunk.is_empty() {
            current.push(Span::styled(chunk, span.style));
        }
    }

    if !current.is_empty() || rows.is_empty() {
        rows.push(Line::from(current));
    }

    rows
}

/// Wrap a sequence of styled lines, preserving empty lines
pub fn wrap_lines(lines: &[Line<'static>], max_width: usize) -> Vec<Line<'static>> {
    lines
        .iter()
        .flat_map(|line| wrap_line(line, max_width))
        .collect()
}
