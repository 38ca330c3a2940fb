//! Line classification for chat messages
//!
//! Splits a raw message on `\n` and classifies each line as a heading,
//! bullet item, numbered item, or plain text, in that precedence order.
//! Classification looks at a single line only - there is no cross-line
//! state, so a list item's body is never re-tested for nested blocks.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::elements::{BlockKind, InlineSpan, RenderedLine, RenderedMessage, SpanStyle};
use crate::inline;

/// "# Title" through "###### Title". A seventh '#' defeats the required
/// whitespace and the whole run falls through as literal text.
static HEADING_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap());

/// "- item" or "* item"
static BULLET_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*] (.*)$").unwrap());

/// "1. item", "23. item" - digits, a dot, exactly one space
static NUMBERED_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\. (.*)$").unwrap());

/// Both "- " and "* " display as the same bullet glyph
const BULLET_MARKER: &str = "\u{2022} ";

/// Render a raw message into classified, styled lines
///
/// Total over any input: every `\n`-separated segment (including empty
/// ones) produces exactly one line, in input order.
pub fn render(text: &str) -> RenderedMessage {
    let total = text.split('\n').count();
    let lines = text
        .split('\n')
        .enumerate()
        .map(|(index, line)| render_line(line, index, total))
        .collect();

    RenderedMessage { lines }
}

fn render_line(line: &str, index: usize, total: usize) -> RenderedLine {
    let has_trailing_newline = index + 1 < total;

    if let Some(caps) = HEADING_REGEX.captures(line) {
        return RenderedLine {
            index,
            kind: BlockKind::Heading(caps[1].len() as u8),
            marker: None,
            spans: inline::tokenize(&caps[2]),
            has_trailing_newline,
        };
    }

    if let Some(caps) = BULLET_REGEX.captures(line) {
        return RenderedLine {
            index,
            kind: BlockKind::Bullet,
            marker: Some(InlineSpan::new(BULLET_MARKER, SpanStyle::Bold)),
            spans: inline::tokenize(&caps[1]),
            has_trailing_newline,
        };
    }

    if let Some(caps) = NUMBERED_REGEX.captures(line) {
        let ordinal = caps[1].to_string();
        return RenderedLine {
            index,
            kind: BlockKind::Numbered(ordinal.clone()),
            marker: Some(InlineSpan::new(format!("{ordinal}. "), SpanStyle::Bold)),
            spans: inline::tokenize(&caps[2]),
            has_trailing_newline,
        };
    }

    RenderedLine {
        index,
        kind: BlockKind::Plain,
        marker: None,
        spans: inline::tokenize(line),
        has_trailing_newline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_line() {
        let message = render("# Title");
        assert_eq!(message.len(), 1);

        let line = &message.lines[0];
        assert_eq!(line.kind, BlockKind::Heading(1));
        assert_eq!(line.marker, None);
        assert_eq!(line.spans, vec![InlineSpan::plain("Title")]);
        assert!(!line.has_trailing_newline);
    }

    #[test]
    fn test_all_heading_levels() {
        for level in 1..=6u8 {
            let source = format!("{} Depth", "#".repeat(level as usize));
            let message = render(&source);
            assert_eq!(
                message.lines[0].kind,
                BlockKind::Heading(level),
                "source: {source:?}"
            );
        }
    }

    #[test]
    fn test_seven_hashes_is_not_a_heading() {
        let message = render("####### Too deep");
        let line = &message.lines[0];
        assert_eq!(line.kind, BlockKind::Plain);
        assert_eq!(line.spans, vec![InlineSpan::plain("####### Too deep")]);
    }

    #[test]
    fn test_hash_without_whitespace_is_plain() {
        let message = render("#Title");
        assert_eq!(message.lines[0].kind, BlockKind::Plain);
    }

    #[test]
    fn test_heading_with_empty_body() {
        let message = render("## ");
        let line = &message.lines[0];
        assert_eq!(line.kind, BlockKind::Heading(2));
        assert!(line.spans.is_empty());
    }

    #[test]
    fn test_bullet_line() {
        let message = render("- item one");
        let line = &message.lines[0];
        assert_eq!(line.kind, BlockKind::Bullet);
        assert_eq!(
            line.marker,
            Some(InlineSpan::new("\u{2022} ", SpanStyle::Bold))
        );
        assert_eq!(line.spans, vec![InlineSpan::plain("item one")]);
    }

    #[test]
    fn test_star_bullet_uses_the_same_marker() {
        let dash = render("- same");
        let star = render("* same");
        assert_eq!(dash.lines[0].marker, star.lines[0].marker);
        assert_eq!(star.lines[0].kind, BlockKind::Bullet);
    }

    #[test]
    fn test_numbered_line() {
        let message = render("2. second");
        let line = &message.lines[0];
        assert_eq!(line.kind, BlockKind::Numbered("2".to_string()));
        assert_eq!(line.marker, Some(InlineSpan::new("2. ", SpanStyle::Bold)));
        assert_eq!(line.spans, vec![InlineSpan::plain("second")]);
    }

    #[test]
    fn test_multi_digit_ordinal_is_kept() {
        let message = render("10. tenth");
        assert_eq!(message.lines[0].kind, BlockKind::Numbered("10".to_string()));
        assert_eq!(
            message.lines[0].marker,
            Some(InlineSpan::new("10. ", SpanStyle::Bold))
        );
    }

    #[test]
    fn test_digits_without_dot_space_are_plain() {
        assert_eq!(render("3.no space").lines[0].kind, BlockKind::Plain);
        assert_eq!(render("4) paren").lines[0].kind, BlockKind::Plain);
    }

    #[test]
    fn test_inline_styles_inside_plain_line() {
        let message = render("**bold** and *italic* and `code`");
        let line = &message.lines[0];
        assert_eq!(line.kind, BlockKind::Plain);
        assert_eq!(
            line.spans,
            vec![
                InlineSpan::new("bold", SpanStyle::Bold),
                InlineSpan::plain(" and "),
                InlineSpan::new("italic", SpanStyle::Italic),
                InlineSpan::plain(" and "),
                InlineSpan::new("code", SpanStyle::Code),
            ]
        );
    }

    #[test]
    fn test_inline_styles_inside_list_body() {
        let message = render("- has **bold** text");
        let line = &message.lines[0];
        assert_eq!(line.kind, BlockKind::Bullet);
        assert_eq!(
            line.spans,
            vec![
                InlineSpan::plain("has "),
                InlineSpan::new("bold", SpanStyle::Bold),
                InlineSpan::plain(" text"),
            ]
        );
    }

    #[test]
    fn test_unterminated_markup_renders_literally() {
        let message = render("**unterminated");
        let line = &message.lines[0];
        assert_eq!(line.kind, BlockKind::Plain);
        assert_eq!(line.spans, vec![InlineSpan::plain("**unterminated")]);
    }

    #[test]
    fn test_line_count_and_trailing_newlines() {
        let message = render("line1\nline2");
        assert_eq!(message.len(), 2);
        assert!(message.lines[0].has_trailing_newline);
        assert!(!message.lines[1].has_trailing_newline);
    }

    #[test]
    fn test_empty_message_is_one_empty_line() {
        let message = render("");
        assert_eq!(message.len(), 1);

        let line = &message.lines[0];
        assert_eq!(line.kind, BlockKind::Plain);
        assert!(line.spans.is_empty());
        assert!(!line.has_trailing_newline);
    }

    #[test]
    fn test_blank_lines_are_preserved() {
        let message = render("a\n\nb\n");
        assert_eq!(message.len(), 4);
        assert!(message.lines[1].spans.is_empty());
        assert!(message.lines[3].spans.is_empty());
        assert!(message.lines[2].has_trailing_newline);
        assert!(!message.lines[3].has_trailing_newline);
    }

    #[test]
    fn test_indices_follow_input_order() {
        let message = render("# a\n- b\n1. c\nd");
        let indices: Vec<usize> = message.iter().map(|line| line.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_list_bodies_are_not_retested_for_blocks() {
        // The body "- nested" must stay inline text, not become a nested bullet
        let message = render("- - nested");
        let line = &message.lines[0];
        assert_eq!(line.kind, BlockKind::Bullet);
        assert_eq!(line.spans, vec![InlineSpan::plain("- nested")]);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let source = "# h\n- a **b**\n7. *c*\nplain `d`\n";
        assert_eq!(render(source), render(source));
    }
}
