//! Semantic tag to visual style mapping

use chatmark_core::{BlockKind, InlineSpan, RenderedLine, SpanStyle};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::themes::Theme;

/// Render a raw message into themed terminal lines, one per message line
pub fn render_message(text: &str, theme: &Theme) -> Vec<Line<'static>> {
    chatmark_core::render(text)
        .iter()
        .map(|line| render_line(line, theme))
        .collect()
}

fn render_line(line: &RenderedLine, theme: &Theme) -> Line<'static> {
    let mut spans = Vec::with_capacity(line.spans.len() + 1);

    if let Some(marker) = &line.marker {
        spans.push(Span::styled(
            marker.text.clone(),
            Style::default()
                .fg(theme.marker_color)
                .add_modifier(Modifier::BOLD),
        ));
    }

    for span in &line.spans {
        spans.push(render_span(span, &line.kind, theme));
    }

    Line::from(spans)
}

/// Adding a style tag means extending [`SpanStyle`] and this match - there
/// is no other dispatch point.
fn render_span(span: &InlineSpan, kind: &BlockKind, theme: &Theme) -> Span<'static> {
    let base = base_style(kind, theme);

    match span.style {
        SpanStyle::Plain => Span::styled(span.text.clone(), base),
        SpanStyle::Bold => Span::styled(span.text.clone(), base.add_modifier(Modifier::BOLD)),
        SpanStyle::Italic => Span::styled(span.text.clone(), base.add_modifier(Modifier::ITALIC)),
        SpanStyle::Code => Span::styled(
            format!(" {} ", span.text),
            Style::default()
                .fg(theme.code_color)
                .bg(theme.code_bg_color),
        ),
    }
}

fn base_style(kind: &BlockKind, theme: &Theme) -> Style {
    match kind {
        BlockKind::Heading(level) => heading_style(*level, theme),
        _ => Style::default().fg(theme.text_color),
    }
}

/// Terminals have no font sizes, so heading prominence falls off through
/// modifier combinations instead
fn heading_style(level: u8, theme: &Theme) -> Style {
    let style = Style::default().fg(theme.heading_color);
    match level {
        1 => style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        2 => style.add_modifier(Modifier::BOLD),
        3 => style.add_modifier(Modifier::BOLD | Modifier::ITALIC),
        4 => style.add_modifier(Modifier::BOLD | Modifier::DIM),
        5 => style.add_modifier(Modifier::ITALIC | Modifier::DIM),
        _ => style.add_modifier(Modifier::DIM),
    }
}
