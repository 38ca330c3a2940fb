//! Inline token scanning for bold, italic, and inline code
//!
//! A single left-to-right pass over a line body. Matched tokens become
//! styled spans with their delimiters stripped; everything between matches
//! is emitted verbatim as plain spans. Delimiters without a closing pair
//! never match, so they stay literal text. Styled content is not re-scanned
//! for nested markup.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::elements::{InlineSpan, SpanStyle};

/// Token shapes in precedence order: `**bold**`, `*italic*`, `` `code` ``.
///
/// The alternation is tried in order at each position, so bold wins over
/// italic when both could start at the same `*`.
static TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*[^*]+\*\*|\*[^*]+\*|`[^`]+`").unwrap());

/// Partition a line body into styled and plain spans
///
/// Returns an empty vector for an empty body; otherwise the spans cover the
/// body with no gaps and no overlaps, in source order.
pub(crate) fn tokenize(body: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut last_end = 0;

    for mat in TOKEN_REGEX.find_iter(body) {
        // Plain text between the previous token and this one
        if mat.start() > last_end {
            spans.push(InlineSpan::plain(&body[last_end..mat.start()]));
        }

        spans.push(styled_span(mat.as_str()));
        last_end = mat.end();
    }

    // Whatever is left after the last token
    if last_end < body.len() {
        spans.push(InlineSpan::plain(&body[last_end..]));
    }

    spans
}

/// Strip the delimiters off a matched token and tag it
fn styled_span(token: &str) -> InlineSpan {
    if let Some(inner) = token.strip_prefix("**").and_then(|t| t.strip_suffix("**")) {
        return InlineSpan::new(inner, SpanStyle::Bold);
    }
    if let Some(inner) = token.strip_prefix('*').and_then(|t| t.strip_suffix('*')) {
        return InlineSpan::new(inner, SpanStyle::Italic);
    }
    if let Some(inner) = token.strip_prefix('`').and_then(|t| t.strip_suffix('`')) {
        return InlineSpan::new(inner, SpanStyle::Code);
    }

    // TOKEN_REGEX only produces the three shapes above
    InlineSpan::plain(token)
}
