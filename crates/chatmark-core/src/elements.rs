//! Message element types
//!
//! Semantic classification only - colors, fonts, and spacing are owned by
//! the presentation layer.

/// Structural classification of a single message line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// Heading with level 1-6
    Heading(u8),
    /// Bulleted list item ("- " or "* ")
    Bullet,
    /// Numbered list item; the ordinal keeps the exact digits from the line
    Numbered(String),
    /// Anything that is not a heading or list item
    Plain,
}

/// Presentation style tag for one inline span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    Plain,
    Bold,
    Italic,
    Code,
}

/// A contiguous fragment of line text carrying one style tag
///
/// Styled spans hold their text with the markdown delimiters stripped;
/// plain spans hold the source text verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    pub text: String,
    pub style: SpanStyle,
}

impl InlineSpan {
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, SpanStyle::Plain)
    }
}

/// One rendered line of a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    /// Position in the original message (0-based)
    pub index: usize,
    pub kind: BlockKind,
    /// Visual bullet/ordinal prefix, rendered separately from the body spans
    pub marker: Option<InlineSpan>,
    /// Body spans in source order; together they partition the post-marker text
    pub spans: Vec<InlineSpan>,
    /// True for every line except the last - re-joining on this flag
    /// reconstructs the original line-break structure
    pub has_trailing_newline: bool,
}

/// A fully rendered message, one entry per input line in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedMessage {
    pub lines: Vec<RenderedLine>,
}

impl RenderedMessage {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenderedLine> {
        self.lines.iter()
    }
}
