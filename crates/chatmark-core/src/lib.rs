//! Markdown-subset rendering for chat messages
//!
//! Converts a raw message string into an ordered sequence of style-tagged
//! text segments: one [`RenderedLine`] per input line, each carrying its
//! block classification and the inline spans of its body. The renderer is
//! pure and total - any string renders without error, and the same input
//! always produces the same output - so it can be called from any thread
//! or task with nothing to coordinate.
//!
//! Only semantic tags are emitted. What a heading or a bold span looks
//! like is decided by whoever lays the segments out.
//!
//! ```
//! use chatmark_core::{render, BlockKind, SpanStyle};
//!
//! let message = render("# Hello\n**world**");
//! assert_eq!(message.len(), 2);
//! assert_eq!(message.lines[0].kind, BlockKind::Heading(1));
//! assert_eq!(message.lines[1].spans[0].style, SpanStyle::Bold);
//! ```

mod elements;
mod inline;
mod parser;

pub use elements::{BlockKind, InlineSpan, RenderedLine, RenderedMessage, SpanStyle};
pub use parser::render;
