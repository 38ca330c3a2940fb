//! Styled-text presentation for rendered messages
//!
//! Only affects assistant text - user and status lines are drawn as plain
//! text by the chat view. The renderer core emits semantic tags; this
//! module maps those tags to concrete ratatui styles through the active
//! theme.

mod cache;
mod render;

pub use cache::RenderCache;
pub use render::render_message;
