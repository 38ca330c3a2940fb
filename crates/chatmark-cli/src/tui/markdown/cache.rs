//! Render cache
//!
//! Caches wrapped, themed transcript lines so the draw loop does not
//! re-render every message on every frame. Keyed by message content hash
//! and wrap width; a theme switch or resize drops the whole cache.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use ratatui::text::Line;

use super::render_message;
use crate::tui::text::wrap_lines;
use crate::tui::themes::Theme;

/// Cache key: (content_hash, wrap_width)
type CacheKey = (u64, usize);

pub struct RenderCache {
    cache: HashMap<CacheKey, Arc<Vec<Line<'static>>>>,
    /// Theme the cached entries were rendered with
    theme_name: &'static str,
    /// Last wrap width to invalidate on resize
    last_width: usize,
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderCache {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            theme_name: "",
            last_width: 0,
        }
    }

    /// Invalidate if the theme or wrap width changed since the last frame.
    /// Returns true if the cache was dropped.
    pub fn check(&mut self, theme: &Theme, width: usize) -> bool {
        if self.theme_name != theme.name || self.last_width != width {
            self.cache.clear();
            self.theme_name = theme.name;
            self.last_width = width;
            true
        } else {
            false
        }
    }

    /// Get or render the wrapped lines for one message
    pub fn get_or_render(
        &mut self,
        content: &str,
        theme: &Theme,
        width: usize,
    ) -> Arc<Vec<Line<'static>>> {
        let key = (content_hash(content), width);

        if let Some(cached) = self.cache.get(&key) {
            return Arc::clone(cached);
        }

        let rendered = Arc::new(wrap_lines(&render_message(content, theme), width));
        self.cache.insert(key, Arc::clone(&rendered));
        rendered
    }
}

fn content_hash(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_lookups_share_one_rendering() {
        let theme = Theme::dark();
        let mut cache = RenderCache::new();
        cache.check(&theme, 80);

        let first = cache.get_or_render("**hello**", &theme, 80);
        let second = cache.get_or_render("**hello**", &theme, 80);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_theme_switch_drops_the_cache() {
        let mut cache = RenderCache::new();

        let dark = Theme::dark();
        cache.check(&dark, 80);
        let first = cache.get_or_render("text", &dark, 80);

        let light = Theme::light();
        assert!(cache.check(&light, 80));
        let second = cache.get_or_render("text", &light, 80);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_resize_drops_the_cache() {
        let theme = Theme::dark();
        let mut cache = RenderCache::new();

        assert!(cache.check(&theme, 80));
        assert!(!cache.check(&theme, 80));
        assert!(cache.check(&theme, 60));
    }

    #[test]
    fn test_entries_are_wrapped_at_the_requested_width() {
        let theme = Theme::dark();
        let mut cache = RenderCache::new();
        cache.check(&theme, 4);

        let rows = cache.get_or_render("abcdefgh", &theme, 4);
        assert_eq!(rows.len(), 2);
    }
}
