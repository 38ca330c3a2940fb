//! Theme definitions and the persisted dark-mode preference
//!
//! Two built-in themes, dark and light. The renderer core emits semantic
//! tags only; every color decision for those tags is made here.

use std::fs;
use std::path::PathBuf;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// A complete theme definition
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,

    // Chrome
    pub bg_color: Color,
    pub title_color: Color,
    pub dim_color: Color,
    pub error_color: Color,

    // Message role labels
    pub user_msg_color: Color,
    pub assistant_msg_color: Color,

    // Rendered message text
    pub text_color: Color,
    pub heading_color: Color,
    pub marker_color: Color,
    pub code_color: Color,
    pub code_bg_color: Color,

    // Input line
    pub input_border_color: Color,
    pub input_placeholder_color: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            bg_color: Color::Rgb(18, 18, 24),
            title_color: Color::Rgb(189, 147, 249),
            dim_color: Color::Rgb(98, 114, 164),
            error_color: Color::Rgb(255, 85, 85),
            user_msg_color: Color::Rgb(139, 233, 253),
            assistant_msg_color: Color::Rgb(80, 250, 123),
            text_color: Color::Rgb(248, 248, 242),
            heading_color: Color::Rgb(189, 147, 249),
            marker_color: Color::Rgb(255, 184, 108),
            code_color: Color::Rgb(241, 250, 140),
            code_bg_color: Color::Rgb(51, 51, 51),
            input_border_color: Color::Rgb(98, 114, 164),
            input_placeholder_color: Color::Rgb(98, 114, 164),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            bg_color: Color::Rgb(250, 250, 250),
            title_color: Color::Rgb(98, 0, 238),
            dim_color: Color::Rgb(130, 130, 140),
            error_color: Color::Rgb(176, 0, 32),
            user_msg_color: Color::Rgb(2, 119, 189),
            assistant_msg_color: Color::Rgb(27, 94, 32),
            text_color: Color::Rgb(33, 33, 33),
            heading_color: Color::Rgb(98, 0, 238),
            marker_color: Color::Rgb(191, 54, 12),
            code_color: Color::Rgb(136, 0, 27),
            code_bg_color: Color::Rgb(232, 232, 232),
            input_border_color: Color::Rgb(150, 150, 160),
            input_placeholder_color: Color::Rgb(160, 160, 170),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.name == "dark"
    }

    /// The other built-in theme - used by the runtime toggle
    pub fn toggled(&self) -> Self {
        if self.is_dark() {
            Self::light()
        } else {
            Self::dark()
        }
    }
}

/// On-disk preference record
#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(default)]
    dark_mode: bool,
}

fn preferences_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chatmark").join("preferences.json"))
}

/// Theme for the saved preference; light when nothing has been saved yet
pub fn load_preferred() -> Theme {
    let prefs = preferences_path()
        .and_then(|path| fs::read_to_string(path).ok())
        .and_then(|raw| serde_json::from_str::<Preferences>(&raw).ok())
        .unwrap_or_default();

    if prefs.dark_mode {
        Theme::dark()
    } else {
        Theme::light()
    }
}

/// Persist the preference; failures are logged, never fatal
pub fn save_preferred(theme: &Theme) {
    let Some(path) = preferences_path() else {
        return;
    };

    if let Some(dir) = path.parent() {
        if let Err(err) = fs::create_dir_all(dir) {
            tracing::warn!(error = %err, "failed to create preferences directory");
            return;
        }
    }

    let prefs = Preferences {
        dark_mode: theme.is_dark(),
    };
    match serde_json::to_string_pretty(&prefs) {
        Ok(raw) => {
            if let Err(err) = fs::write(&path, raw) {
                tracing::warn!(error = %err, "failed to save theme preference");
            }
        }
        Err(err) => tracing::warn!(error = %err, "failed to encode theme preference"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_between_the_two_themes() {
        assert_eq!(Theme::dark().toggled().name, "light");
        assert_eq!(Theme::light().toggled().name, "dark");
    }

    #[test]
    fn test_dark_and_light_use_different_text_colors() {
        assert_ne!(Theme::dark().text_color, Theme::light().text_color);
    }

    #[test]
    fn test_preference_defaults_to_light() {
        let prefs: Preferences = serde_json::from_str("{}").unwrap();
        assert!(!prefs.dark_mode);
    }

    #[test]
    fn test_preference_round_trip() {
        let raw = serde_json::to_string(&Preferences { dark_mode: true }).unwrap();
        let back: Preferences = serde_json::from_str(&raw).unwrap();
        assert!(back.dark_mode);
    }
}
