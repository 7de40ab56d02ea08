use crate::config::{CHAT_WIDGET_ID_DARK, CHAT_WIDGET_ID_LIGHT};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("light") {
            Some(ThemePreference::Light)
        } else if trimmed.eq_ignore_ascii_case("dark") {
            Some(ThemePreference::Dark)
        } else {
            None
        }
    }

    /// Chat widget variant matching this appearance.
    pub fn widget_id(self) -> &'static str {
        match self {
            ThemePreference::Light => CHAT_WIDGET_ID_LIGHT,
            ThemePreference::Dark => CHAT_WIDGET_ID_DARK,
        }
    }
}

/// A stored choice wins; otherwise the platform color scheme decides.
pub fn resolve_theme(stored: Option<&str>, system_prefers_dark: bool) -> ThemePreference {
    if let Some(theme) = stored.and_then(ThemePreference::parse) {
        return theme;
    }
    if system_prefers_dark {
        ThemePreference::Dark
    } else {
        ThemePreference::Light
    }
}
