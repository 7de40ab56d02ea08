use ecoloop_core::config::{CHAT_HANDLE, CHAT_SETTLE_MS, CHAT_WIDGET_ID_DARK, CHAT_WIDGET_ID_LIGHT};
use ecoloop_core::{
    level_at, resolve_theme, DeviceClass, Orientation, ThemePreference, Viewport,
    GAME_LEVELS,
};

#[test]
fn game_levels_are_unique_and_indexed() {
    assert!(!GAME_LEVELS.is_empty());
    for (index, level) in GAME_LEVELS.iter().enumerate() {
        assert_eq!(level_at(index), Some(level));
        let first = GAME_LEVELS.iter().position(|other| other.url == level.url);
        assert_eq!(first, Some(index));
    }
    assert_eq!(level_at(GAME_LEVELS.len()), None);
}

#[test]
fn chat_settings_are_present() {
    assert!(!CHAT_HANDLE.is_empty());
    assert!(CHAT_SETTLE_MS > 0);
    assert_ne!(CHAT_WIDGET_ID_LIGHT, CHAT_WIDGET_ID_DARK);
    assert_eq!(ThemePreference::Light.widget_id(), CHAT_WIDGET_ID_LIGHT);
    assert_eq!(ThemePreference::Dark.widget_id(), CHAT_WIDGET_ID_DARK);
}

#[test]
fn stored_theme_wins_over_system() {
    assert_eq!(resolve_theme(Some("light"), true), ThemePreference::Light);
    assert_eq!(resolve_theme(Some(" DARK "), false), ThemePreference::Dark);
    assert_eq!(resolve_theme(Some("sepia"), true), ThemePreference::Dark);
    assert_eq!(resolve_theme(None, false), ThemePreference::Light);
}

#[test]
fn theme_toggle_round_trips() {
    let theme = ThemePreference::Light;
    assert_eq!(theme.toggled(), ThemePreference::Dark);
    assert_eq!(theme.toggled().toggled(), theme);
    assert_eq!(ThemePreference::parse(theme.as_str()), Some(theme));
}

#[test]
fn viewport_classification() {
    let phone = Viewport::new(390.0, 844.0);
    assert_eq!(phone.device_class(), DeviceClass::Mobile);
    assert_eq!(phone.orientation(), Orientation::Portrait);
    let laptop = Viewport::new(1280.0, 800.0);
    assert_eq!(laptop.device_class(), DeviceClass::Desktop);
    assert_eq!(laptop.orientation(), Orientation::Landscape);
    assert_eq!(Viewport::new(768.0, 1024.0).device_class(), DeviceClass::Desktop);
}

#[test]
fn stored_theme_strings_are_lowercase_names() {
    assert_eq!(ThemePreference::Light.as_str(), "light");
    assert_eq!(ThemePreference::Dark.as_str(), "dark");
    for theme in [ThemePreference::Light, ThemePreference::Dark] {
        let system_dark = theme == ThemePreference::Light;
        assert_eq!(resolve_theme(Some(theme.as_str()), system_dark), theme);
    }
    assert_eq!(ThemePreference::parse(""), None);
}
