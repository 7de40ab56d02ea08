pub mod config;
pub mod frame;
pub mod theme;
pub mod viewport;
pub mod widget;
pub mod window;

pub use config::{level_at, level_count, GameLevel, GAME_LEVELS};
pub use frame::{FrameController, FrameKey, FrameStatus, GameProgress, LevelError};
pub use theme::{resolve_theme, ThemePreference};
pub use viewport::{DeviceClass, Orientation, Viewport};
pub use widget::{
    EmbedRegistry, LoadPlan, ScriptRequest, SessionToken, WidgetLoadState, WidgetLoader,
    WidgetNotice,
};
pub use window::{
    InteractionError, InteractionMode, MinSize, WindowGeometry, WindowManager, WindowState,
};
