use std::fmt;

use crate::viewport::{DeviceClass, Viewport};

pub const DEFAULT_WIDTH: f64 = 800.0;
pub const DEFAULT_HEIGHT: f64 = 700.0;
pub const VIEWPORT_MARGIN: f64 = 64.0;
pub const DESKTOP_MIN_WIDTH: f64 = 360.0;
pub const DESKTOP_MIN_HEIGHT: f64 = 400.0;
pub const MOBILE_MIN_WIDTH: f64 = 280.0;
pub const MOBILE_MIN_HEIGHT: f64 = 320.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinSize {
    pub width: f64,
    pub height: f64,
}

pub fn min_size(device: DeviceClass) -> MinSize {
    match device {
        DeviceClass::Desktop => MinSize {
            width: DESKTOP_MIN_WIDTH,
            height: DESKTOP_MIN_HEIGHT,
        },
        DeviceClass::Mobile => MinSize {
            width: MOBILE_MIN_WIDTH,
            height: MOBILE_MIN_HEIGHT,
        },
    }
}

/// Small devices, and viewports that cannot hold the minimum panel, only
/// get the maximized layout.
pub fn maximize_forced(viewport: Viewport) -> bool {
    let min = min_size(viewport.device_class());
    viewport.is_mobile() || viewport.width < min.width || viewport.height < min.height
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl WindowGeometry {
    pub fn full(viewport: Viewport) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: viewport.width,
            height: viewport.height,
        }
    }

    /// Default panel size, centered.
    pub fn centered(viewport: Viewport) -> Self {
        let min = min_size(viewport.device_class());
        let width = DEFAULT_WIDTH
            .min(viewport.width - VIEWPORT_MARGIN)
            .max(min.width);
        let height = DEFAULT_HEIGHT
            .min(viewport.height - VIEWPORT_MARGIN)
            .max(min.height);
        let x = ((viewport.width - width) / 2.0).max(0.0);
        let y = ((viewport.height - height) / 2.0).max(0.0);
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Snapshot of the panel as it should be rendered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowState {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub maximized: bool,
    pub dragging: bool,
    pub resizing: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionMode {
    Drag,
    Resize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionError {
    Maximized,
    AlreadyActive(InteractionMode),
}

impl fmt::Display for InteractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionError::Maximized => write!(f, "window is maximized"),
            InteractionError::AlreadyActive(InteractionMode::Drag) => {
                write!(f, "a drag is already in progress")
            }
            InteractionError::AlreadyActive(InteractionMode::Resize) => {
                write!(f, "a resize is already in progress")
            }
        }
    }
}

impl std::error::Error for InteractionError {}

#[derive(Clone, Copy, Debug)]
struct Interaction {
    mode: InteractionMode,
    origin_x: f64,
    origin_y: f64,
    start: WindowGeometry,
}

/// Position, size and maximize state of the floating chat panel.
///
/// `geometry` always holds the explicit (un-maximized) placement so that
/// leaving maximized mode can restore it. While maximized the effective
/// geometry is the whole viewport.
#[derive(Clone, Debug)]
pub struct WindowManager {
    viewport: Viewport,
    geometry: WindowGeometry,
    maximized: bool,
    interaction: Option<Interaction>,
}

impl WindowManager {
    pub fn open(viewport: Viewport) -> Self {
        Self {
            viewport,
            geometry: WindowGeometry::centered(viewport),
            maximized: maximize_forced(viewport),
            interaction: None,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_mobile(&self) -> bool {
        self.viewport.is_mobile()
    }

    pub fn maximize_locked(&self) -> bool {
        maximize_forced(self.viewport)
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    /// Drag and resize handles are offered only when this is true.
    pub fn handles_enabled(&self) -> bool {
        !self.maximized
    }

    pub fn interaction(&self) -> Option<InteractionMode> {
        self.interaction.map(|active| active.mode)
    }

    pub fn geometry(&self) -> WindowGeometry {
        if self.maximized {
            WindowGeometry::full(self.viewport)
        } else {
            self.geometry
        }
    }

    pub fn state(&self) -> WindowState {
        let geometry = self.geometry();
        let mode = self.interaction();
        WindowState {
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            maximized: self.maximized,
            dragging: mode == Some(InteractionMode::Drag),
            resizing: mode == Some(InteractionMode::Resize),
        }
    }

    pub fn begin_drag(&mut self, pointer_x: f64, pointer_y: f64) -> Result<(), InteractionError> {
        self.begin(InteractionMode::Drag, pointer_x, pointer_y)
    }

    pub fn begin_resize(
        &mut self,
        pointer_x: f64,
        pointer_y: f64,
    ) -> Result<(), InteractionError> {
        self.begin(InteractionMode::Resize, pointer_x, pointer_y)
    }

    fn begin(
        &mut self,
        mode: InteractionMode,
        pointer_x: f64,
        pointer_y: f64,
    ) -> Result<(), InteractionError> {
        if self.maximized {
            return Err(InteractionError::Maximized);
        }
        if let Some(active) = self.interaction {
            return Err(InteractionError::AlreadyActive(active.mode));
        }
        self.interaction = Some(Interaction {
            mode,
            origin_x: pointer_x,
            origin_y: pointer_y,
            start: self.geometry,
        });
        Ok(())
    }

    /// Applies a pointer move to the active interaction. Returns whether the
    /// geometry changed.
    pub fn pointer_move(&mut self, pointer_x: f64, pointer_y: f64) -> bool {
        let Some(active) = self.interaction else {
            return false;
        };
        let dx = pointer_x - active.origin_x;
        let dy = pointer_y - active.origin_y;
        let start = active.start;
        let next = match active.mode {
            InteractionMode::Drag => {
                let (x, y) = clamp_position(
                    start.x + dx,
                    start.y + dy,
                    start.width,
                    start.height,
                    self.viewport,
                );
                WindowGeometry {
                    x,
                    y,
                    width: start.width,
                    height: start.height,
                }
            }
            InteractionMode::Resize => {
                let (width, height) = clamp_size(
                    start.width + dx,
                    start.height + dy,
                    start.x,
                    start.y,
                    self.viewport,
                );
                WindowGeometry {
                    x: start.x,
                    y: start.y,
                    width,
                    height,
                }
            }
        };
        if next == self.geometry {
            return false;
        }
        self.geometry = next;
        true
    }

    /// Ends the active interaction, if any.
    pub fn pointer_up(&mut self) -> Option<InteractionMode> {
        self.interaction.take().map(|active| active.mode)
    }

    /// Abandons the active interaction and puts the window back where it
    /// was when the interaction began.
    pub fn cancel_interaction(&mut self) -> Option<InteractionMode> {
        let active = self.interaction.take()?;
        self.geometry = active.start;
        Some(active.mode)
    }

    /// Returns the maximize state after the toggle. Locked viewports stay
    /// maximized.
    pub fn toggle_maximize(&mut self) -> bool {
        self.interaction = None;
        if self.maximize_locked() {
            self.maximized = true;
            return true;
        }
        self.maximized = !self.maximized;
        if !self.maximized {
            self.geometry = fit_to_viewport(self.geometry, self.viewport);
        }
        self.maximized
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if maximize_forced(viewport) {
            self.interaction = None;
            self.maximized = true;
        }
        self.geometry = fit_to_viewport(self.geometry, viewport);
        if let Some(active) = self.interaction.as_mut() {
            active.start = fit_to_viewport(active.start, viewport);
        }
    }
}

pub fn clamp_position(x: f64, y: f64, width: f64, height: f64, viewport: Viewport) -> (f64, f64) {
    let max_x = (viewport.width - width).max(0.0);
    let max_y = (viewport.height - height).max(0.0);
    (x.clamp(0.0, max_x), y.clamp(0.0, max_y))
}

/// The minimum wins when the viewport is too small to honor both bounds.
pub fn clamp_size(width: f64, height: f64, x: f64, y: f64, viewport: Viewport) -> (f64, f64) {
    let min = min_size(viewport.device_class());
    let max_width = (viewport.width - x).max(min.width);
    let max_height = (viewport.height - y).max(min.height);
    (
        width.max(min.width).min(max_width),
        height.max(min.height).min(max_height),
    )
}

fn fit_to_viewport(geometry: WindowGeometry, viewport: Viewport) -> WindowGeometry {
    let min = min_size(viewport.device_class());
    let width = geometry.width.min(viewport.width).max(min.width);
    let height = geometry.height.min(viewport.height).max(min.height);
    let (x, y) = clamp_position(geometry.x, geometry.y, width, height, viewport);
    WindowGeometry {
        x,
        y,
        width,
        height,
    }
}
