use std::fmt;

use crate::config::{self, GameLevel};

pub const FRAME_ERROR_MESSAGE: &str =
    "This game could not be loaded. Check your connection and try again.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FrameStatus {
    #[default]
    Loading,
    Ready,
    Error(String),
}

impl FrameStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, FrameStatus::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FrameStatus::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelError {
    OutOfRange { index: usize, total: usize },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::OutOfRange { index, total } => {
                write!(f, "level {index} is out of range (have {total})")
            }
        }
    }
}

impl std::error::Error for LevelError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameProgress {
    current_index: usize,
    total: usize,
}

impl GameProgress {
    pub fn new(total: usize) -> Self {
        Self {
            current_index: 0,
            total,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.total
    }

    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current_index += 1;
        true
    }

    pub fn back(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current_index -= 1;
        true
    }

    pub fn select(&mut self, index: usize) -> Result<(), LevelError> {
        if index >= self.total {
            return Err(LevelError::OutOfRange {
                index,
                total: self.total,
            });
        }
        self.current_index = index;
        Ok(())
    }
}

/// Identity of one iframe instance. Changing it recreates the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FrameKey(u64);

impl FrameKey {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Loading, error and fullscreen state of the embedded game player.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameController {
    status: FrameStatus,
    key: FrameKey,
    progress: GameProgress,
    fullscreen: bool,
}

impl FrameController {
    pub fn new(total: usize) -> Self {
        Self {
            status: FrameStatus::Loading,
            key: FrameKey::default(),
            progress: GameProgress::new(total),
            fullscreen: false,
        }
    }

    pub fn for_catalog() -> Self {
        Self::new(config::level_count())
    }

    pub fn status(&self) -> &FrameStatus {
        &self.status
    }

    pub fn key(&self) -> FrameKey {
        self.key
    }

    pub fn progress(&self) -> GameProgress {
        self.progress
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn current_level(&self) -> Option<&'static GameLevel> {
        config::level_at(self.progress.current_index())
    }

    /// `load` from a frame that has since been replaced is ignored.
    pub fn frame_loaded(&mut self, key: FrameKey) -> bool {
        if key != self.key || !self.status.is_loading() {
            return false;
        }
        self.status = FrameStatus::Ready;
        true
    }

    pub fn frame_failed(&mut self, key: FrameKey, message: &str) -> bool {
        if key != self.key {
            return false;
        }
        let message = message.trim();
        let message = if message.is_empty() {
            FRAME_ERROR_MESSAGE
        } else {
            message
        };
        self.status = FrameStatus::Error(message.to_string());
        true
    }

    pub fn reload(&mut self) {
        self.restart();
    }

    /// No-op on the last level.
    pub fn advance(&mut self) -> bool {
        if !self.progress.advance() {
            return false;
        }
        self.restart();
        true
    }

    pub fn back(&mut self) -> bool {
        if !self.progress.back() {
            return false;
        }
        self.restart();
        true
    }

    pub fn select(&mut self, index: usize) -> Result<(), LevelError> {
        self.progress.select(index)?;
        self.restart();
        Ok(())
    }

    /// Mirrors the platform notification; the toggle only makes requests.
    pub fn fullscreen_changed(&mut self, active: bool) {
        self.fullscreen = active;
    }

    fn restart(&mut self) {
        self.status = FrameStatus::Loading;
        self.key = FrameKey(self.key.0.wrapping_add(1));
    }
}
