#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameLevel {
    pub title: &'static str,
    pub url: &'static str,
}

include!(concat!(env!("OUT_DIR"), "/site_config.rs"));

pub fn level_count() -> usize {
    GAME_LEVELS.len()
}

pub fn level_at(index: usize) -> Option<&'static GameLevel> {
    GAME_LEVELS.get(index)
}
