use ecoloop_core::frame::FRAME_ERROR_MESSAGE;
use ecoloop_core::{level_count, FrameController, FrameStatus, GameProgress, LevelError};

#[test]
fn starts_loading_on_first_level() {
    let frame = FrameController::new(3);
    assert_eq!(frame.status(), &FrameStatus::Loading);
    assert_eq!(frame.progress().current_index(), 0);
    assert_eq!(frame.progress().total(), 3);
    assert!(!frame.is_fullscreen());
}

#[test]
fn load_and_error_signals() {
    let mut frame = FrameController::new(3);
    let key = frame.key();
    assert!(frame.frame_loaded(key));
    assert_eq!(frame.status(), &FrameStatus::Ready);

    frame.reload();
    let key = frame.key();
    assert!(frame.frame_failed(key, ""));
    assert_eq!(frame.status().error_message(), Some(FRAME_ERROR_MESSAGE));
}

#[test]
fn reload_changes_identity_key() {
    let mut frame = FrameController::new(3);
    let key = frame.key();
    frame.frame_failed(key, "offline");
    frame.reload();
    assert_ne!(frame.key(), key);
    assert_eq!(frame.status(), &FrameStatus::Loading);
    assert!(!frame.frame_loaded(key));
    assert!(frame.frame_loaded(frame.key()));
}

#[test]
fn advance_resets_state_and_moves_forward() {
    let mut frame = FrameController::new(3);
    let key = frame.key();
    frame.frame_failed(key, "broken");
    assert!(frame.advance());
    assert_eq!(frame.progress().current_index(), 1);
    assert_eq!(frame.status(), &FrameStatus::Loading);
    assert_eq!(frame.status().error_message(), None);
    assert_ne!(frame.key(), key);
}

#[test]
fn advance_from_last_level_is_noop() {
    let mut frame = FrameController::new(3);
    frame.select(2).unwrap();
    let key = frame.key();
    assert!(frame.frame_loaded(key));
    assert!(!frame.advance());
    assert_eq!(frame.progress().current_index(), 2);
    assert_eq!(frame.status(), &FrameStatus::Ready);
    assert_eq!(frame.key(), key);
}

#[test]
fn select_earlier_level_is_allowed() {
    let mut frame = FrameController::new(4);
    frame.advance();
    frame.advance();
    frame.select(0).unwrap();
    assert_eq!(frame.progress().current_index(), 0);
    assert!(frame.progress().is_first());
}

#[test]
fn select_out_of_range_leaves_state() {
    let mut frame = FrameController::new(2);
    let key = frame.key();
    frame.frame_loaded(key);
    assert_eq!(
        frame.select(5),
        Err(LevelError::OutOfRange { index: 5, total: 2 })
    );
    assert_eq!(frame.status(), &FrameStatus::Ready);
    assert_eq!(frame.key(), key);
}

#[test]
fn back_stops_at_first_level() {
    let mut frame = FrameController::new(3);
    assert!(!frame.back());
    frame.advance();
    assert!(frame.back());
    assert_eq!(frame.progress().current_index(), 0);
}

#[test]
fn fullscreen_follows_platform() {
    let mut frame = FrameController::new(1);
    frame.fullscreen_changed(true);
    assert!(frame.is_fullscreen());
    frame.fullscreen_changed(false);
    assert!(!frame.is_fullscreen());
}

#[test]
fn empty_progress_never_advances() {
    let mut progress = GameProgress::new(0);
    assert!(!progress.advance());
    assert!(progress.select(0).is_err());
}

#[test]
fn catalog_controller_matches_config() {
    let frame = FrameController::for_catalog();
    assert_eq!(frame.progress().total(), level_count());
    assert!(frame.current_level().is_some());
}
