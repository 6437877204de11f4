//! Lifecycle tests for the two-phase tracking protocol

use head_pose_tracker::{config::Config, tracker::HeadPoseTracker, Error};
use opencv::core::Mat;

#[test]
fn process_frame_before_initialize_fails_explicitly() {
    let mut tracker = HeadPoseTracker::new(Config::default());
    assert!(!tracker.is_ready());

    let frame = Mat::default();
    let result = tracker.process_frame(&frame, 0);

    // Must be the dedicated uninitialized-use error, never an empty success
    match result {
        Err(Error::NotInitialized) => {}
        other => panic!("Expected NotInitialized, got {other:?}"),
    }
}

#[test]
fn release_is_safe_before_and_after_use() {
    let mut tracker = HeadPoseTracker::new(Config::default());

    tracker.release();
    tracker.release();
    assert!(!tracker.is_ready());

    // Still the explicit error after a release, not a crash
    let frame = Mat::default();
    assert!(matches!(tracker.process_frame(&frame, 0), Err(Error::NotInitialized)));
}

#[test]
fn initialize_rejects_invalid_config() {
    let mut config = Config::default();
    config.detector.num_faces = 4;

    let mut tracker = HeadPoseTracker::new(config);
    assert!(tracker.initialize().is_err());
    assert!(!tracker.is_ready());
}
