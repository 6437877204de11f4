//! Property tests for the pure pose estimator

use head_pose_tracker::{
    constants::{LEFT_EYE_INDICES, NOSE_TIP_INDEX, NUM_MESH_LANDMARKS, RIGHT_EYE_INDICES},
    landmark::Landmark,
    pose_estimation::{estimate_pose, pose_from_landmarks},
};
use proptest::prelude::*;

fn mesh(lx: f32, ly: f32, rx: f32, ry: f32, nx: f32, ny: f32) -> Vec<Landmark> {
    let mut set = vec![Landmark::new(0.5, 0.5, 0.0); NUM_MESH_LANDMARKS];
    for &idx in &LEFT_EYE_INDICES {
        set[idx] = Landmark::new(lx, ly, 0.0);
    }
    for &idx in &RIGHT_EYE_INDICES {
        set[idx] = Landmark::new(rx, ry, 0.0);
    }
    set[NOSE_TIP_INDEX] = Landmark::new(nx, ny, 0.0);
    set
}

#[test]
fn no_face_yields_no_reading() {
    assert!(estimate_pose(None).unwrap().is_none());
}

#[test]
fn forward_face_example() {
    let set = mesh(0.40, 0.45, 0.60, 0.45, 0.50, 0.47);
    let pose = pose_from_landmarks(&set).unwrap();

    assert!(pose.roll.abs() < 1e-6);
    assert!(pose.yaw.abs() < 1e-6);
    assert!((pose.pitch - (-2.4)).abs() < 1e-4);
}

#[test]
fn tilted_head_example() {
    let set = mesh(0.40, 0.40, 0.60, 0.50, 0.50, 0.45);
    let pose = pose_from_landmarks(&set).unwrap();

    assert!((pose.roll - 26.565_051).abs() < 1e-3);
    assert!((pose.yaw + 26.565_051).abs() < 1e-3);
}

#[test]
fn estimator_reads_through_detection_option() {
    let set = mesh(0.40, 0.45, 0.60, 0.45, 0.50, 0.47);
    let reading = estimate_pose(Some(set.as_slice())).unwrap();
    assert!(reading.is_some());
}

proptest! {
    #[test]
    fn yaw_is_always_negated_roll(
        lx in 0.0f32..1.0, ly in 0.0f32..1.0,
        rx in 0.0f32..1.0, ry in 0.0f32..1.0,
        nx in 0.0f32..1.0, ny in 0.0f32..1.0,
    ) {
        let set = mesh(lx, ly, rx, ry, nx, ny);
        let pose = pose_from_landmarks(&set).unwrap();
        prop_assert_eq!(pose.yaw, -pose.roll);
    }

    #[test]
    fn level_eyes_give_zero_roll(
        y in 0.0f32..1.0,
        lx in 0.0f32..0.45,
        dx in 0.05f32..0.5,
    ) {
        // Eyes level with R strictly to the right of L
        let set = mesh(lx, y, lx + dx, y, 0.5, 0.5);
        let pose = pose_from_landmarks(&set).unwrap();
        prop_assert!(pose.roll.abs() < 1e-6);
        prop_assert!(pose.yaw.abs() < 1e-6);
    }

    #[test]
    fn pitch_is_linear_in_nose_offset(
        ny in 0.0f32..1.0,
    ) {
        let eye_y = 0.45f32;
        let set = mesh(0.40, eye_y, 0.60, eye_y, 0.5, ny);
        let pose = pose_from_landmarks(&set).unwrap();
        let expected = (f64::from(eye_y) - f64::from(ny)) * 120.0;
        prop_assert!((pose.pitch - expected).abs() < 1e-3);
    }
}
