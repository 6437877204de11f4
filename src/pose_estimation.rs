//! Head pose estimation from facial landmarks.
//!
//! The estimator is a pure function over one frame's landmark set: it derives
//! yaw, pitch and roll from fixed eye-region and nose-tip mesh indices. It
//! keeps no state and is safe to call from any thread.

use crate::{
    constants::{LEFT_EYE_INDICES, NOSE_TIP_INDEX, NUM_MESH_LANDMARKS, PITCH_SCALE, RIGHT_EYE_INDICES},
    landmark::Landmark,
    Error, Result,
};

/// Head orientation reading for one frame, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadPose {
    /// Rotation about the vertical axis (left/right turn)
    pub yaw: f64,
    /// Rotation about the lateral axis (nod up/down)
    pub pitch: f64,
    /// Rotation about the depth axis (ear-to-shoulder tilt)
    pub roll: f64,
}

/// Estimate head pose from an optional landmark set.
///
/// `None` input means no face was detected this frame and yields `Ok(None)`,
/// never a zeroed pose: callers must be able to distinguish "nobody in frame"
/// from "face looking straight ahead."
///
/// # Errors
///
/// Returns an error if a landmark set is present but too short to index the
/// fixed eye and nose subsets.
pub fn estimate_pose(landmarks: Option<&[Landmark]>) -> Result<Option<HeadPose>> {
    match landmarks {
        None => Ok(None),
        Some(set) => pose_from_landmarks(set).map(Some),
    }
}

/// Compute the head pose for a full mesh landmark set.
///
/// Roll is the angle of the left-eye-center to right-eye-center vector
/// relative to horizontal. Yaw is the negation of roll, a deliberate
/// two-landmark proxy rather than a true out-of-plane solve; consumers depend
/// on the exact identity, so it must not be replaced silently. Pitch is the
/// scaled vertical offset between the eye midline and the nose tip.
///
/// # Errors
///
/// Returns an error if fewer than [`NUM_MESH_LANDMARKS`] points are given.
pub fn pose_from_landmarks(landmarks: &[Landmark]) -> Result<HeadPose> {
    if landmarks.len() < NUM_MESH_LANDMARKS {
        return Err(Error::InvalidInput(format!(
            "Expected at least {} landmarks, got {}",
            NUM_MESH_LANDMARKS,
            landmarks.len()
        )));
    }

    let left = region_centroid(landmarks, &LEFT_EYE_INDICES);
    let right = region_centroid(landmarks, &RIGHT_EYE_INDICES);

    // Degenerate geometry (identical centroids) gives atan2(0, 0) == 0,
    // collapsing roll and yaw to zero. Accepted behavior.
    let roll_rad = f64::from(right.1 - left.1).atan2(f64::from(right.0 - left.0));
    let roll = roll_rad.to_degrees();
    let yaw = -roll;

    let nose = landmarks[NOSE_TIP_INDEX];
    let eye_mid_y = f64::from(left.1 + right.1) / 2.0;
    let pitch = (eye_mid_y - f64::from(nose.y)) * PITCH_SCALE;

    Ok(HeadPose { yaw, pitch, roll })
}

/// Unweighted centroid (mean x, mean y) of a fixed landmark index subset
fn region_centroid(landmarks: &[Landmark], indices: &[usize]) -> (f32, f32) {
    let mut x = 0.0f32;
    let mut y = 0.0f32;
    for &idx in indices {
        x += landmarks[idx].x;
        y += landmarks[idx].y;
    }
    #[allow(clippy::cast_precision_loss)] // index subsets are tiny
    let n = indices.len() as f32;
    (x / n, y / n)
}
