//! Constants used throughout the library

/// Number of landmarks in the full face mesh
pub const NUM_MESH_LANDMARKS: usize = 468;

/// Landmark indices approximating the left eye region (corners and eyelids)
pub const LEFT_EYE_INDICES: [usize; 4] = [33, 133, 159, 145];

/// Landmark indices approximating the right eye region (corners and eyelids)
pub const RIGHT_EYE_INDICES: [usize; 4] = [263, 362, 386, 374];

/// Landmark index of the approximate nose tip
pub const NOSE_TIP_INDEX: usize = 1;

/// Empirical scale converting the normalized vertical eye-to-nose offset into
/// a degree-like pitch value. Not derived from camera intrinsics; existing
/// consumers depend on the exact value.
pub const PITCH_SCALE: f64 = 120.0;

/// Default face-mesh model input size (square, in pixels)
pub const DEFAULT_MESH_INPUT_SIZE: i32 = 192;

/// Default minimum face-presence score for a frame to count as a detection
pub const DEFAULT_PRESENCE_THRESHOLD: f32 = 0.5;

/// Default exponential smoothing factor for video-mode landmark smoothing
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.65;

/// Default frames per second assumption
pub const DEFAULT_FPS: f64 = 30.0;
