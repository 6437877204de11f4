//! Landmark types produced by the detector binding.

/// A single tracked anatomical point on a detected face, in normalized
/// image-relative coordinates (x, y, z in [0, 1]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    /// Horizontal position, 0 at the left edge of the image
    pub x: f32,
    /// Vertical position, 0 at the top edge of the image
    pub y: f32,
    /// Approximate depth relative to the face center
    pub z: f32,
}

impl Landmark {
    /// Create a landmark from normalized coordinates
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Ordered landmark sequence for exactly one tracked face, one entry per
/// mesh index. Produced fresh per frame and owned by the caller.
pub type LandmarkSet = Vec<Landmark>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NUM_MESH_LANDMARKS;

    #[test]
    fn test_landmark_construction() {
        let lm = Landmark::new(0.5, 0.25, 0.0);
        assert_eq!(lm.x, 0.5);
        assert_eq!(lm.y, 0.25);
        assert_eq!(lm.z, 0.0);
    }

    #[test]
    fn test_mesh_indices_in_range() {
        use crate::constants::{LEFT_EYE_INDICES, NOSE_TIP_INDEX, RIGHT_EYE_INDICES};

        for idx in LEFT_EYE_INDICES.iter().chain(RIGHT_EYE_INDICES.iter()) {
            assert!(*idx < NUM_MESH_LANDMARKS);
        }
        assert!(NOSE_TIP_INDEX < NUM_MESH_LANDMARKS);
    }
}
