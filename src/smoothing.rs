//! Temporal landmark smoothing for video-streaming inference.
//!
//! Video mode blends each frame's raw landmarks with the previous smoothed
//! set, damping per-frame jitter while the tracked face stays continuous.
//! The smoother is internal to the detector; callers cannot bypass it
//! without switching the detector to image mode.

use crate::landmark::{Landmark, LandmarkSet};

/// Exponential smoother over whole landmark sets
pub struct LandmarkSmoother {
    alpha: f32,
    last: Option<LandmarkSet>,
}

impl LandmarkSmoother {
    /// Create a smoother with the given blend factor. Alpha close to 1
    /// favors the newest frame; close to 0 favors history.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // config-range value
    pub fn new(alpha: f64) -> Self {
        debug_assert!(alpha > 0.0 && alpha <= 1.0, "Alpha must be in (0, 1]");
        Self {
            alpha: alpha as f32,
            last: None,
        }
    }

    /// Blend the current landmark set against the previous smoothed set.
    ///
    /// The first set after construction or a reset passes through unchanged.
    /// A set whose length differs from the stored history also passes
    /// through, replacing the history.
    pub fn apply(&mut self, current: LandmarkSet) -> LandmarkSet {
        let smoothed = match &self.last {
            Some(prev) if prev.len() == current.len() => current
                .iter()
                .zip(prev.iter())
                .map(|(c, p)| {
                    Landmark::new(
                        self.alpha * c.x + (1.0 - self.alpha) * p.x,
                        self.alpha * c.y + (1.0 - self.alpha) * p.y,
                        self.alpha * c.z + (1.0 - self.alpha) * p.z,
                    )
                })
                .collect(),
            _ => current,
        };

        self.last = Some(smoothed.clone());
        smoothed
    }

    /// Drop temporal state, e.g. when the face leaves the frame or
    /// timestamps regress
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(points: &[(f32, f32)]) -> LandmarkSet {
        points.iter().map(|&(x, y)| Landmark::new(x, y, 0.0)).collect()
    }

    #[test]
    fn test_first_set_passes_through() {
        let mut smoother = LandmarkSmoother::new(0.5);
        let out = smoother.apply(set_of(&[(0.2, 0.4)]));
        assert_eq!(out[0].x, 0.2);
        assert_eq!(out[0].y, 0.4);
    }

    #[test]
    fn test_second_set_is_blended() {
        let mut smoother = LandmarkSmoother::new(0.5);
        smoother.apply(set_of(&[(0.2, 0.4)]));
        let out = smoother.apply(set_of(&[(0.4, 0.8)]));
        assert!((out[0].x - 0.3).abs() < 1e-6);
        assert!((out[0].y - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_history_is_the_smoothed_value() {
        // Smoothing compounds: the third frame blends against the smoothed
        // second frame, not the raw one.
        let mut smoother = LandmarkSmoother::new(0.5);
        smoother.apply(set_of(&[(0.0, 0.0)]));
        smoother.apply(set_of(&[(1.0, 0.0)])); // smoothed -> 0.5
        let out = smoother.apply(set_of(&[(1.0, 0.0)]));
        assert!((out[0].x - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut smoother = LandmarkSmoother::new(0.5);
        smoother.apply(set_of(&[(0.2, 0.4)]));
        smoother.reset();
        let out = smoother.apply(set_of(&[(0.8, 0.8)]));
        assert_eq!(out[0].x, 0.8);
    }

    #[test]
    fn test_length_mismatch_passes_through() {
        let mut smoother = LandmarkSmoother::new(0.5);
        smoother.apply(set_of(&[(0.2, 0.4)]));
        let out = smoother.apply(set_of(&[(0.8, 0.8), (0.1, 0.1)]));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].x, 0.8);
    }
}
