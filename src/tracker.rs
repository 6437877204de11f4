//! Two-phase tracking protocol: initialize once, then process frames.
//!
//! [`HeadPoseTracker`] composes the detector binding with the pure pose
//! estimator behind the initialize-then-detect protocol most callers want:
//! a per-frame capture loop calls [`HeadPoseTracker::process_frame`] and
//! renders whatever reading comes back.

use crate::{
    config::Config,
    detector::FaceLandmarker,
    pose_estimation::{estimate_pose, HeadPose},
    Error, Result,
};
use opencv::core::Mat;

/// Head pose tracker combining landmark detection and pose estimation
pub struct HeadPoseTracker {
    config: Config,
    detector: Option<FaceLandmarker>,
}

impl HeadPoseTracker {
    /// Create an uninitialized tracker with the given configuration.
    ///
    /// No resources are acquired until [`HeadPoseTracker::initialize`].
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            detector: None,
        }
    }

    /// Load model assets and build the inference engine.
    ///
    /// Blocks until the engine is ready. Calling this on an already-ready
    /// tracker is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or resource loading
    /// fails; the tracker stays uninitialized and the caller decides whether
    /// to retry.
    pub fn initialize(&mut self) -> Result<()> {
        if self.detector.is_some() {
            log::debug!("Tracker already initialized");
            return Ok(());
        }

        self.detector = Some(FaceLandmarker::new(&self.config)?);
        log::info!("Head pose tracker ready");
        Ok(())
    }

    /// Whether the inference engine is loaded and ready for frames
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.detector.is_some()
    }

    /// Process one video frame and return its head pose reading.
    ///
    /// Timestamps must be strictly increasing across calls. `Ok(None)` means
    /// no face was present this frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] if called before a successful
    /// [`HeadPoseTracker::initialize`], or any detector error.
    pub fn process_frame(&mut self, frame: &Mat, timestamp_ms: i64) -> Result<Option<HeadPose>> {
        let detector = self.detector.as_mut().ok_or(Error::NotInitialized)?;

        let landmarks = detector.detect_for_video(frame, timestamp_ms)?;
        estimate_pose(landmarks.as_deref())
    }

    /// Release the inference engine, returning the tracker to the
    /// uninitialized state. Safe to call repeatedly.
    pub fn release(&mut self) {
        if self.detector.take().is_some() {
            log::info!("Released inference engine");
        }
    }
}
