//! Head pose tracking library for real-time head orientation estimation.
//!
//! This library converts a stream of detected facial landmark points into a
//! head-orientation estimate (yaw, pitch, roll) per video frame, using:
//! - ONNX Runtime for face-mesh landmark inference
//! - `OpenCV` for frame handling and preprocessing
//! - A pure geometric estimator over fixed eye and nose mesh indices
//!
//! The pipeline per frame:
//! 1. Landmark detection over the video frame (at most one tracked face)
//! 2. Pose estimation from the eye-region centroids and nose tip
//!
//! "No face in frame" is a defined outcome (`None`), distinct from every
//! error: callers can always tell "broken" from "nobody in frame."
//!
//! # Examples
//!
//! ## Tracking a video stream
//!
//! ```no_run
//! use head_pose_tracker::{config::Config, tracker::HeadPoseTracker};
//! use opencv::{core::Mat, prelude::*, videoio};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // One-time initialization: downloads the model on first use
//! let mut tracker = HeadPoseTracker::new(Config::default());
//! tracker.initialize()?;
//!
//! let mut cap = videoio::VideoCapture::new(0, videoio::CAP_ANY)?;
//! let mut frame = Mat::default();
//! let mut timestamp_ms = 0i64;
//!
//! loop {
//!     if !cap.read(&mut frame)? {
//!         break;
//!     }
//!     timestamp_ms += 33;
//!
//!     match tracker.process_frame(&frame, timestamp_ms)? {
//!         Some(pose) => println!(
//!             "Yaw: {:.2}°, Pitch: {:.2}°, Roll: {:.2}°",
//!             pose.yaw, pose.pitch, pose.roll
//!         ),
//!         None => println!("No face in frame"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Using the estimator directly
//!
//! ```
//! use head_pose_tracker::{landmark::Landmark, pose_estimation::estimate_pose};
//!
//! // No detection this frame: no reading, never a zeroed pose
//! let reading = estimate_pose(None).unwrap();
//! assert!(reading.is_none());
//! ```

/// Model asset resolution and download caching
pub mod assets;

/// Configuration management
pub mod config;

/// Constants used throughout the library
pub mod constants;

/// Landmark detector binding over ONNX Runtime
pub mod detector;

/// Error types and result handling
pub mod error;

/// Landmark types produced by the detector
pub mod landmark;

/// Head pose estimation from facial landmarks
pub mod pose_estimation;

/// Temporal landmark smoothing for video-streaming inference
pub mod smoothing;

/// Two-phase tracking protocol combining detection and estimation
pub mod tracker;

/// Utility functions
pub mod utils;

pub use error::{Error, Result};
