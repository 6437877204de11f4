//! Landmark detector binding over `ONNX` Runtime.
//!
//! [`FaceLandmarker`] owns the loaded inference engine. Construction resolves
//! the model asset (downloading it on first use), builds the session and
//! returns a ready handle or an error; no partially-initialized state is
//! observable. Dropping the handle releases the engine resources.
//!
//! The engine is configured for single-face tracking. In video mode,
//! consecutive frames with increasing timestamps share temporal smoothing
//! state; inference takes `&mut self`, so overlapping calls into one handle
//! are ruled out at compile time.

use crate::{
    assets,
    config::{Config, RunningMode},
    constants::{DEFAULT_MESH_INPUT_SIZE, NUM_MESH_LANDMARKS},
    landmark::{Landmark, LandmarkSet},
    smoothing::LandmarkSmoother,
    utils::safe_cast::usize_to_i32,
    Error, Result,
};
use ndarray::{Array1, Array4, CowArray};
use opencv::core::{Mat, Size, CV_32F};
use opencv::imgproc::{self, InterpolationFlags};
use opencv::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

use ort::{Environment, Session, Value};

/// Face landmark detector using `ONNX` Runtime
pub struct FaceLandmarker {
    session: Session,
    input_size: i32,
    presence_threshold: f32,
    running_mode: RunningMode,
    smoother: LandmarkSmoother,
    last_timestamp_ms: Option<i64>,
}

impl FaceLandmarker {
    /// Create a ready landmark detector from the given configuration.
    ///
    /// Resolves the configured model asset, downloading it into the local
    /// cache when absent, then loads the inference session. No retry is
    /// performed on failure; retry policy belongs to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The model asset cannot be downloaded or read
    /// - The ONNX session cannot be created
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let model_path: PathBuf = match &config.detector.model_path {
            Some(path) => path.clone(),
            None => assets::ensure_model(&config.detector.model)?,
        };

        log::info!("Initializing FaceLandmarker with model: {}", model_path.display());
        let environment = Arc::new(
            Environment::builder()
                .with_name("face_landmarker")
                .with_log_level(ort::LoggingLevel::Warning)
                .build()?,
        );

        let session = ort::SessionBuilder::new(&environment)?
            .with_optimization_level(ort::GraphOptimizationLevel::Level3)?
            .with_model_from_file(&model_path)?;

        if session.inputs.is_empty() {
            return Err(Error::ModelInputError("Model has no inputs".to_string()));
        }
        if session.outputs.is_empty() {
            return Err(Error::ModelOutputError("Model has no outputs".to_string()));
        }

        let input_size = probe_input_size(&session.inputs[0].dimensions);

        Ok(Self {
            session,
            input_size,
            presence_threshold: config.detector.presence_threshold,
            running_mode: config.detector.running_mode,
            smoother: LandmarkSmoother::new(config.smoothing.alpha),
            last_timestamp_ms: None,
        })
    }

    /// Detect face landmarks in one frame of a video stream.
    ///
    /// Timestamps must be strictly increasing across calls; results for
    /// out-of-order or duplicate timestamps are unspecified (the engine drops
    /// its temporal state when time goes backwards).
    ///
    /// Returns `Ok(None)` when no face is present in the frame. That is a
    /// defined outcome, distinct from every error kind.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The detector is configured for image mode
    /// - The frame is empty
    /// - Preprocessing or inference fails
    pub fn detect_for_video(&mut self, frame: &Mat, timestamp_ms: i64) -> Result<Option<LandmarkSet>> {
        if self.running_mode != RunningMode::Video {
            return Err(Error::InvalidInput(
                "detect_for_video requires video running mode".to_string(),
            ));
        }

        if self.last_timestamp_ms.is_some_and(|last| timestamp_ms <= last) {
            log::debug!("Timestamp regressed at {timestamp_ms}ms, dropping temporal state");
            self.smoother.reset();
        }
        self.last_timestamp_ms = Some(timestamp_ms);

        match self.detect_raw(frame)? {
            Some(landmarks) => Ok(Some(self.smoother.apply(landmarks))),
            None => {
                // Face left the frame, temporal continuity is broken
                self.smoother.reset();
                Ok(None)
            }
        }
    }

    /// Detect face landmarks in a single independent image.
    ///
    /// # Errors
    ///
    /// Returns an error if the detector is configured for video mode, the
    /// frame is empty, or inference fails.
    pub fn detect_image(&mut self, frame: &Mat) -> Result<Option<LandmarkSet>> {
        if self.running_mode != RunningMode::Image {
            return Err(Error::InvalidInput(
                "detect_image requires image running mode".to_string(),
            ));
        }
        self.detect_raw(frame)
    }

    /// Model input size (square, in pixels)
    #[must_use]
    pub fn input_size(&self) -> i32 {
        self.input_size
    }

    /// Run one inference pass without temporal state
    fn detect_raw(&self, frame: &Mat) -> Result<Option<LandmarkSet>> {
        if frame.empty() {
            return Err(Error::InvalidInput("Empty frame".to_string()));
        }

        let input = self.preprocess(frame)?;
        let (mesh, presence) = self.forward(input)?;

        if presence < self.presence_threshold {
            log::debug!("No face: presence score {presence:.3} below threshold");
            return Ok(None);
        }

        Ok(Some(self.postprocess(&mesh)?))
    }

    /// Resize, convert BGR to RGB and normalize the frame for the model
    #[allow(clippy::cast_sign_loss)] // OpenCV dimensions are positive
    fn preprocess(&self, frame: &Mat) -> Result<Array4<f32>> {
        let size = self.input_size as usize;
        let channels = 3;

        let mut resized = Mat::default();
        imgproc::resize(
            frame,
            &mut resized,
            Size::new(self.input_size, self.input_size),
            0.0,
            0.0,
            InterpolationFlags::INTER_LINEAR as i32,
        )?;

        let mut rgb_image = Mat::default();
        imgproc::cvt_color(&resized, &mut rgb_image, imgproc::COLOR_BGR2RGB, 0)?;

        // Convert to f32 and normalize to [0, 1]
        let mut float_image = Mat::default();
        rgb_image.convert_to(&mut float_image, CV_32F, 1.0 / 255.0, 0.0)?;

        let mut data = vec![0.0f32; size * size * channels];
        for row in 0..size {
            for col in 0..size {
                let pixel = float_image.at_2d::<opencv::core::Vec3f>(usize_to_i32(row)?, usize_to_i32(col)?)?;
                for ch in 0..channels {
                    data[(row * size + col) * channels + ch] = pixel[ch];
                }
            }
        }

        // NHWC, matching the mesh model's expected layout
        Array4::from_shape_vec((1, size, size, channels), data)
            .map_err(|e| Error::ModelInputError(format!("Failed to create input array: {e}")))
    }

    /// Run forward pass, returning raw mesh coordinates and the face-presence
    /// score
    fn forward(&self, input: Array4<f32>) -> Result<(Array1<f32>, f32)> {
        let cow_array = CowArray::from(input.into_dyn());
        let input_tensor = Value::from_array(self.session.allocator(), &cow_array)?;

        let outputs = self.session.run(vec![input_tensor])?;
        let mut outputs = outputs.into_iter();

        let mesh_output = outputs
            .next()
            .ok_or_else(|| Error::ModelOutputError("No mesh output from model".to_string()))?;
        let mesh_tensor = mesh_output.try_extract::<f32>()?;
        let mesh_view = mesh_tensor.view();
        let mesh_data = mesh_view
            .as_slice()
            .ok_or_else(|| Error::ModelOutputError("Failed to read mesh output".to_string()))?;
        let mesh = Array1::from(mesh_data.to_vec());

        // Second output is the face-presence logit; a model without a
        // presence head always reports a face
        let presence = match outputs.next() {
            Some(score_output) => {
                let score_tensor = score_output.try_extract::<f32>()?;
                let score_view = score_tensor.view();
                let logit = score_view
                    .iter()
                    .next()
                    .copied()
                    .ok_or_else(|| Error::ModelOutputError("Empty presence output".to_string()))?;
                sigmoid(logit)
            }
            None => 1.0,
        };

        Ok((mesh, presence))
    }

    /// Convert raw model output into normalized landmarks
    fn postprocess(&self, mesh: &Array1<f32>) -> Result<LandmarkSet> {
        let expected = NUM_MESH_LANDMARKS * 3;
        if mesh.len() < expected {
            return Err(Error::ModelOutputError(format!(
                "Expected {} mesh values ({} points × 3), got {}",
                expected,
                NUM_MESH_LANDMARKS,
                mesh.len()
            )));
        }

        // Raw coordinates are in model-input pixels; normalize to [0, 1]
        #[allow(clippy::cast_precision_loss)] // input sizes are small
        let scale = self.input_size as f32;
        let landmarks = (0..NUM_MESH_LANDMARKS)
            .map(|i| Landmark::new(mesh[i * 3] / scale, mesh[i * 3 + 1] / scale, mesh[i * 3 + 2] / scale))
            .collect();

        Ok(landmarks)
    }
}

/// Extract the input size from a model shape of [batch, height, width, channels],
/// falling back to the mesh default for models without static dimensions
#[allow(clippy::cast_possible_wrap)] // mesh input sizes are small
fn probe_input_size(dimensions: &[Option<u32>]) -> i32 {
    if dimensions.len() >= 4 {
        dimensions[1].map_or(DEFAULT_MESH_INPUT_SIZE, |d| d as i32)
    } else {
        DEFAULT_MESH_INPUT_SIZE
    }
}

/// Logistic squash of the raw face-presence logit
fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
