//! Configuration management for the head pose tracker

use crate::{
    constants::{DEFAULT_PRESENCE_THRESHOLD, DEFAULT_SMOOTHING_ALPHA},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tracker configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Landmark detector configuration
    pub detector: DetectorConfig,

    /// Video-mode smoothing configuration
    pub smoothing: SmoothingConfig,
}

/// Inference running mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunningMode {
    /// Streaming mode: consecutive frames with increasing timestamps share
    /// temporal smoothing state
    Video,
    /// Every frame is treated independently
    Image,
}

/// Landmark detector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Named model asset to resolve from the download cache
    pub model: String,

    /// Local model file overriding the named asset (skips download)
    pub model_path: Option<PathBuf>,

    /// Inference running mode
    pub running_mode: RunningMode,

    /// Maximum number of tracked faces; only 1 is supported
    pub num_faces: usize,

    /// Minimum face-presence score for a detection (0.0-1.0)
    pub presence_threshold: f32,

    /// Blendshape output; unsupported, must stay disabled
    pub output_blendshapes: bool,
}

/// Video-mode landmark smoothing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Exponential blend factor in (0, 1]; 1 disables smoothing
    pub alpha: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model: "face_mesh".to_string(),
            model_path: None,
            running_mode: RunningMode::Video,
            num_faces: 1,
            presence_threshold: DEFAULT_PRESENCE_THRESHOLD,
            output_blendshapes: false,
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_SMOOTHING_ALPHA,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any field is outside its supported range
    pub fn validate(&self) -> Result<()> {
        if self.detector.model.is_empty() && self.detector.model_path.is_none() {
            return Err(Error::ConfigError(
                "Either a model name or a model path must be set".to_string(),
            ));
        }
        if self.detector.num_faces != 1 {
            return Err(Error::ConfigError(
                "Only single-face tracking is supported (num_faces must be 1)".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.detector.presence_threshold) {
            return Err(Error::ConfigError(
                "Presence threshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.detector.output_blendshapes {
            return Err(Error::ConfigError(
                "Blendshape output is not supported and must stay disabled".to_string(),
            ));
        }
        if !(self.smoothing.alpha > 0.0 && self.smoothing.alpha <= 1.0) {
            return Err(Error::ConfigError(
                "Smoothing alpha must be in (0.0, 1.0]".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Head Pose Tracker Configuration

# Landmark detector
detector:
  model: "face_mesh"
  model_path: null
  running_mode: "video"
  num_faces: 1
  presence_threshold: 0.5
  output_blendshapes: false

# Video-mode landmark smoothing
smoothing:
  alpha: 0.65
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.detector.num_faces, 1);
        assert_eq!(config.detector.running_mode, RunningMode::Video);
        assert!(!config.detector.output_blendshapes);
    }

    #[test]
    fn test_invalid_num_faces() {
        let mut config = Config::default();
        config.detector.num_faces = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_presence_threshold() {
        let mut config = Config::default();
        config.detector.presence_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blendshapes_must_stay_disabled() {
        let mut config = Config::default();
        config.detector.output_blendshapes = true;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_smoothing_alpha() {
        let mut config = Config::default();
        config.smoothing.alpha = 0.0;
        assert!(config.validate().is_err());
        config.smoothing.alpha = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.detector.model, "face_mesh");
    }
}
