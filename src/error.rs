//! Error types for the head pose tracking library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// `OpenCV` operation failed
    #[error("OpenCV error: {0}")]
    OpenCv(#[from] opencv::Error),

    /// `ONNX` Runtime inference failed
    #[error("ONNX Runtime error: {0}")]
    OnnxRuntime(#[from] ort::OrtError),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Inference invoked before the detector was initialized
    #[error("landmark detector is not initialized; call initialize() first")]
    NotInitialized,

    /// Model asset download or verification failed
    #[error("Asset download error: {0}")]
    AssetDownload(String),

    /// Model input configuration error
    #[error("Model input error: {0}")]
    ModelInputError(String),

    /// Model output processing error
    #[error("Model output error: {0}")]
    ModelOutputError(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
