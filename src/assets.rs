//! Model asset resolution: download-on-first-use with local caching.
//!
//! The landmark model is fetched from its published location the first time a
//! detector is constructed and cached under the user cache directory.
//! Network or checksum failures surface as [`Error::AssetDownload`]; no retry
//! is performed here, retry policy belongs to the caller.

use crate::{Error, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholder checksum indicating verification should be skipped.
const PLACEHOLDER_CHECKSUM: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Model asset metadata.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// Model name/identifier
    pub name: &'static str,
    /// Download URL
    pub url: &'static str,
    /// Expected SHA256 hash; all zeros skips verification
    pub sha256: &'static str,
    /// Filename in the models cache directory
    pub filename: &'static str,
}

/// Known model assets.
pub const MODELS: &[ModelInfo] = &[ModelInfo {
    name: "face_mesh",
    url: "https://github.com/head-pose-tracker/models/releases/download/models-v1/face_mesh_468.onnx",
    sha256: "0000000000000000000000000000000000000000000000000000000000000000",
    filename: "face_mesh_468.onnx",
}];

/// Returns the models cache directory.
///
/// Uses `XDG_CACHE_HOME/head-pose-tracker/models` or the platform equivalent.
#[must_use]
pub fn models_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("head-pose-tracker")
        .join("models")
}

/// Looks up a model in the known-asset table.
#[must_use]
pub fn find_model(name: &str) -> Option<&'static ModelInfo> {
    MODELS.iter().find(|m| m.name == name)
}

/// Returns the cache path of a known model, whether or not it is downloaded.
#[must_use]
pub fn model_path(name: &str) -> Option<PathBuf> {
    find_model(name).map(|m| models_dir().join(m.filename))
}

/// Checks whether a known model is present in the cache.
#[must_use]
pub fn is_cached(name: &str) -> bool {
    model_path(name).is_some_and(|p| p.exists())
}

/// Ensures a model is available locally, downloading it if absent.
///
/// Returns the path of the cached model file.
///
/// # Errors
///
/// Returns an error if:
/// - The model name is not in the known-asset table
/// - The cache directory cannot be created
/// - The download fails or the checksum does not match
pub fn ensure_model(name: &str) -> Result<PathBuf> {
    let model = find_model(name)
        .ok_or_else(|| Error::AssetDownload(format!("Unknown model asset: {name}")))?;

    let dir = models_dir();
    fs::create_dir_all(&dir)?;

    let path = dir.join(model.filename);
    if path.exists() {
        log::debug!("Model {} already cached at {}", model.name, path.display());
    } else {
        download_model(model, &path)?;
    }

    Ok(path)
}

/// Downloads a model from its URL into the cache.
fn download_model(model: &ModelInfo, path: &Path) -> Result<()> {
    log::info!("Downloading model {} from {}", model.name, model.url);

    let response = reqwest::blocking::get(model.url)
        .map_err(|e| Error::AssetDownload(format!("Failed to download {}: {e}", model.name)))?;

    if !response.status().is_success() {
        return Err(Error::AssetDownload(format!(
            "Download of {} failed with status {}",
            model.name,
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .map_err(|e| Error::AssetDownload(format!("Failed to read response for {}: {e}", model.name)))?;

    if model.sha256 == PLACEHOLDER_CHECKSUM {
        log::debug!("Skipping checksum verification for {} (placeholder checksum)", model.name);
    } else {
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let hash = format!("{:x}", hasher.finalize());

        if hash != model.sha256 {
            return Err(Error::AssetDownload(format!(
                "Checksum mismatch for {}: expected {}, got {}. \
                 Delete {} and re-run to download a fresh copy.",
                model.name,
                model.sha256,
                hash,
                path.display()
            )));
        }
    }

    fs::write(path, &bytes)?;

    log::info!("Downloaded {} ({} bytes)", model.name, bytes.len());
    Ok(())
}
