//! Whisper model management.
//!
//! ggml model weights are fetched from Hugging Face on first use and cached
//! under the data directory.

use crate::error::{LeseError, Result};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Available Whisper model sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhisperModel {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl WhisperModel {
    /// Get the Hugging Face URL for this model.
    pub fn hf_url(&self) -> &'static str {
        match self {
            WhisperModel::Tiny => "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-tiny.bin",
            WhisperModel::Base => "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.bin",
            WhisperModel::Small => "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-small.bin",
            WhisperModel::Medium => "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-medium.bin",
            WhisperModel::Large => "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-large-v3.bin",
        }
    }

    /// Get the filename for this model.
    pub fn filename(&self) -> &'static str {
        match self {
            WhisperModel::Tiny => "ggml-tiny.bin",
            WhisperModel::Base => "ggml-base.bin",
            WhisperModel::Small => "ggml-small.bin",
            WhisperModel::Medium => "ggml-medium.bin",
            WhisperModel::Large => "ggml-large-v3.bin",
        }
    }

    /// Get approximate model size in MB.
    pub fn size_mb(&self) -> u64 {
        match self {
            WhisperModel::Tiny => 75,
            WhisperModel::Base => 142,
            WhisperModel::Small => 466,
            WhisperModel::Medium => 1500,
            WhisperModel::Large => 3100,
        }
    }
}

impl std::fmt::Display for WhisperModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WhisperModel::Tiny => write!(f, "tiny"),
            WhisperModel::Base => write!(f, "base"),
            WhisperModel::Small => write!(f, "small"),
            WhisperModel::Medium => write!(f, "medium"),
            WhisperModel::Large => write!(f, "large"),
        }
    }
}

impl std::str::FromStr for WhisperModel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tiny" => Ok(WhisperModel::Tiny),
            "base" => Ok(WhisperModel::Base),
            "small" => Ok(WhisperModel::Small),
            "medium" => Ok(WhisperModel::Medium),
            "large" => Ok(WhisperModel::Large),
            _ => Err(format!(
                "Unknown model: {}. Use tiny, base, small, medium, or large",
                s
            )),
        }
    }
}

/// Get the path to a specific model file under the model cache directory.
pub fn model_path(model: WhisperModel, models_dir: &Path) -> PathBuf {
    models_dir.join(model.filename())
}

/// Check if a model is already downloaded.
///
/// A file well below the expected size is treated as a broken download.
pub fn is_model_downloaded(model: WhisperModel, models_dir: &Path) -> bool {
    let path = model_path(model, models_dir);
    if !path.exists() {
        return false;
    }

    match std::fs::metadata(&path) {
        Ok(metadata) => metadata.len() >= model.size_mb() * 1024 * 1024 / 2,
        Err(_) => false,
    }
}

/// Ensure the model weights are present, downloading them if needed.
pub async fn ensure_model(model: WhisperModel, models_dir: &Path) -> Result<PathBuf> {
    let path = model_path(model, models_dir);

    if is_model_downloaded(model, models_dir) {
        info!("Model {} already downloaded at {:?}", model, path);
        return Ok(path);
    }

    std::fs::create_dir_all(models_dir)?;

    info!("Downloading Whisper {} model (~{}MB)...", model, model.size_mb());

    let url = model.hf_url();
    let response = reqwest::get(url).await?;

    if !response.status().is_success() {
        return Err(LeseError::ModelDownload(format!(
            "HTTP {} from {}",
            response.status(),
            url
        )));
    }

    let total_size = response.content_length().unwrap_or(0);

    let pb = ProgressBar::new(total_size);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );

    // Write to a temp file first so an interrupted download never looks valid.
    let temp_path = path.with_extension("bin.tmp");
    let mut file = tokio::fs::File::create(&temp_path).await?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk =
            chunk.map_err(|e| LeseError::ModelDownload(format!("Failed to read response: {e}")))?;
        file.write_all(&chunk).await?;
        pb.inc(chunk.len() as u64);
    }
    file.flush().await?;
    drop(file);

    pb.finish_with_message("Download complete");

    tokio::fs::rename(&temp_path, &path).await?;

    info!("Model downloaded to {:?}", path);

    Ok(path)
}
