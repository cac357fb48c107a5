//! Transcription module for Lese.
//!
//! Handles speech-to-text with a locally loaded whisper.cpp model. The model
//! weights are downloaded from Hugging Face on first use and cached under the
//! data directory.

mod model;
mod samples;
mod whisper;

pub use model::{ensure_model, is_model_downloaded, model_path, WhisperModel};
pub use samples::{load_whisper_samples, WHISPER_SAMPLE_RATE};
pub use whisper::WhisperTranscriber;

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Trait for local speech-recognition models.
#[async_trait]
pub trait SpeechModel: Send + Sync {
    /// Transcribe an audio file and return the full transcript text.
    async fn transcribe(&self, audio_path: &Path) -> Result<String>;
}
