//! Local whisper.cpp transcription implementation.

use super::samples::load_whisper_samples;
use super::SpeechModel;
use crate::error::{LeseError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

/// Transcriber backed by a locally loaded Whisper model.
///
/// The model variant is fixed at load time; `transcribe` treats the model as
/// an opaque `audio_path -> text` function.
pub struct WhisperTranscriber {
    ctx: Arc<WhisperContext>,
    language: Option<String>,
    n_threads: i32,
}

impl WhisperTranscriber {
    /// Load a ggml model from disk.
    ///
    /// `threads == 0` uses all available cores.
    pub fn load(model_path: &Path, language: Option<&str>, threads: usize) -> Result<Self> {
        info!("Loading Whisper model from {:?}", model_path);

        let path_str = model_path
            .to_str()
            .ok_or_else(|| LeseError::Transcription("Non-UTF8 model path".to_string()))?;

        let ctx = WhisperContext::new_with_params(path_str, WhisperContextParameters::default())
            .map_err(|e| LeseError::Transcription(format!("Failed to load model: {}", e)))?;

        let n_threads = if threads == 0 {
            std::thread::available_parallelism()
                .map(|p| p.get() as i32)
                .unwrap_or(4)
        } else {
            threads as i32
        };

        info!("Whisper model loaded (using {} threads)", n_threads);

        Ok(Self {
            ctx: Arc::new(ctx),
            language: language.map(|s| s.to_string()),
            n_threads,
        })
    }

    fn run_inference(
        ctx: &WhisperContext,
        samples: &[f32],
        language: Option<&str>,
        n_threads: i32,
    ) -> Result<String> {
        // Greedy sampling matches the model's default inference mode and is
        // the fast path in whisper.cpp.
        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_n_threads(n_threads);
        params.set_language(Some(language.unwrap_or("auto")));
        params.set_translate(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_print_special(false);

        let mut state = ctx
            .create_state()
            .map_err(|e| LeseError::Transcription(format!("Failed to create state: {}", e)))?;

        state
            .full(params, samples)
            .map_err(|e| LeseError::Transcription(format!("Inference failed: {}", e)))?;

        let num_segments = state
            .full_n_segments()
            .map_err(|e| LeseError::Transcription(format!("Failed to get segments: {}", e)))?;

        let mut text = String::new();
        for i in 0..num_segments {
            let segment = state
                .full_get_segment_text(i)
                .map_err(|e| LeseError::Transcription(format!("Failed to get text: {}", e)))?;
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(segment);
        }

        debug!("Transcribed {} segments", num_segments);
        Ok(text)
    }
}

#[async_trait]
impl SpeechModel for WhisperTranscriber {
    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        let audio_path = audio_path.to_path_buf();
        let ctx = self.ctx.clone();
        let language = self.language.clone();
        let n_threads = self.n_threads;

        // Inference is CPU-bound and can run for minutes; keep it off the
        // async runtime threads.
        tokio::task::spawn_blocking(move || {
            let samples = load_whisper_samples(&audio_path)?;
            if samples.is_empty() {
                return Ok(String::new());
            }
            Self::run_inference(&ctx, &samples, language.as_deref(), n_threads)
        })
        .await
        .map_err(|e| LeseError::Transcription(format!("Transcription task failed: {}", e)))?
    }
}
