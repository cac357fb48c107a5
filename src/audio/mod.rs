//! Audio extraction via ffmpeg.
//!
//! Pulls the audio track out of a video container as uncompressed PCM WAV,
//! the format the local Whisper pipeline expects to start from.

use crate::error::{LeseError, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Target sample rate for extracted audio.
pub const SAMPLE_RATE: u32 = 44_100;
/// Target channel count for extracted audio.
pub const CHANNELS: u32 = 2;

/// Narrow interface over the external transcoding process.
#[async_trait]
pub trait AudioExtractor: Send + Sync {
    /// Extract the audio track of `source` into a WAV file at `dest`,
    /// overwriting any existing file.
    async fn extract(&self, source: &Path, dest: &Path) -> Result<()>;
}

/// ffmpeg-backed extractor.
pub struct FfmpegExtractor;

impl FfmpegExtractor {
    pub fn new() -> Self {
        Self
    }

    /// ffmpeg argument list: drop video, encode 16-bit little-endian PCM,
    /// resample to 44.1 kHz stereo, overwrite the destination.
    fn build_args(source: &Path, dest: &Path) -> Vec<OsString> {
        vec![
            "-y".into(),
            "-i".into(),
            source.as_os_str().to_os_string(),
            "-vn".into(),
            "-acodec".into(),
            "pcm_s16le".into(),
            "-ar".into(),
            SAMPLE_RATE.to_string().into(),
            "-ac".into(),
            CHANNELS.to_string().into(),
            dest.as_os_str().to_os_string(),
        ]
    }
}

impl Default for FfmpegExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioExtractor for FfmpegExtractor {
    #[instrument(skip(self), fields(source = %source.display(), dest = %dest.display()))]
    async fn extract(&self, source: &Path, dest: &Path) -> Result<()> {
        debug!("Extracting audio with ffmpeg");

        let result = Command::new("ffmpeg")
            .args(Self::build_args(source, dest))
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;

        match result {
            Ok(out) if out.status.success() => Ok(()),
            Ok(out) => {
                let err = String::from_utf8_lossy(&out.stderr);
                Err(LeseError::ToolFailed(format!("ffmpeg failed: {err}")))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(LeseError::ToolNotFound("ffmpeg".into()))
            }
            Err(e) => Err(LeseError::AudioExtraction(format!("ffmpeg error: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ffmpeg_args() {
        let args = FfmpegExtractor::build_args(Path::new("in.mp4"), Path::new("out/audio.wav"));
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect();

        assert_eq!(
            args,
            vec![
                "-y",
                "-i",
                "in.mp4",
                "-vn",
                "-acodec",
                "pcm_s16le",
                "-ar",
                "44100",
                "-ac",
                "2",
                "out/audio.wav",
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_source_fails() {
        // Either ffmpeg is absent (ToolNotFound) or it rejects the input.
        let extractor = FfmpegExtractor::new();
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("audio.wav");
        let result = extractor
            .extract(Path::new("/no/such/video.mp4"), &dest)
            .await;
        assert!(result.is_err());
    }
}
