//! WAV loading and conversion to Whisper's input format.
//!
//! Extracted audio is 44.1 kHz stereo 16-bit PCM; whisper.cpp wants 16 kHz
//! mono f32 in [-1.0, 1.0].

use crate::error::{LeseError, Result};
use std::path::Path;
use tracing::debug;

/// Whisper's required sample rate.
pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Load a 16-bit PCM WAV file and convert it to 16 kHz mono f32 samples.
pub fn load_whisper_samples(path: &Path) -> Result<Vec<f32>> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(LeseError::Transcription(format!(
            "Unsupported WAV format in {}: expected 16-bit PCM, got {}-bit {:?}",
            path.display(),
            spec.bits_per_sample,
            spec.sample_format
        )));
    }

    let samples: Vec<i16> = reader
        .samples::<i16>()
        .collect::<std::result::Result<_, _>>()?;

    let mono = downmix_to_mono(&samples, spec.channels as usize);
    let resampled = resample(&mono, spec.sample_rate, WHISPER_SAMPLE_RATE);

    debug!(
        "Loaded {} frames at {} Hz, {} samples after resampling",
        mono.len(),
        spec.sample_rate,
        resampled.len()
    );

    Ok(resampled)
}

/// Average interleaved channels into mono, normalized to [-1.0, 1.0].
fn downmix_to_mono(samples: &[i16], channels: usize) -> Vec<f32> {
    let channels = channels.max(1);
    samples
        .chunks(channels)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| s as i32).sum();
            (sum / frame.len() as i32) as f32 / 32768.0
        })
        .collect()
}

/// Linear-interpolation resampler.
///
/// 44100 to 16000 is not an integer ratio, so averaging over fixed-size
/// windows does not work here.
fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let out_len = (samples.len() as f64 / ratio) as usize;
    let mut out = Vec::with_capacity(out_len);

    for i in 0..out_len {
        let pos = i as f64 * ratio;
        let idx = pos as usize;
        let frac = (pos - idx as f64) as f32;
        let a = samples[idx];
        let b = if idx + 1 < samples.len() {
            samples[idx + 1]
        } else {
            a
        };
        out.push(a + (b - a) * frac);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downmix_stereo() {
        let samples: Vec<i16> = vec![100, 300, -200, -400];
        let mono = downmix_to_mono(&samples, 2);

        assert_eq!(mono.len(), 2);
        assert!((mono[0] - 200.0 / 32768.0).abs() < 1e-6);
        assert!((mono[1] + 300.0 / 32768.0).abs() < 1e-6);
    }

    #[test]
    fn test_downmix_mono_passthrough() {
        let samples: Vec<i16> = vec![16384, -16384];
        let mono = downmix_to_mono(&samples, 1);

        assert!((mono[0] - 0.5).abs() < 1e-3);
        assert!((mono[1] + 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_resample_identity() {
        let samples = vec![0.1, 0.2, 0.3];
        assert_eq!(resample(&samples, 16_000, 16_000), samples);
    }

    #[test]
    fn test_resample_length() {
        // One second at 44.1 kHz resamples to one second at 16 kHz.
        let samples = vec![0.0f32; 44_100];
        let out = resample(&samples, 44_100, 16_000);
        assert_eq!(out.len(), 16_000);
    }

    #[test]
    fn test_resample_interpolates() {
        // Downsampling a ramp by 2 keeps it a ramp.
        let samples = vec![0.0, 0.25, 0.5, 0.75, 1.0];
        let out = resample(&samples, 32_000, 16_000);
        assert_eq!(out.len(), 2);
        assert!((out[0] - 0.0).abs() < 1e-6);
        assert!((out[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audio.wav");

        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 44_100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for _ in 0..4410 {
            writer.write_sample(1000i16).unwrap();
            writer.write_sample(3000i16).unwrap();
        }
        writer.finalize().unwrap();

        let samples = load_whisper_samples(&path).unwrap();
        assert_eq!(samples.len(), 1600);
        // Channels averaged: (1000 + 3000) / 2 = 2000.
        assert!((samples[0] - 2000.0 / 32768.0).abs() < 1e-6);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_whisper_samples(Path::new("/no/such/audio.wav")).is_err());
    }
}
