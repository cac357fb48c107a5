//! Lese - Reading-Club Study Artefacts
//!
//! A CLI tool that turns a recorded reading-club session into study material.
//!
//! The name "Lese" comes from the Norwegian/Scandinavian word for "read."
//!
//! # Overview
//!
//! Lese allows you to:
//! - Extract the audio track from a recorded session video
//! - Transcribe it with a local Whisper model
//! - Generate a prose summary of the session
//! - Generate a CSV flashcard deck for later review
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt templates
//! - `media` - Video file listing and selection
//! - `audio` - Audio extraction via ffmpeg
//! - `transcription` - Local speech-to-text
//! - `llm` - Summary and flashcard generation
//! - `workflow` - Artefact paths and menu-option dispatch
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use lese::audio::{AudioExtractor, FfmpegExtractor};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let extractor = FfmpegExtractor::new();
//!     extractor
//!         .extract(Path::new("session.mp4"), Path::new("outputs/audio.wav"))
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod media;
pub mod openai;
pub mod transcription;
pub mod workflow;

pub use error::{LeseError, Result};
