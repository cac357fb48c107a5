//! Workflow dispatch for the seven menu options.
//!
//! The decision logic lives here, independent of the interactive prompt loop:
//! choices parse from plain strings, artefact paths are fixed names under one
//! output directory, and the runner drives the injected external interfaces
//! (extractor, speech model, completer) for whichever subset of stages the
//! chosen option requires.

use crate::audio::AudioExtractor;
use crate::config::Prompts;
use crate::error::{LeseError, Result};
use crate::llm::{generate_flashcards, generate_summary, Completer};
use crate::transcription::SpeechModel;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// One of the seven menu-selectable operation sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Extract, transcribe, summarize, and generate flashcards.
    FullWorkflow,
    /// Extract audio only.
    ExtractAudio,
    /// Extract audio and transcribe.
    Transcribe,
    /// Generate a summary from an existing transcription.
    Summary,
    /// Generate flashcards, reusing an existing summary if present.
    Flashcards,
    /// Regenerate the summary, then generate flashcards.
    SummaryAndFlashcards,
    /// Exit without doing anything.
    Quit,
}

impl Choice {
    /// Parse a menu input ("1" through "7"). Anything else is no choice.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Choice::FullWorkflow),
            "2" => Some(Choice::ExtractAudio),
            "3" => Some(Choice::Transcribe),
            "4" => Some(Choice::Summary),
            "5" => Some(Choice::Flashcards),
            "6" => Some(Choice::SummaryAndFlashcards),
            "7" => Some(Choice::Quit),
            _ => None,
        }
    }

    /// Whether this option starts from a video file.
    pub fn needs_video(&self) -> bool {
        matches!(
            self,
            Choice::FullWorkflow | Choice::ExtractAudio | Choice::Transcribe
        )
    }

    /// Whether this option requires a pre-existing transcription artefact.
    pub fn needs_transcription(&self) -> bool {
        matches!(
            self,
            Choice::Summary | Choice::Flashcards | Choice::SummaryAndFlashcards
        )
    }

    /// Whether this option runs the local speech model.
    pub fn needs_speech_model(&self) -> bool {
        matches!(self, Choice::FullWorkflow | Choice::Transcribe)
    }

    /// Whether this option calls the remote text-generation service.
    pub fn needs_llm(&self) -> bool {
        matches!(
            self,
            Choice::FullWorkflow
                | Choice::Summary
                | Choice::Flashcards
                | Choice::SummaryAndFlashcards
        )
    }
}

/// The four fixed artefact paths under one output directory.
#[derive(Debug, Clone)]
pub struct ArtefactPaths {
    pub output_dir: PathBuf,
    pub audio: PathBuf,
    pub transcription: PathBuf,
    pub summary: PathBuf,
    pub flashcards: PathBuf,
}

impl ArtefactPaths {
    /// Compute the fixed artefact filenames under `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        Self {
            audio: output_dir.join("audio.wav"),
            transcription: output_dir.join("transcription.txt"),
            summary: output_dir.join("summary.txt"),
            flashcards: output_dir.join("flashcards.csv"),
            output_dir,
        }
    }

    /// Create the output directory if it does not exist.
    pub fn ensure_output_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }
}

/// A single artefact kind, for reporting what a run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artefact {
    Audio,
    Transcription,
    Summary,
    Flashcards,
}

impl std::fmt::Display for Artefact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Artefact::Audio => write!(f, "Audio"),
            Artefact::Transcription => write!(f, "Transcription"),
            Artefact::Summary => write!(f, "Summary"),
            Artefact::Flashcards => write!(f, "Flashcards"),
        }
    }
}

/// What a workflow run wrote (or reused), in stage order.
#[derive(Debug, Default)]
pub struct WorkflowReport {
    /// Artefacts written this run, with their paths.
    pub written: Vec<(Artefact, PathBuf)>,
    /// True when option 5 found an existing summary and skipped regeneration.
    pub summary_reused: bool,
}

/// The injected external interfaces a workflow run drives.
///
/// The speech model and completer are optional so callers only construct
/// (and pay for) the dependencies the chosen option actually uses.
pub struct Workflow<'a> {
    extractor: &'a dyn AudioExtractor,
    speech: Option<&'a dyn SpeechModel>,
    completer: Option<&'a dyn Completer>,
    prompts: &'a Prompts,
}

fn required_video(video: Option<&Path>) -> Result<&Path> {
    video.ok_or_else(|| LeseError::InvalidInput("No video file selected".to_string()))
}

impl<'a> Workflow<'a> {
    pub fn new(
        extractor: &'a dyn AudioExtractor,
        speech: Option<&'a dyn SpeechModel>,
        completer: Option<&'a dyn Completer>,
        prompts: &'a Prompts,
    ) -> Self {
        Self {
            extractor,
            speech,
            completer,
            prompts,
        }
    }

    fn speech(&self) -> Result<&'a dyn SpeechModel> {
        self.speech
            .ok_or_else(|| LeseError::Config("No speech model configured".to_string()))
    }

    fn completer(&self) -> Result<&'a dyn Completer> {
        self.completer
            .ok_or_else(|| LeseError::Config("No completion client configured".to_string()))
    }

    /// Run the stages for `choice`.
    ///
    /// `video` must be provided for the options that start from a video file.
    /// Missing-prerequisite errors surface before anything is written.
    #[instrument(skip(self, video, paths), fields(choice = ?choice))]
    pub async fn run(
        &self,
        choice: Choice,
        video: Option<&Path>,
        paths: &ArtefactPaths,
    ) -> Result<WorkflowReport> {
        let mut report = WorkflowReport::default();

        if choice == Choice::Quit {
            return Ok(report);
        }

        if choice.needs_transcription() && !paths.transcription.exists() {
            return Err(LeseError::MissingArtefact(
                paths.transcription.display().to_string(),
            ));
        }

        if choice.needs_video() {
            required_video(video)?;
        }

        paths.ensure_output_dir()?;

        match choice {
            Choice::FullWorkflow => {
                self.extract(required_video(video)?, paths, &mut report)
                    .await?;
                let transcription = self.transcribe(paths, &mut report).await?;
                let summary = self.summarize(&transcription, paths, &mut report).await?;
                self.flashcards(&summary, &transcription, paths, &mut report)
                    .await?;
            }
            Choice::ExtractAudio => {
                self.extract(required_video(video)?, paths, &mut report)
                    .await?;
            }
            Choice::Transcribe => {
                self.extract(required_video(video)?, paths, &mut report)
                    .await?;
                self.transcribe(paths, &mut report).await?;
            }
            Choice::Summary => {
                let transcription = std::fs::read_to_string(&paths.transcription)?;
                self.summarize(&transcription, paths, &mut report).await?;
            }
            Choice::Flashcards => {
                let transcription = std::fs::read_to_string(&paths.transcription)?;
                // Reuse an existing summary unchanged; only generate when absent.
                let summary = if paths.summary.exists() {
                    info!("Reusing existing summary at {}", paths.summary.display());
                    report.summary_reused = true;
                    std::fs::read_to_string(&paths.summary)?
                } else {
                    self.summarize(&transcription, paths, &mut report).await?
                };
                self.flashcards(&summary, &transcription, paths, &mut report)
                    .await?;
            }
            Choice::SummaryAndFlashcards => {
                let transcription = std::fs::read_to_string(&paths.transcription)?;
                let summary = self.summarize(&transcription, paths, &mut report).await?;
                self.flashcards(&summary, &transcription, paths, &mut report)
                    .await?;
            }
            Choice::Quit => unreachable!(),
        }

        Ok(report)
    }

    async fn extract(
        &self,
        video: &Path,
        paths: &ArtefactPaths,
        report: &mut WorkflowReport,
    ) -> Result<()> {
        info!("Extracting audio from {}", video.display());
        self.extractor.extract(video, &paths.audio).await?;
        report.written.push((Artefact::Audio, paths.audio.clone()));
        Ok(())
    }

    async fn transcribe(
        &self,
        paths: &ArtefactPaths,
        report: &mut WorkflowReport,
    ) -> Result<String> {
        info!("Transcribing {}", paths.audio.display());
        let transcription = self.speech()?.transcribe(&paths.audio).await?;
        std::fs::write(&paths.transcription, &transcription)?;
        report
            .written
            .push((Artefact::Transcription, paths.transcription.clone()));
        Ok(transcription)
    }

    async fn summarize(
        &self,
        transcription: &str,
        paths: &ArtefactPaths,
        report: &mut WorkflowReport,
    ) -> Result<String> {
        let summary = generate_summary(self.completer()?, self.prompts, transcription).await?;
        std::fs::write(&paths.summary, &summary)?;
        report
            .written
            .push((Artefact::Summary, paths.summary.clone()));
        Ok(summary)
    }

    async fn flashcards(
        &self,
        summary: &str,
        transcription: &str,
        paths: &ArtefactPaths,
        report: &mut WorkflowReport,
    ) -> Result<()> {
        let csv =
            generate_flashcards(self.completer()?, self.prompts, summary, transcription).await?;
        std::fs::write(&paths.flashcards, &csv)?;
        report
            .written
            .push((Artefact::Flashcards, paths.flashcards.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    /// Writes a stub file instead of invoking ffmpeg.
    struct FakeExtractor;

    #[async_trait]
    impl AudioExtractor for FakeExtractor {
        async fn extract(&self, _source: &Path, dest: &Path) -> Result<()> {
            std::fs::write(dest, b"RIFF-stub")?;
            Ok(())
        }
    }

    /// Returns a fixed transcript.
    struct FakeSpeech;

    #[async_trait]
    impl SpeechModel for FakeSpeech {
        async fn transcribe(&self, _audio_path: &Path) -> Result<String> {
            Ok("we discussed the opening chapters".to_string())
        }
    }

    /// Answers summary and flashcard prompts with canned text, counting each.
    struct FakeCompleter {
        summary_calls: AtomicUsize,
        flashcard_calls: AtomicUsize,
    }

    impl FakeCompleter {
        fn new() -> Self {
            Self {
                summary_calls: AtomicUsize::new(0),
                flashcard_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Completer for FakeCompleter {
        async fn complete(&self, _system: &str, user: &str) -> Result<String> {
            if user.contains("'Front' and 'Back'") {
                self.flashcard_calls.fetch_add(1, Ordering::SeqCst);
                Ok("Front,Back\nWho spoke first?,Ana".to_string())
            } else {
                self.summary_calls.fetch_add(1, Ordering::SeqCst);
                Ok("generated summary".to_string())
            }
        }
    }

    fn workflow<'a>(
        extractor: &'a FakeExtractor,
        speech: &'a FakeSpeech,
        completer: &'a FakeCompleter,
        prompts: &'a Prompts,
    ) -> Workflow<'a> {
        Workflow::new(extractor, Some(speech), Some(completer), prompts)
    }

    #[test]
    fn test_choice_parsing() {
        assert_eq!(Choice::parse("1"), Some(Choice::FullWorkflow));
        assert_eq!(Choice::parse(" 4 "), Some(Choice::Summary));
        assert_eq!(Choice::parse("7"), Some(Choice::Quit));
        assert_eq!(Choice::parse("8"), None);
        assert_eq!(Choice::parse("0"), None);
        assert_eq!(Choice::parse(""), None);
        assert_eq!(Choice::parse("one"), None);
    }

    #[test]
    fn test_choice_requirements() {
        assert!(Choice::FullWorkflow.needs_video());
        assert!(!Choice::Summary.needs_video());
        assert!(Choice::Flashcards.needs_transcription());
        assert!(!Choice::ExtractAudio.needs_transcription());
        assert!(!Choice::ExtractAudio.needs_llm());
        assert!(Choice::Flashcards.needs_llm());
        assert!(!Choice::Quit.needs_llm());
    }

    #[test]
    fn test_artefact_paths() {
        let paths = ArtefactPaths::new("outputs");
        assert_eq!(paths.audio, PathBuf::from("outputs/audio.wav"));
        assert_eq!(
            paths.transcription,
            PathBuf::from("outputs/transcription.txt")
        );
        assert_eq!(paths.summary, PathBuf::from("outputs/summary.txt"));
        assert_eq!(paths.flashcards, PathBuf::from("outputs/flashcards.csv"));
    }

    #[tokio::test]
    async fn test_full_workflow_writes_all_artefacts() {
        let dir = tempdir().unwrap();
        let paths = ArtefactPaths::new(dir.path().join("outputs"));
        let (extractor, speech, completer) = (FakeExtractor, FakeSpeech, FakeCompleter::new());
        let prompts = Prompts::default();
        let wf = workflow(&extractor, &speech, &completer, &prompts);

        let report = wf
            .run(Choice::FullWorkflow, Some(Path::new("session.mp4")), &paths)
            .await
            .unwrap();

        assert_eq!(report.written.len(), 4);
        assert_eq!(
            std::fs::read_to_string(&paths.transcription).unwrap(),
            "we discussed the opening chapters"
        );
        assert_eq!(
            std::fs::read_to_string(&paths.summary).unwrap(),
            "generated summary"
        );
        assert!(std::fs::read_to_string(&paths.flashcards)
            .unwrap()
            .starts_with("Front,Back"));
        assert!(paths.audio.exists());
    }

    #[tokio::test]
    async fn test_extract_only() {
        let dir = tempdir().unwrap();
        let paths = ArtefactPaths::new(dir.path().join("outputs"));
        let (extractor, speech, completer) = (FakeExtractor, FakeSpeech, FakeCompleter::new());
        let prompts = Prompts::default();
        let wf = workflow(&extractor, &speech, &completer, &prompts);

        let report = wf
            .run(Choice::ExtractAudio, Some(Path::new("session.mp4")), &paths)
            .await
            .unwrap();

        assert_eq!(report.written.len(), 1);
        assert!(paths.audio.exists());
        assert!(!paths.transcription.exists());
        assert_eq!(completer.summary_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_transcription_aborts_without_writes() {
        let dir = tempdir().unwrap();
        let paths = ArtefactPaths::new(dir.path().join("outputs"));
        let (extractor, speech, completer) = (FakeExtractor, FakeSpeech, FakeCompleter::new());
        let prompts = Prompts::default();
        let wf = workflow(&extractor, &speech, &completer, &prompts);

        for choice in [Choice::Summary, Choice::Flashcards, Choice::SummaryAndFlashcards] {
            let err = wf.run(choice, None, &paths).await.unwrap_err();
            assert!(matches!(err, LeseError::MissingArtefact(_)));
        }

        // Nothing was written, not even the output directory.
        assert!(!paths.output_dir.exists());
        assert_eq!(completer.summary_calls.load(Ordering::SeqCst), 0);
        assert_eq!(completer.flashcard_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_summary_regenerated_every_run() {
        let dir = tempdir().unwrap();
        let paths = ArtefactPaths::new(dir.path().join("outputs"));
        paths.ensure_output_dir().unwrap();
        std::fs::write(&paths.transcription, "a transcript").unwrap();

        let (extractor, speech, completer) = (FakeExtractor, FakeSpeech, FakeCompleter::new());
        let prompts = Prompts::default();
        let wf = workflow(&extractor, &speech, &completer, &prompts);

        wf.run(Choice::Summary, None, &paths).await.unwrap();
        wf.run(Choice::Summary, None, &paths).await.unwrap();
        assert_eq!(completer.summary_calls.load(Ordering::SeqCst), 2);

        // Option 6 also regenerates even though a summary exists.
        wf.run(Choice::SummaryAndFlashcards, None, &paths)
            .await
            .unwrap();
        assert_eq!(completer.summary_calls.load(Ordering::SeqCst), 3);
        assert_eq!(completer.flashcard_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_flashcards_reuse_existing_summary() {
        let dir = tempdir().unwrap();
        let paths = ArtefactPaths::new(dir.path().join("outputs"));
        paths.ensure_output_dir().unwrap();
        std::fs::write(&paths.transcription, "a transcript").unwrap();
        std::fs::write(&paths.summary, "handwritten summary").unwrap();

        let (extractor, speech, completer) = (FakeExtractor, FakeSpeech, FakeCompleter::new());
        let prompts = Prompts::default();
        let wf = workflow(&extractor, &speech, &completer, &prompts);

        let report = wf.run(Choice::Flashcards, None, &paths).await.unwrap();

        assert!(report.summary_reused);
        assert_eq!(completer.summary_calls.load(Ordering::SeqCst), 0);
        assert_eq!(completer.flashcard_calls.load(Ordering::SeqCst), 1);
        // The existing summary is untouched.
        assert_eq!(
            std::fs::read_to_string(&paths.summary).unwrap(),
            "handwritten summary"
        );
    }

    #[tokio::test]
    async fn test_flashcards_generate_summary_when_absent() {
        let dir = tempdir().unwrap();
        let paths = ArtefactPaths::new(dir.path().join("outputs"));
        paths.ensure_output_dir().unwrap();
        std::fs::write(&paths.transcription, "a transcript").unwrap();

        let (extractor, speech, completer) = (FakeExtractor, FakeSpeech, FakeCompleter::new());
        let prompts = Prompts::default();
        let wf = workflow(&extractor, &speech, &completer, &prompts);

        let report = wf.run(Choice::Flashcards, None, &paths).await.unwrap();

        assert!(!report.summary_reused);
        assert_eq!(completer.summary_calls.load(Ordering::SeqCst), 1);
        assert!(paths.summary.exists());
        assert!(paths.flashcards.exists());
    }

    #[tokio::test]
    async fn test_quit_is_a_no_op() {
        let dir = tempdir().unwrap();
        let paths = ArtefactPaths::new(dir.path().join("outputs"));
        let (extractor, speech, completer) = (FakeExtractor, FakeSpeech, FakeCompleter::new());
        let prompts = Prompts::default();
        let wf = workflow(&extractor, &speech, &completer, &prompts);

        let report = wf.run(Choice::Quit, None, &paths).await.unwrap();
        assert!(report.written.is_empty());
        assert!(!paths.output_dir.exists());
    }

    #[tokio::test]
    async fn test_rerun_overwrites_artefacts() {
        let dir = tempdir().unwrap();
        let paths = ArtefactPaths::new(dir.path().join("outputs"));
        let (extractor, speech, completer) = (FakeExtractor, FakeSpeech, FakeCompleter::new());
        let prompts = Prompts::default();
        let wf = workflow(&extractor, &speech, &completer, &prompts);

        wf.run(Choice::Transcribe, Some(Path::new("a.mp4")), &paths)
            .await
            .unwrap();
        std::fs::write(&paths.transcription, "stale").unwrap();

        wf.run(Choice::Transcribe, Some(Path::new("a.mp4")), &paths)
            .await
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(&paths.transcription).unwrap(),
            "we discussed the opening chapters"
        );
    }
}
