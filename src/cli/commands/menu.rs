//! Interactive workflow menu.
//!
//! Prompting happens here; the decisions it gathers (selection resolution,
//! choice dispatch) live in `media` and `workflow` and stay terminal-free.

use crate::audio::FfmpegExtractor;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::error::LeseError;
use crate::llm::{Completer, OpenAICompleter};
use crate::media::{list_video_files, resolve_selection};
use crate::transcription::{ensure_model, SpeechModel, WhisperModel, WhisperTranscriber};
use crate::workflow::{ArtefactPaths, Choice, Workflow};
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

/// Run the interactive menu once: one choice, one workflow, then return.
pub async fn run_menu(settings: Settings) -> Result<()> {
    print_header();
    print_options();

    let choice_input = prompt("\nEnter your choice (1-7): ")?;
    let Some(choice) = Choice::parse(&choice_input) else {
        Output::error("Invalid choice. Exiting.");
        return Ok(());
    };

    if choice == Choice::Quit {
        Output::info("Goodbye!");
        return Ok(());
    }

    let folder = prompt(&format!(
        "Enter the output folder for generated artefacts (default: {}): ",
        settings.general.output_dir
    ))?;
    let folder = if folder.is_empty() {
        settings.general.output_dir.clone()
    } else {
        folder
    };
    let paths = ArtefactPaths::new(folder);

    // Fail fast on anything the chosen stages will need.
    if choice.needs_video() {
        preflight::check(Operation::Extract)?;
    }
    let api_key = if choice.needs_llm() {
        Some(preflight::require_api_key()?)
    } else {
        None
    };

    let video = if choice.needs_video() {
        match choose_video_file()? {
            Some(path) => Some(path),
            // A message was already printed; return to idle.
            None => return Ok(()),
        }
    } else {
        None
    };

    if choice.needs_transcription() && !paths.transcription.exists() {
        Output::error(&format!(
            "Transcription file not found at {}. Please run transcription first.",
            paths.transcription.display()
        ));
        return Ok(());
    }

    let extractor = FfmpegExtractor::new();

    let speech = if choice.needs_speech_model() {
        let variant: WhisperModel = settings
            .transcription
            .model
            .parse()
            .map_err(LeseError::Config)?;
        let model_file = ensure_model(variant, &settings.models_dir()).await?;

        let spinner = Output::spinner(&format!("Loading Whisper {} model...", variant));
        let transcriber = WhisperTranscriber::load(
            &model_file,
            settings.whisper_language(),
            settings.transcription.threads,
        )?;
        spinner.finish_and_clear();
        Some(transcriber)
    } else {
        None
    };

    let completer = api_key.map(|key| {
        OpenAICompleter::new(
            &key,
            &settings.llm.model,
            Duration::from_secs(settings.llm.timeout_seconds),
        )
    });

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;

    let workflow = Workflow::new(
        &extractor,
        speech.as_ref().map(|s| s as &dyn SpeechModel),
        completer.as_ref().map(|c| c as &dyn Completer),
        &prompts,
    );

    Output::info("Working...");
    let report = workflow.run(choice, video.as_deref(), &paths).await?;

    if report.summary_reused {
        Output::info(&format!(
            "Reused existing summary at {}",
            paths.summary.display()
        ));
    }
    for (artefact, path) in &report.written {
        Output::success(&format!("{} saved to {}", artefact, path.display()));
    }
    if choice == Choice::FullWorkflow {
        Output::success("Full workflow complete!");
    }

    Ok(())
}

/// Prompt the user for a directory, list its video files, and resolve a
/// selection. Returns None (already reported) when there is nothing to select.
fn choose_video_file() -> Result<Option<PathBuf>> {
    let dir_input = prompt(
        "Enter the directory containing your video files (press Enter for current directory): ",
    )?;
    let dir = if dir_input.is_empty() {
        std::env::current_dir()?
    } else {
        PathBuf::from(dir_input)
    };

    if !dir.is_dir() {
        Output::error("Directory does not exist.");
        return Ok(None);
    }

    let files = match list_video_files(&dir) {
        Ok(files) => files,
        Err(e) => {
            Output::error(&format!("Cannot list {}: {}", dir.display(), e));
            return Ok(None);
        }
    };

    if files.is_empty() {
        Output::warning("No video files found in that directory.");
        return Ok(None);
    }

    println!(
        "\n{}",
        style(format!("Video files in {}:", dir.display())).bold()
    );
    for (idx, file) in files.iter().enumerate() {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Output::numbered_item(idx + 1, &name);
    }

    let selection = prompt("\nSelect a video file by number or type the file name: ")?;
    match resolve_selection(&dir, &files, &selection) {
        Some(path) => Ok(Some(path)),
        None => {
            Output::error("Invalid selection.");
            Ok(None)
        }
    }
}

fn print_header() {
    let line = "=".repeat(67);
    println!("\n{}", style(&line).cyan().bold());
    println!(
        "{}",
        style("          Lese - Reading Club Study Artefacts").cyan().bold()
    );
    println!("{}", style(&line).cyan().bold());
}

fn print_options() {
    println!("\nSelect the operation you would like to perform:");
    Output::numbered_item(1, "Full workflow (extract audio, transcribe, generate summary, and flashcards)");
    Output::numbered_item(2, "Extract audio only");
    Output::numbered_item(3, "Transcribe audio only (and save transcription)");
    Output::numbered_item(4, "Generate summary (from existing transcription file)");
    Output::numbered_item(5, "Generate flashcards (requires transcription; summary will be generated if missing)");
    Output::numbered_item(6, "Generate summary and flashcards (from existing transcription file)");
    Output::numbered_item(7, "Quit");
}

/// Print a prompt and read one trimmed line from stdin.
fn prompt(message: &str) -> io::Result<String> {
    print!("{}", style(message).bold());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
