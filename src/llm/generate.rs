//! Summary and flashcard generation.

use super::Completer;
use crate::config::{Prompts, SYSTEM_PROMPT};
use crate::error::Result;
use std::collections::HashMap;
use tracing::info;

/// Generate a prose summary from a transcription.
///
/// The transcript is embedded verbatim in a fixed prompt; the caller is
/// responsible for persisting the result.
pub async fn generate_summary(
    completer: &dyn Completer,
    prompts: &Prompts,
    transcription: &str,
) -> Result<String> {
    info!("Generating summary ({} transcript chars)", transcription.len());

    let mut vars = HashMap::new();
    vars.insert("transcription".to_string(), transcription.to_string());

    let user_prompt = prompts.render_with_custom(&prompts.summary.user, &vars);
    completer.complete(SYSTEM_PROMPT, &user_prompt).await
}

/// Generate a CSV flashcard deck from a summary and transcription.
///
/// The prompt asks for strict two-column CSV (`Front`, `Back`) with no
/// surrounding commentary. The returned text is trusted as-is; no schema
/// validation is performed.
pub async fn generate_flashcards(
    completer: &dyn Completer,
    prompts: &Prompts,
    summary: &str,
    transcription: &str,
) -> Result<String> {
    info!("Generating flashcards");

    let mut vars = HashMap::new();
    vars.insert("summary".to_string(), summary.to_string());
    vars.insert("transcription".to_string(), transcription.to_string());

    let user_prompt = prompts.render_with_custom(&prompts.flashcards.user, &vars);
    completer.complete(SYSTEM_PROMPT, &user_prompt).await
}
