//! Configuration module for Lese.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{FlashcardPrompts, Prompts, SummaryPrompts, SYSTEM_PROMPT};
pub use settings::{
    GeneralSettings, LlmSettings, PromptSettings, Settings, TranscriptionSettings,
};
