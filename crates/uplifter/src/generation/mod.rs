//! Prompt generation for remote analysis

mod prompt;

pub use prompt::PromptBuilder;
