//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Output formatting
//! - This module - The [Prompter] capability and its terminal implementation

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::error::{Result, SemvertagError};

pub mod formatter;
pub mod mock;

pub use formatter::{
    display_boundary_warning, display_error, display_manual_push_instruction,
    display_proposed_tag, display_recent_tags, display_status, display_success,
};
pub use mock::ScriptedPrompter;

/// Interactive questions the workflow may ask
pub trait Prompter {
    /// Yes/no question
    fn confirm(&self, prompt: &str) -> Result<bool>;

    /// Free-text answer; may be empty
    fn input(&self, prompt: &str) -> Result<String>;

    /// Pick one of `items`, returning its index
    fn select(&self, prompt: &str, items: &[String]) -> Result<usize>;
}

/// [Prompter] on the controlling terminal, via `dialoguer`
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        DialoguerPrompter {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

fn prompt_error(e: dialoguer::Error) -> SemvertagError {
    SemvertagError::prompt(e.to_string())
}

impl Prompter for DialoguerPrompter {
    /// Defaults to yes when the user just presses Enter.
    fn confirm(&self, prompt: &str) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(true)
            .interact()
            .map_err(prompt_error)
    }

    fn input(&self, prompt: &str) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map(|answer| answer.trim().to_string())
            .map_err(prompt_error)
    }

    fn select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        if items.is_empty() {
            return Err(SemvertagError::prompt(format!(
                "Nothing to choose from for '{}'",
                prompt
            )));
        }

        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map_err(prompt_error)
    }
}
