//! Terminal prompting for missing inputs.
//!
//! Answers the core's prompts with dialoguer widgets. When stdin is not a
//! terminal (or `--no-interactive` is given) every prompt is an error instead.

use anyhow::{Result, anyhow};
use dialoguer::{Input, Select, theme::ColorfulTheme};

use apptree_core::inputs::{NonInteractive, Prompt, Prompter};

/// Prompter backed by the user's terminal.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &Prompt<'_>) -> Result<String> {
        match prompt {
            Prompt::Input { message } => {
                let answer: String = Input::with_theme(&self.theme)
                    .with_prompt(*message)
                    .interact_text()?;
                Ok(answer)
            }
            Prompt::Select {
                message,
                options,
                default,
            } => {
                let selection = Select::with_theme(&self.theme)
                    .with_prompt(*message)
                    .items(*options)
                    .default(*default)
                    .interact()?;
                selected_option(*options, selection)
            }
        }
    }
}

fn selected_option(options: &[String], index: usize) -> Result<String> {
    options
        .get(index)
        .cloned()
        .ok_or_else(|| anyhow!("selection {} is out of range", index))
}

/// Pick the prompter for this run.
pub fn prompter(no_interactive: bool) -> Box<dyn Prompter> {
    if no_interactive || !console::user_attended() {
        tracing::debug!("prompting disabled");
        Box::new(NonInteractive)
    } else {
        Box::new(TerminalPrompter::new())
    }
}
