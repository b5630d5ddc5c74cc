//! Interactive prompting capability.
//!
//! The resolution engine never talks to a terminal directly. It asks an
//! injected [`Prompter`], which blocks until an answer is available. The CLI
//! supplies a terminal implementation; tests supply scripted answers.

/// A single question put to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt<'a> {
    /// Free-text answer.
    Input { message: &'a str },
    /// Pick one of `options`; the answer is the chosen option text.
    Select {
        message: &'a str,
        options: &'a [String],
        default: usize,
    },
}

impl Prompt<'_> {
    pub fn message(&self) -> &str {
        match self {
            Prompt::Input { message } | Prompt::Select { message, .. } => message,
        }
    }
}

/// Something that can answer prompts.
pub trait Prompter {
    fn ask(&mut self, prompt: &Prompt<'_>) -> anyhow::Result<String>;
}

/// Prompter for non-interactive runs: every question is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractive;

impl Prompter for NonInteractive {
    fn ask(&mut self, prompt: &Prompt<'_>) -> anyhow::Result<String> {
        anyhow::bail!(
            "not in interactive mode, cannot ask: {} (pass the value as a flag instead)",
            prompt.message()
        )
    }
}
