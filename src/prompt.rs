//! Interactive yes/no questions behind an injectable [`Prompt`] trait.
use std::io::{self, BufRead, Write};

use anyhow::{Context as _, Result};

/// Source of answers to yes/no questions.
pub trait Prompt: Send + Sync + std::fmt::Debug {
    /// Ask `question`; blank input selects `default`.
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be read.
    fn confirm(&self, question: &str, default: bool) -> Result<bool>;
}

/// Reads answers from standard input.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let mut stdout = io::stdout();
        write!(stdout, "\n{question} {hint} ").context("writing prompt")?;
        stdout.flush().context("flushing prompt")?;

        let mut input = String::new();
        io::stdin()
            .lock()
            .read_line(&mut input)
            .context("reading answer")?;
        Ok(parse_answer(&input).unwrap_or(default))
    }
}

/// Answers every question with "yes" (the `--yes` flag).
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Prompt for AssumeYes {
    fn confirm(&self, _question: &str, _default: bool) -> Result<bool> {
        Ok(true)
    }
}

/// Interpret a typed answer. `None` means "use the default".
fn parse_answer(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
