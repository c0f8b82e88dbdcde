//! Yes/no confirmation before a command touches the filesystem.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::error::Result;

/// Something that can answer a yes/no question.
pub trait Confirm {
    /// Ask `prompt`; `true` means go ahead.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Ask `confirm` unless `force` is set, in which case no I/O happens.
pub fn gate(confirm: &mut dyn Confirm, force: bool, prompt: &str) -> Result<bool> {
    if force {
        log::debug!("Confirmation skipped (forced); prompt={}", prompt);
        return Ok(true);
    }
    confirm.confirm(prompt)
}

/// Whether a typed answer counts as "yes".
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Prompts on a writer and reads a single line from a reader.
///
/// End of input counts as "no".
pub struct Interactive<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Interactive<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl Interactive<std::io::StdinLock<'static>, Box<dyn Write>> {
    /// Read answers from stdin. Prompts go to stdout, or to stderr when
    /// stdout is reserved for a machine-readable report.
    pub fn stdio(prompt_on_stderr: bool) -> Self {
        let output: Box<dyn Write> = if prompt_on_stderr {
            Box::new(std::io::stderr())
        } else {
            Box::new(std::io::stdout())
        };
        Self::new(std::io::stdin().lock(), output)
    }
}

impl<R: BufRead, W: Write> Confirm for Interactive<R, W> {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        write!(self.output, "{} (y/n) ", prompt)?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            // Keep the terminal tidy when stdin closes without a newline.
            writeln!(self.output)?;
            return Ok(false);
        }
        Ok(is_affirmative(&answer))
    }
}

/// Replays canned answers and records every prompt it was shown.
///
/// Running out of answers counts as "no", like end of input.
#[derive(Debug, Default)]
pub struct Scripted {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl Scripted {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }
}

impl Confirm for Scripted {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        self.prompts.push(prompt.to_string());
        Ok(self
            .answers
            .pop_front()
            .is_some_and(|answer| is_affirmative(&answer)))
    }
}
