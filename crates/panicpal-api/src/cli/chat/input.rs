//! Async readline input handling for the chat loop.
//!
//! Wraps `rustyline_async::Readline` to provide async line reading with
//! handling of EOF (Ctrl+D) and interrupt (Ctrl+C).

use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};
use tracing::debug;

/// Events produced by the input handler.
#[derive(Debug)]
pub enum InputEvent {
    /// User submitted a line.
    Message(String),
    /// End of file (Ctrl+D).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Create a new input handler with the given prompt.
    ///
    /// Returns the handler and a `SharedWriter` for printing above the
    /// prompt without breaking the line being typed.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, stdout) = Readline::new(prompt)?;
        Ok((Self { rl }, stdout))
    }

    /// Replace the prompt in place.
    pub fn set_prompt(&mut self, prompt: &str) {
        if let Err(e) = self.rl.update_prompt(prompt) {
            debug!(error = %e, "Failed to update prompt");
        }
    }

    /// Read a line of input.
    ///
    /// Cancel-safe: a partially typed line survives the future being dropped.
    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                if !line.trim().is_empty() {
                    self.rl.add_history_entry(line.clone());
                }
                InputEvent::Message(line)
            }
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(_) => InputEvent::Eof,
        }
    }

    /// Clear the terminal screen.
    pub fn clear(&mut self) {
        if let Err(e) = self.rl.clear() {
            debug!(error = %e, "Failed to clear screen");
        }
    }

    /// Flush pending output written through the `SharedWriter`.
    pub fn flush(&mut self) {
        if let Err(e) = self.rl.flush() {
            debug!(error = %e, "Failed to flush chat output");
        }
    }
}
