//! # Line Input
//!
//! Reads command lines from the terminal or a script file.
//!
//! Interactive input shows a prompt before each read. Scripted input shows
//! no prompt but echoes each line after the prompt text, so the output reads
//! like a recorded terminal session.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::error::CliResult;

/// Source of operator lines.
pub struct Input<R> {
    lines: Lines<R>,
    mode: InputMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Interactive,
    Scripted,
}

impl<R: AsyncBufRead + Unpin> Input<R> {
    pub fn new(reader: R, mode: InputMode) -> Self {
        Input {
            lines: reader.lines(),
            mode,
        }
    }

    /// Next trimmed line, or `None` at end of input.
    pub async fn next_line<W: Write>(&mut self, out: &mut W, prompt: &str) -> CliResult<Option<String>> {
        if self.mode == InputMode::Interactive {
            write!(out, "{}", prompt)?;
            out.flush()?;
        }

        let line = self.lines.next_line().await?;

        if let (InputMode::Scripted, Some(text)) = (self.mode, &line) {
            writeln!(out, "{}{}", prompt, text)?;
        }

        Ok(line.map(|l| l.trim().to_string()))
    }
}

impl Input<BufReader<Stdin>> {
    /// Prompted input from the terminal.
    pub fn stdin() -> Self {
        Input::new(BufReader::new(tokio::io::stdin()), InputMode::Interactive)
    }
}
