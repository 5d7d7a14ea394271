//! Terminal-backed stream selection
//!
//! Choices are listed on the writer (stderr in production, so stdout stays
//! free for dry-run output) and answers are read line by line.

use std::io::{BufRead, Stderr, StdinLock, Write};

use tracing::warn;

use crate::domain::model::{MediaKind, StreamDescriptor};
use crate::error::{ConvertError, ConvertResult};
use crate::ports::{SelectionPort, StreamChoice};
use crate::streams::parse_choice;

/// Line-oriented prompt over any reader/writer pair
pub struct TerminalPrompt<R, W> {
    reader: R,
    writer: W,
}

impl TerminalPrompt<StdinLock<'static>, Stderr> {
    /// Prompt on stderr, read from stdin
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Consume the prompt and hand back the writer
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn ask(&mut self, question: &str) -> ConvertResult<String> {
        write!(self.writer, "{}: ", question).map_err(prompt_error)?;
        self.writer.flush().map_err(prompt_error)?;

        let mut line = String::new();
        let read = self.reader.read_line(&mut line).map_err(prompt_error)?;
        if read == 0 {
            // Closed input behaves like a blank answer
            warn!("Input closed, using the default answer");
            writeln!(self.writer).map_err(prompt_error)?;
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> SelectionPort for TerminalPrompt<R, W> {
    fn choose(
        &mut self,
        kind: MediaKind,
        streams: &[StreamDescriptor],
    ) -> ConvertResult<StreamChoice> {
        let (heading, blank) = match kind {
            MediaKind::Audio => ("Audio streams", "blank = all, none = no audio"),
            MediaKind::Subtitle => ("Subtitle streams", "blank = none"),
            MediaKind::Video => ("Video streams", "blank = default"),
        };

        writeln!(self.writer, "{}:", heading).map_err(prompt_error)?;
        for stream in streams {
            writeln!(self.writer, "  {}", stream.describe()).map_err(prompt_error)?;
        }

        let answer = self.ask(&format!(
            "Select {} streams (e.g. 1,2 or 1 2; {})",
            kind, blank
        ))?;
        Ok(parse_choice(&answer))
    }

    fn choose_one(
        &mut self,
        prompt: &str,
        options: &[&str],
        default: &str,
    ) -> ConvertResult<String> {
        let answer = self.ask(&format!(
            "{} [{}] (default {})",
            prompt,
            options.join("/"),
            default
        ))?;

        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }
}

fn prompt_error(e: std::io::Error) -> ConvertError {
    ConvertError::Prompt {
        message: e.to_string(),
    }
}
