//! Disambiguation between multiple candidate files.

use std::io::{self, BufRead, Write};

use crate::error::{Error, Result};
use crate::locate::Candidate;
use crate::name::LibName;

/// Picks one candidate when a library name matches more than one file.
pub trait Chooser {
    /// Return an index into `candidates`.
    ///
    /// Called only with two or more candidates. The returned index must be
    /// in range; there is no default choice.
    fn choose(&mut self, name: &LibName, candidates: &[Candidate]) -> Result<usize>;
}

/// Interactive chooser that lists candidates and reads an index.
///
/// Answers that are not an integer in `0..candidates.len()` are rejected and
/// the prompt is repeated. Negative numbers are rejected.
pub struct PromptChooser<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptChooser<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the chooser and return its writer.
    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, name: &LibName, candidates: &[Candidate]) -> io::Result<usize> {
        writeln!(self.output)?;
        writeln!(self.output, "{name} found in multiple directories")?;
        writeln!(self.output, "please choose one:")?;
        for (idx, candidate) in candidates.iter().enumerate() {
            writeln!(self.output, " [{idx}] {}", candidate.path().display())?;
        }

        let mut line = String::new();
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before a valid candidate was chosen",
                ));
            }

            match parse_selection(&line, candidates.len()) {
                Some(idx) => return Ok(idx),
                None => writeln!(self.output, "invalid answer")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Chooser for PromptChooser<R, W> {
    fn choose(&mut self, name: &LibName, candidates: &[Candidate]) -> Result<usize> {
        self.prompt(name, candidates).map_err(Error::Selection)
    }
}

/// Parse an answer as an index in `0..len`.
#[must_use]
pub fn parse_selection(answer: &str, len: usize) -> Option<usize> {
    answer.trim().parse::<usize>().ok().filter(|idx| *idx < len)
}
