//! Operator-supplied antibiotic names, one per measurement.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use super::Measurement;

/// Failure to obtain an antibiotic name.
#[derive(Debug)]
pub enum NameSourceError {
    /// Input ended before every zone had a name.
    Exhausted {
        /// 1-based zone that was waiting for a name.
        zone: usize,
    },
    /// Reading the answer or writing the prompt failed.
    Io(std::io::Error),
}

impl std::fmt::Display for NameSourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exhausted { zone } => {
                write!(f, "no antibiotic name supplied for zone #{}", zone)
            }
            Self::Io(e) => write!(f, "failed to read antibiotic name: {}", e),
        }
    }
}

impl std::error::Error for NameSourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Exhausted { .. } => None,
        }
    }
}

impl From<std::io::Error> for NameSourceError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Supplies the antibiotic name for each zone, in detection order.
pub trait NameSource {
    /// Name for zone `zone` (1-based) measuring `measurement`.
    fn next_name(
        &mut self,
        zone: usize,
        measurement: Measurement,
    ) -> Result<String, NameSourceError>;

    /// Called after `name` failed to resolve. Interactive sources tell the operator.
    fn notify_unresolved(&mut self, _name: &str) -> Result<(), NameSourceError> {
        Ok(())
    }
}

/// Interactive source: prints a prompt and reads one line per zone.
///
/// Blank lines are skipped; surrounding whitespace is trimmed. End of input
/// before a name is read yields [`NameSourceError::Exhausted`].
pub struct PromptedNames<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptedNames<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> NameSource for PromptedNames<R, W> {
    fn next_name(
        &mut self,
        zone: usize,
        measurement: Measurement,
    ) -> Result<String, NameSourceError> {
        write!(
            self.output,
            "Enter antibiotic name for zone #{} ({:.2} mm): ",
            zone,
            measurement.diameter_mm()
        )?;
        self.output.flush()?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(NameSourceError::Exhausted { zone });
            }
            let name = line.trim();
            if !name.is_empty() {
                return Ok(name.to_string());
            }
        }
    }

    fn notify_unresolved(&mut self, name: &str) -> Result<(), NameSourceError> {
        writeln!(
            self.output,
            "Antibiotic '{}' not found in database, skipping.",
            name
        )?;
        Ok(())
    }
}

/// Pre-supplied names, consumed front to back.
#[derive(Debug, Clone, Default)]
pub struct FixedNames {
    names: VecDeque<String>,
}

impl FixedNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.names.len()
    }
}

impl NameSource for FixedNames {
    fn next_name(
        &mut self,
        zone: usize,
        _measurement: Measurement,
    ) -> Result<String, NameSourceError> {
        self.names
            .pop_front()
            .ok_or(NameSourceError::Exhausted { zone })
    }
}
