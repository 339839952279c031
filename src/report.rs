//! Outcome reporting.
//!
//! One line per reportable outcome, in the original tool's format:
//!
//! ```text
//! Url http://localhost:9129/repo/core/os/x86_64/core.db got error: 200
//! ```
//!
//! Report lines go to the injected sink (stdout in production) rather than
//! through the logger, so they stay machine-greppable regardless of log
//! format. Suppressed outcomes produce no output.

use std::io::{self, Write};

use crate::outcome::Outcome;

/// Writes report lines to an output sink.
pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Reporter { out: io::stdout() }
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Reporter { out }
    }

    /// Emits the line for one classified outcome, or nothing if it is
    /// suppressed.
    pub fn report(&mut self, url: &str, outcome: &Outcome) -> io::Result<()> {
        if let Some(description) = outcome.description() {
            writeln!(self.out, "Url {url} got error: {description}")?;
        }
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}
