//! Per-run audit file of recipients that need re-driving.
//!
//! One recipient address per line, in encounter order, for every record
//! rejected by the address check or failed by the wallet tool. The file is
//! never read back by the tool; operators feed it into a later batch.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Run log file name for a run started at `started_at`.
pub fn file_name(started_at: &DateTime<Local>) -> String {
    started_at
        .format("transfer %d-%m-%Y %H-%M-%S.log")
        .to_string()
}

/// Append-only recipient log.
#[derive(Debug)]
pub struct RunLog<W: Write = File> {
    writer: W,
    path: Option<PathBuf>,
    lines: usize,
}

impl RunLog<File> {
    /// Create (or truncate) the run log for a run started at `started_at`.
    pub fn create(directory: &Path, started_at: &DateTime<Local>) -> io::Result<Self> {
        let path = directory.join(file_name(started_at));
        let file = File::create(&path)?;
        tracing::info!(path = %path.display(), "Opened run log");
        Ok(Self {
            writer: file,
            path: Some(path),
            lines: 0,
        })
    }
}

impl<W: Write> RunLog<W> {
    /// Wrap an arbitrary writer (no backing path).
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer,
            path: None,
            lines: 0,
        }
    }

    /// Append one recipient address and flush it.
    pub fn record(&mut self, recipient: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", recipient)?;
        self.writer.flush()?;
        self.lines += 1;
        Ok(())
    }

    /// Lines written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Flush and close, returning the underlying writer.
    pub fn close(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
