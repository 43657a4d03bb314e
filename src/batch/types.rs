//! Transfer records and their dispositions.

use thiserror::Error;

/// Address prefix of hex-encoded foreign-chain accounts.
const FOREIGN_ADDRESS_PREFIX: &str = "0x";

/// One non-header row of the batch file, kept as raw positional fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    /// 1-based line in the batch file.
    line: u64,
    fields: Vec<String>,
}

impl TransferRecord {
    pub fn new(line: u64, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Decide what the transfer loop should do with this record.
    ///
    /// Checks run in a fixed order: blank, shape, foreign address.
    pub fn check(&self) -> RecordCheck<'_> {
        let present = &self.fields[..self.fields.len().min(3)];
        if present.is_empty() || present.iter().any(String::is_empty) {
            return RecordCheck::Skip(SkipReason::Blank);
        }

        let [amount, token, recipient] = present else {
            return RecordCheck::Skip(SkipReason::Malformed {
                columns: self.fields.len(),
            });
        };

        if is_foreign_address(recipient) {
            return RecordCheck::Reject { recipient };
        }

        RecordCheck::Send(Transfer {
            amount,
            token,
            recipient,
        })
    }
}

/// Case-insensitive `0x` prefix test.
pub fn is_foreign_address(recipient: &str) -> bool {
    recipient
        .get(..FOREIGN_ADDRESS_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(FOREIGN_ADDRESS_PREFIX))
}

/// Outcome of validating a record before any wallet call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordCheck<'a> {
    Skip(SkipReason),
    Reject { recipient: &'a str },
    Send(Transfer<'a>),
}

/// Why a record was skipped without touching the run log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No fields, or one of amount/token/recipient is empty.
    Blank,
    /// Fewer than three fields.
    Malformed { columns: usize },
}

/// A validated transfer, borrowing from its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer<'a> {
    pub amount: &'a str,
    pub token: &'a str,
    pub recipient: &'a str,
}

/// Per-run counts reported at the end of the batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Transfer commands issued.
    pub attempted: usize,
    pub succeeded: usize,
    /// Blank or malformed rows.
    pub skipped: usize,
    /// Recipients refused by the address check.
    pub rejected: usize,
    /// Transfer commands that reported an error.
    pub failed: usize,
}

impl RunSummary {
    /// Number of lines written to the run log.
    pub fn logged(&self) -> usize {
        self.rejected + self.failed
    }
}

/// Errors that can occur while reading the batch file.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("unable to open batch file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse batch file {path} at line {line}: {source}")]
    Parse {
        path: String,
        line: u64,
        #[source]
        source: csv::Error,
    },
}
