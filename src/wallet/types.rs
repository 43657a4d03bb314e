//! Wallet tool invocation types and error definitions.

use std::ffi::{OsStr, OsString};
use std::fmt;

use thiserror::Error;

/// A single wallet tool invocation: program plus argument vector.
///
/// Arguments are passed to the program directly, never through a shell, so
/// amounts, addresses and paths from the batch file are not interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Arguments as lossy UTF-8, for matching and display.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Errors that can occur while driving the wallet tools.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The executable could not be located.
    #[error("{program} not found in PATH")]
    ToolNotFound { program: String },

    /// The tool wrote to its error stream; carries the trimmed text.
    #[error("{0}")]
    ExternalTool(String),

    /// The tool could not be started for a reason other than absence.
    #[error("unable to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool did not finish within the configured bound.
    #[error("{program} did not finish within {secs} seconds")]
    Timeout { program: String, secs: u64 },
}

/// Result type for wallet operations.
pub type WalletResult<T> = Result<T, WalletError>;
