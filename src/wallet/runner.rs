//! External command execution.
//!
//! # Responsibilities
//! - Launch a wallet tool with an explicit argument vector
//! - Capture stdout and stderr fully
//! - Treat any stderr output as failure
//! - Enforce the optional invocation deadline
//!
//! # Design Decisions
//! - Exit status is not inspected; the wallet tools report problems on stderr
//! - Timed-out children are killed when the output future is dropped
//! - No retries; callers decide whether a failure is fatal

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use crate::wallet::types::{Invocation, WalletError, WalletResult};

/// Runs wallet tool invocations and returns their trimmed stdout.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, invocation: &Invocation) -> WalletResult<String>;
}

/// Runs invocations as child processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    deadline: Option<Duration>,
}

impl ProcessRunner {
    /// Create a runner; `timeout_secs == 0` waits indefinitely.
    pub fn new(timeout_secs: u64) -> Self {
        let deadline = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));
        Self { deadline }
    }
}

impl CommandRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> WalletResult<String> {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        tracing::debug!(command = %invocation, "Running wallet tool");

        let output = match self.deadline {
            Some(deadline) => timeout(deadline, command.output())
                .await
                .map_err(|_| WalletError::Timeout {
                    program: invocation.program.clone(),
                    secs: deadline.as_secs(),
                })?,
            None => command.output().await,
        }
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => WalletError::ToolNotFound {
                program: invocation.program.clone(),
            },
            _ => WalletError::Spawn {
                program: invocation.program.clone(),
                source: e,
            },
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            return Err(WalletError::ExternalTool(stderr.to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
