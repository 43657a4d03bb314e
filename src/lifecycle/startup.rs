//! Run orchestration.
//!
//! # Responsibilities
//! - Verify the wallet tools are installed before touching anything
//! - Load the batch and resolve the keypair's public key
//! - Open the run log, swap the keypair configuration, run the transfers
//! - Restore the configuration on every path after the swap
//!
//! # Design Decisions
//! - Fail fast: every error before the swap is fatal and side-effect free
//! - Steps run in order, never concurrently
//! - A failed restoration outranks any other error of the same run

use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::batch::{reader, run_transfers, BatchError, RunSummary, TransferAbort};
use crate::config::BatchConfig;
use crate::lifecycle::guard::{ConfigGuard, GuardError, Restoration};
use crate::observability::RunLog;
use crate::wallet::{CommandRunner, Wallet, WalletError};

/// Process exit status for a completed batch.
pub const EXIT_OK: u8 = 0;
/// Wrong arguments or help requested.
pub const EXIT_USAGE: u8 = 1;
/// Wallet CLI missing.
pub const EXIT_TOOL_NOT_FOUND: u8 = 2;
/// Interactive prompt closed before both paths were entered.
pub const EXIT_PROMPT: u8 = 3;
/// Batch file, run log or configuration file unusable.
pub const EXIT_IO: u8 = 4;
/// Wallet tool failed while resolving the key or reading/setting configuration.
pub const EXIT_CONFIGURATION: u8 = 5;
/// Keypair configuration could not be restored.
pub const EXIT_INCONSISTENT: u8 = 6;
/// A transfer hit the wallet deadline; its outcome is unknown.
pub const EXIT_TIMEOUT: u8 = 7;

/// Paths supplied by the operator for one run.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub keypair: PathBuf,
    pub batch: PathBuf,
}

/// What a completed run did.
#[derive(Debug)]
pub struct RunReport {
    pub public_key: String,
    pub summary: RunSummary,
    pub restoration: Restoration,
    pub run_log: Option<PathBuf>,
}

/// Fatal run errors.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("wallet CLI not usable, please ensure it is installed and on PATH: {0}")]
    ToolNotFound(#[source] WalletError),

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error("unable to create run log in {directory}: {source}")]
    RunLogCreate {
        directory: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to write run log: {0}")]
    RunLogWrite(#[source] std::io::Error),

    #[error("unable to resolve public key of {keypair}: {source}")]
    PublicKey {
        keypair: String,
        #[source]
        source: WalletError,
    },

    #[error(transparent)]
    Configuration(GuardError),

    #[error("transfer to {recipient} (line {line}) timed out and may have completed; remaining records not attempted: {source}")]
    TransferTimeout {
        recipient: String,
        line: u64,
        #[source]
        source: WalletError,
    },

    #[error("wallet keypair path could not be restored to {prior}; it still points at {batch_keypair}: {source}")]
    Inconsistent {
        prior: String,
        batch_keypair: String,
        #[source]
        source: WalletError,
    },
}

impl RunError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::ToolNotFound(_) => EXIT_TOOL_NOT_FOUND,
            RunError::Batch(_) | RunError::RunLogCreate { .. } | RunError::RunLogWrite(_) => {
                EXIT_IO
            }
            RunError::PublicKey { .. } | RunError::Configuration(_) => EXIT_CONFIGURATION,
            RunError::Inconsistent { .. } => EXIT_INCONSISTENT,
            RunError::TransferTimeout { .. } => EXIT_TIMEOUT,
        }
    }

    fn inconsistent(restoration: Restoration, batch_keypair: &Path) -> Result<Restoration, Self> {
        match restoration {
            Restoration::Failed { prior, error } => Err(RunError::Inconsistent {
                prior,
                batch_keypair: batch_keypair.display().to_string(),
                source: error,
            }),
            other => Ok(other),
        }
    }
}

/// Execute one batch run against `wallet`.
pub async fn run<R: CommandRunner>(
    wallet: &Wallet<R>,
    request: &BatchRequest,
    config: &BatchConfig,
) -> Result<RunReport, RunError> {
    let span = tracing::info_span!("batch", run_id = %Uuid::new_v4());
    execute(wallet, request, config).instrument(span).await
}

async fn execute<R: CommandRunner>(
    wallet: &Wallet<R>,
    request: &BatchRequest,
    config: &BatchConfig,
) -> Result<RunReport, RunError> {
    let started_at = Local::now();

    let version = wallet.version().await.map_err(RunError::ToolNotFound)?;
    tracing::debug!(version = %version, "Wallet CLI found");

    let records = reader::parse(&request.batch)?;

    let public_key = wallet
        .public_key(&request.keypair)
        .await
        .map_err(|source| RunError::PublicKey {
            keypair: request.keypair.display().to_string(),
            source,
        })?;
    tracing::info!(public_key = %public_key, "Successfully initialized wallet");

    let directory = Path::new(&config.run_log.directory);
    let mut run_log =
        RunLog::create(directory, &started_at).map_err(|source| RunError::RunLogCreate {
            directory: directory.display().to_string(),
            source,
        })?;
    let run_log_path = run_log.path().map(Path::to_path_buf);

    let guard = match ConfigGuard::begin(wallet, &request.keypair).await {
        Ok(guard) => guard,
        Err(GuardError::Swap {
            batch_keypair,
            source,
            restoration: Restoration::Failed { prior, error },
        }) => {
            tracing::error!(error = %source, "Unable to switch to the batch keypair");
            return Err(RunError::Inconsistent {
                prior,
                batch_keypair,
                source: error,
            });
        }
        Err(e) => return Err(RunError::Configuration(e)),
    };

    let outcome = run_transfers(&records, wallet, &mut run_log).await;

    let restoration = guard.end().await;

    if let Err(e) = run_log.close() {
        tracing::warn!(error = %e, "Unable to flush run log");
    }

    let summary = match outcome {
        Ok(summary) => summary,
        Err(TransferAbort::RunLog(e)) => {
            tracing::error!(error = %e, "Run log write failed, remaining records not attempted");
            RunError::inconsistent(restoration, &request.keypair)?;
            return Err(RunError::RunLogWrite(e));
        }
        Err(TransferAbort::Timeout {
            recipient,
            line,
            source,
        }) => {
            tracing::error!(
                recipient = %recipient,
                line,
                "Check this recipient's balance before re-driving the batch"
            );
            RunError::inconsistent(restoration, &request.keypair)?;
            return Err(RunError::TransferTimeout {
                recipient,
                line,
                source,
            });
        }
    };
    let restoration = RunError::inconsistent(restoration, &request.keypair)?;

    tracing::info!(
        attempted = summary.attempted,
        succeeded = summary.succeeded,
        skipped = summary.skipped,
        rejected = summary.rejected,
        failed = summary.failed,
        "Batch complete"
    );
    if summary.logged() > 0 {
        if let Some(path) = &run_log_path {
            tracing::warn!(
                recipients = summary.logged(),
                path = %path.display(),
                "Some recipients were not paid; see run log"
            );
        }
    }

    Ok(RunReport {
        public_key,
        summary,
        restoration,
        run_log: run_log_path,
    })
}
