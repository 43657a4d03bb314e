//! The transfer loop.
//!
//! Records are handled strictly one at a time, in file order. A record
//! that is blank, malformed, rejected or failed never stops the batch.
//! Two things do: losing the run log, and a transfer that outlives the
//! wallet deadline. A killed `spl-token transfer` may already have
//! broadcast its transaction, so its recipient is neither counted as
//! failed nor written out for re-driving.

use std::io::{self, Write};

use thiserror::Error;

use crate::batch::types::{RecordCheck, RunSummary, SkipReason, Transfer, TransferRecord};
use crate::observability::RunLog;
use crate::wallet::{WalletError, WalletResult};

/// Performs one token transfer with recipient-account funding.
#[allow(async_fn_in_trait)]
pub trait TokenTransfer {
    async fn transfer(&self, transfer: &Transfer<'_>) -> WalletResult<String>;
}

/// Why the loop stopped before the end of the batch.
#[derive(Debug, Error)]
pub enum TransferAbort {
    #[error("unable to write run log: {0}")]
    RunLog(#[from] io::Error),

    /// The transfer was killed at the deadline; it may or may not have landed.
    #[error("transfer to {recipient} (line {line}) timed out, its outcome is unknown: {source}")]
    Timeout {
        recipient: String,
        line: u64,
        #[source]
        source: WalletError,
    },
}

/// Run every record through `sender`, appending rejected and failed
/// recipients to `run_log`.
///
/// # Errors
/// Returns [`TransferAbort::RunLog`] if the run log cannot be written and
/// [`TransferAbort::Timeout`] if a transfer hits the wallet deadline.
/// Records after that point are not attempted.
pub async fn run_transfers<T, W>(
    records: &[TransferRecord],
    sender: &T,
    run_log: &mut RunLog<W>,
) -> Result<RunSummary, TransferAbort>
where
    T: TokenTransfer,
    W: Write,
{
    let mut summary = RunSummary::default();

    for record in records {
        let transfer = match record.check() {
            RecordCheck::Skip(SkipReason::Blank) => {
                tracing::info!(
                    line = record.line(),
                    "Encountered blank entry in batch file, continuing to next record"
                );
                summary.skipped += 1;
                continue;
            }
            RecordCheck::Skip(SkipReason::Malformed { columns }) => {
                tracing::info!(
                    line = record.line(),
                    columns,
                    "Encountered entry with fewer than 3 columns, continuing to next record"
                );
                summary.skipped += 1;
                continue;
            }
            RecordCheck::Reject { recipient } => {
                tracing::error!(
                    line = record.line(),
                    recipient,
                    "Invalid recipient wallet ID"
                );
                run_log.record(recipient)?;
                summary.rejected += 1;
                continue;
            }
            RecordCheck::Send(transfer) => transfer,
        };

        tracing::info!(
            line = record.line(),
            amount = transfer.amount,
            token = transfer.token,
            recipient = transfer.recipient,
            "Sending transfer"
        );

        summary.attempted += 1;
        match sender.transfer(&transfer).await {
            Ok(output) => {
                tracing::info!(recipient = transfer.recipient, "Transfer completed");
                tracing::debug!(output = %output, "Token CLI output");
                summary.succeeded += 1;
            }
            Err(source @ WalletError::Timeout { .. }) => {
                tracing::error!(
                    line = record.line(),
                    recipient = transfer.recipient,
                    error = %source,
                    "Transfer timed out; outcome unknown, stopping batch"
                );
                return Err(TransferAbort::Timeout {
                    recipient: transfer.recipient.to_string(),
                    line: record.line(),
                    source,
                });
            }
            Err(e) => {
                tracing::error!(
                    line = record.line(),
                    recipient = transfer.recipient,
                    error = %e,
                    "Unable to perform transfer"
                );
                run_log.record(transfer.recipient)?;
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}
