//! Scoped substitution of the wallet's active keypair.
//!
//! # Lifecycle
//! ```text
//! begin: config get → remember prior Keypair Path → config set --keypair <batch>
//! end:   config set --keypair <prior>   (skipped when there was no prior path)
//! ```
//!
//! `end` must be called on every path that follows a successful `begin`.
//! If the swap itself fails, `begin` restores the prior path before
//! returning, since the tool may have persisted the change anyway.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::wallet::{CommandRunner, Wallet, WalletError};

/// Outcome of putting the operator's keypair path back.
#[derive(Debug)]
pub enum Restoration {
    /// The prior path was set again.
    Restored(String),
    /// No path was configured before the run.
    NothingToRestore,
    /// The wallet tool refused the restoring `config set`.
    Failed { prior: String, error: WalletError },
}

impl Restoration {
    pub fn is_failed(&self) -> bool {
        matches!(self, Restoration::Failed { .. })
    }
}

/// Errors raised while acquiring the batch keypair configuration.
#[derive(Debug, Error)]
pub enum GuardError {
    /// `config get` failed; nothing was changed.
    #[error("unable to read wallet configuration: {0}")]
    Snapshot(#[source] WalletError),

    /// `config set` for the batch keypair failed.
    #[error("unable to set wallet keypair path to {batch_keypair}: {source}")]
    Swap {
        batch_keypair: String,
        #[source]
        source: WalletError,
        restoration: Restoration,
    },
}

/// Holds the wallet on the batch keypair until [`ConfigGuard::end`].
#[must_use = "the prior keypair path is only restored by ConfigGuard::end"]
pub struct ConfigGuard<'w, R: CommandRunner> {
    wallet: &'w Wallet<R>,
    prior: Option<String>,
    batch_keypair: PathBuf,
    ended: bool,
}

impl<'w, R: CommandRunner> ConfigGuard<'w, R> {
    /// Snapshot the current keypair path and switch to `batch_keypair`.
    pub async fn begin(wallet: &'w Wallet<R>, batch_keypair: &Path) -> Result<Self, GuardError> {
        let prior = wallet.keypair_path().await.map_err(GuardError::Snapshot)?;

        match &prior {
            Some(path) => tracing::info!(keypair_path = %path, "Preserving keypair path"),
            None => tracing::info!(
                keypair_path = %batch_keypair.display(),
                "No keypair path found, setting keypair path"
            ),
        }

        let mut guard = Self {
            wallet,
            prior,
            batch_keypair: batch_keypair.to_path_buf(),
            ended: false,
        };

        if let Err(source) = wallet.set_keypair_path(batch_keypair).await {
            let restoration = guard.restore(false).await;
            return Err(GuardError::Swap {
                batch_keypair: batch_keypair.display().to_string(),
                source,
                restoration,
            });
        }

        Ok(guard)
    }

    /// Keypair path configured before the run, if any.
    pub fn prior(&self) -> Option<&str> {
        self.prior.as_deref()
    }

    /// Restore the prior keypair path.
    pub async fn end(mut self) -> Restoration {
        self.restore(true).await
    }

    /// `swapped` is false when the batch keypair may never have been applied.
    async fn restore(&mut self, swapped: bool) -> Restoration {
        self.ended = true;

        let Some(prior) = self.prior.clone() else {
            if swapped {
                tracing::info!(
                    keypair_path = %self.batch_keypair.display(),
                    "No prior keypair path to restore; configuration left on batch keypair"
                );
            } else {
                tracing::info!(
                    "Batch keypair was not applied and there is no prior keypair path to restore"
                );
            }
            return Restoration::NothingToRestore;
        };

        match self.wallet.set_keypair_path(&prior).await {
            Ok(()) => {
                tracing::info!(keypair_path = %prior, "Restored original keypair path configuration");
                Restoration::Restored(prior)
            }
            Err(error) => {
                tracing::error!(
                    expected = %prior,
                    current = %self.batch_keypair.display(),
                    error = %error,
                    "UNABLE TO RESTORE KEYPAIR PATH: wallet configuration still points at the batch keypair"
                );
                Restoration::Failed { prior, error }
            }
        }
    }
}

impl<R: CommandRunner> Drop for ConfigGuard<'_, R> {
    fn drop(&mut self) {
        if !self.ended {
            tracing::error!(
                batch_keypair = %self.batch_keypair.display(),
                prior = ?self.prior,
                "Configuration guard dropped without restoring the keypair path"
            );
        }
    }
}
