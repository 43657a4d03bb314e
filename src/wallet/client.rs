//! Typed wrapper around the wallet command-line tools.
//!
//! # Responsibilities
//! - Build the argument vector for every wallet operation the batch needs
//! - Parse the configuration query output
//! - Expose token transfers to the transfer loop

use std::path::Path;

use crate::batch::transfer::TokenTransfer;
use crate::batch::types::Transfer;
use crate::config::WalletConfig;
use crate::wallet::runner::{CommandRunner, ProcessRunner};
use crate::wallet::types::{Invocation, WalletResult};

/// Label of the active keypair line in `config get` output.
pub const KEYPAIR_PATH_LABEL: &str = "Keypair Path";

/// Wallet tool client.
#[derive(Debug, Clone)]
pub struct Wallet<R = ProcessRunner> {
    runner: R,
    config: WalletConfig,
}

impl Wallet<ProcessRunner> {
    /// Client that spawns the configured programs.
    pub fn from_config(config: WalletConfig) -> Self {
        let runner = ProcessRunner::new(config.timeout_secs);
        Self::new(runner, config)
    }
}

impl<R: CommandRunner> Wallet<R> {
    pub fn new(runner: R, config: WalletConfig) -> Self {
        Self { runner, config }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Check that the wallet CLI can be launched; returns its version line.
    pub async fn version(&self) -> WalletResult<String> {
        self.runner
            .run(&Invocation::new(&self.config.cli).arg("--version"))
            .await
    }

    /// Resolve the public key of a keypair file.
    pub async fn public_key(&self, keypair: &Path) -> WalletResult<String> {
        self.runner
            .run(&Invocation::new(&self.config.keygen).arg("pubkey").arg(keypair))
            .await
    }

    /// Currently configured keypair path, `None` when unset.
    pub async fn keypair_path(&self) -> WalletResult<Option<String>> {
        let output = self
            .runner
            .run(&Invocation::new(&self.config.cli).arg("config").arg("get"))
            .await?;
        Ok(parse_keypair_path(&output))
    }

    /// Point the wallet configuration at `keypair`.
    pub async fn set_keypair_path(&self, keypair: impl AsRef<std::ffi::OsStr>) -> WalletResult<()> {
        self.runner
            .run(
                &Invocation::new(&self.config.cli)
                    .arg("config")
                    .arg("set")
                    .arg("--keypair")
                    .arg(keypair),
            )
            .await?;
        Ok(())
    }
}

impl<R: CommandRunner> TokenTransfer for Wallet<R> {
    async fn transfer(&self, transfer: &Transfer<'_>) -> WalletResult<String> {
        self.runner
            .run(
                &Invocation::new(&self.config.token_cli)
                    .arg("transfer")
                    .arg("--fund-recipient")
                    .arg(transfer.token)
                    .arg(transfer.amount)
                    .arg(transfer.recipient),
            )
            .await
    }
}

/// Extract the `Keypair Path` value from `config get` output.
///
/// Each line is `Label: value`; only the first colon separates the two.
pub fn parse_keypair_path(output: &str) -> Option<String> {
    output
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(label, _)| label.trim() == KEYPAIR_PATH_LABEL)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
