//! SPL Batch Transfer
//!
//! Pays many recipients different SPL token amounts in one unattended run.
//!
//! # Architecture Overview
//!
//! ```text
//!   keypair.json ──┐                       ┌──────────────────────────┐
//!                  │   ┌──────────────┐    │       wallet tools        │
//!   batch.csv ─────┼──▶│  lifecycle   │───▶│ solana / solana-keygen /  │
//!                  │   │   startup    │    │        spl-token          │
//!   config.toml ───┘   └──────┬───────┘    └──────────────────────────┘
//!                             │                       ▲
//!             ┌───────────────┼────────────────┐      │
//!             ▼               ▼                ▼      │
//!        ┌─────────┐   ┌─────────────┐   ┌──────────┐ │
//!        │  batch  │   │    guard    │   │ transfer │─┘
//!        │ reader  │   │ swap/restore│   │   loop   │
//!        └─────────┘   └─────────────┘   └────┬─────┘
//!                                             ▼
//!                                    transfer <date>.log
//! ```

use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use spl_batch_transfer::cli::{exit_for, Cli, PathsError};
use spl_batch_transfer::config::{load_config, BatchConfig};
use spl_batch_transfer::lifecycle::startup::{self, EXIT_IO, EXIT_OK};
use spl_batch_transfer::observability::logging;
use spl_batch_transfer::Wallet;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(exit_for(&e));
        }
    };

    let request = match cli.paths().resolve(&mut io::stdin().lock(), &mut io::stdout()) {
        Ok(request) => request,
        Err(e) => {
            match e {
                PathsError::Partial => eprintln!("{}", Cli::command().render_help()),
                PathsError::Prompt => eprintln!("ERROR: {e}"),
            }
            return ExitCode::from(e.exit_code());
        }
    };

    let loaded = match &cli.config {
        Some(path) => load_config(path),
        None => Ok(BatchConfig::default()),
    };
    let level = loaded
        .as_ref()
        .map(|c| c.observability.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    logging::init(&level);

    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(
                path = %cli.config.as_deref().unwrap_or(Path::new("")).display(),
                error = %e,
                "Unable to load configuration"
            );
            return ExitCode::from(EXIT_IO);
        }
    };
    if let Some(dir) = &cli.log_dir {
        config.run_log.directory = dir.display().to_string();
    }

    tracing::info!("spl-batch-transfer v{} starting", env!("CARGO_PKG_VERSION"));

    let wallet = Wallet::from_config(config.wallet.clone());
    match startup::run(&wallet, &request, &config).await {
        Ok(_) => ExitCode::from(EXIT_OK),
        Err(e) => {
            tracing::error!(error = %e, "Batch aborted");
            ExitCode::from(e.exit_code())
        }
    }
}
