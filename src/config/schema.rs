//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a batch run.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the batch transfer tool.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BatchConfig {
    /// Wallet tool programs and invocation limits.
    pub wallet: WalletConfig,

    /// Where the per-run audit file is written.
    pub run_log: RunLogConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Wallet tool configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Wallet CLI used for the install check and keypair configuration.
    pub cli: String,

    /// Key tool used to resolve the batch keypair's public key.
    pub keygen: String,

    /// Token CLI used to perform transfers.
    pub token_cli: String,

    /// Upper bound on a single wallet tool invocation in seconds (0 = wait forever).
    pub timeout_secs: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            cli: "solana".to_string(),
            keygen: "solana-keygen".to_string(),
            token_cli: "spl-token".to_string(),
            timeout_secs: 0,
        }
    }
}

/// Run log configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RunLogConfig {
    /// Directory the run log file is created in.
    pub directory: String,
}

impl Default for RunLogConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
