//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use spl_batch_transfer::config::{BatchConfig, WalletConfig};
use spl_batch_transfer::wallet::{CommandRunner, Invocation, WalletError, WalletResult};
use spl_batch_transfer::{BatchRequest, Wallet};

pub const OPERATOR_KEYPAIR: &str = "/home/op/.config/solana/id.json";
pub const BATCH_KEYPAIR: &str = "/home/op/payouts/batch.json";
pub const BATCH_PUBKEY: &str = "BatchPayer1111111111111111111111111111111111";

#[derive(Default)]
struct State {
    missing_cli: bool,
    keypair_path: Option<String>,
    failing_recipients: Vec<String>,
    timing_out_recipients: Vec<String>,
    failing_config_get: bool,
    failing_set_to: Vec<String>,
    crash_after_swap: bool,
    crashed: bool,
    calls: Vec<Invocation>,
}

/// In-memory stand-in for the Solana CLI tools.
///
/// Keeps a single keypair path setting, records every invocation, and
/// fails on request the way the real tools do: by writing to stderr.
#[derive(Default)]
pub struct ScriptedRunner {
    state: Mutex<State>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keypair_path(self, path: &str) -> Self {
        self.state.lock().unwrap().keypair_path = Some(path.to_string());
        self
    }

    pub fn without_wallet_cli(self) -> Self {
        self.state.lock().unwrap().missing_cli = true;
        self
    }

    pub fn failing_transfer_to(self, recipient: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_recipients
            .push(recipient.to_string());
        self
    }

    /// Transfers to `recipient` hit the wallet deadline.
    pub fn timing_out_transfer_to(self, recipient: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .timing_out_recipients
            .push(recipient.to_string());
        self
    }

    pub fn failing_config_get(self) -> Self {
        self.state.lock().unwrap().failing_config_get = true;
        self
    }

    pub fn failing_set_to(self, path: &str) -> Self {
        self.state.lock().unwrap().failing_set_to.push(path.to_string());
        self
    }

    /// Every invocation after the first successful `config set` fails.
    pub fn crashing_after_swap(self) -> Self {
        self.state.lock().unwrap().crash_after_swap = true;
        self
    }

    /// Current keypair path setting.
    pub fn keypair_path(&self) -> Option<String> {
        self.state.lock().unwrap().keypair_path.clone()
    }

    /// Every invocation as a command line.
    pub fn calls(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Arguments of every `spl-token` invocation.
    pub fn transfers(&self) -> Vec<Vec<String>> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.program == "spl-token")
            .map(Invocation::args_lossy)
            .collect()
    }

    /// Target paths of every `config set --keypair` invocation.
    pub fn keypair_sets(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .map(Invocation::args_lossy)
            .filter(|args| args.len() == 4 && args[..3] == ["config", "set", "--keypair"])
            .map(|args| args[3].clone())
            .collect()
    }

    fn config_output(keypair_path: &Option<String>) -> String {
        format!(
            "Config File: /home/op/.config/solana/cli/config.yml\n\
             RPC URL: https://api.devnet.solana.com\n\
             WebSocket URL: wss://api.devnet.solana.com/ (computed)\n\
             Keypair Path: {}\n\
             Commitment: confirmed",
            keypair_path.as_deref().unwrap_or("")
        )
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, invocation: &Invocation) -> WalletResult<String> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(invocation.clone());

        if state.crashed {
            return Err(WalletError::ExternalTool(
                "thread 'main' panicked at 'called `Result::unwrap()`'".into(),
            ));
        }

        let args = invocation.args_lossy();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        match (invocation.program.as_str(), args.as_slice()) {
            ("solana", _) if state.missing_cli => Err(WalletError::ToolNotFound {
                program: "solana".into(),
            }),
            ("solana", ["--version"]) => Ok("solana-cli 1.18.26 (src:d9f20e95; feat:3241752014, client:SolanaLabs)".into()),
            ("solana-keygen", ["pubkey", _]) => Ok(BATCH_PUBKEY.into()),
            ("solana", ["config", "get"]) => {
                if state.failing_config_get {
                    Err(WalletError::ExternalTool("Error: config file is corrupt".into()))
                } else {
                    Ok(Self::config_output(&state.keypair_path))
                }
            }
            ("solana", ["config", "set", "--keypair", path]) => {
                if state.failing_set_to.iter().any(|p| p == path) {
                    return Err(WalletError::ExternalTool(format!(
                        "Error: Permission denied writing config for {path}"
                    )));
                }
                state.keypair_path = Some(path.to_string());
                if state.crash_after_swap {
                    state.crashed = true;
                }
                Ok(Self::config_output(&state.keypair_path))
            }
            ("spl-token", ["transfer", "--fund-recipient", _token, amount, recipient]) => {
                if state.timing_out_recipients.iter().any(|r| r == recipient) {
                    Err(WalletError::Timeout {
                        program: "spl-token".into(),
                        secs: 30,
                    })
                } else if state.failing_recipients.iter().any(|r| r == recipient) {
                    Err(WalletError::ExternalTool(format!(
                        "Error: Recipient {recipient} is not a valid system account"
                    )))
                } else {
                    Ok(format!("Transfer {amount} tokens\n  Recipient: {recipient}\nSignature: 3xS"))
                }
            }
            _ => Err(WalletError::ExternalTool(format!(
                "unexpected invocation: {invocation}"
            ))),
        }
    }
}

/// Wallet over a scripted runner with the default program names.
pub fn wallet(runner: ScriptedRunner) -> Wallet<ScriptedRunner> {
    Wallet::new(runner, WalletConfig::default())
}

/// Batch file and run log directory for one test.
pub struct Workspace {
    pub dir: tempfile::TempDir,
}

impl Workspace {
    pub fn with_batch(csv: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("batch.csv"), csv).unwrap();
        Self { dir }
    }

    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn request(&self) -> BatchRequest {
        BatchRequest {
            keypair: PathBuf::from(BATCH_KEYPAIR),
            batch: self.dir.path().join("batch.csv"),
        }
    }

    pub fn config(&self) -> BatchConfig {
        let mut config = BatchConfig::default();
        config.run_log.directory = self.dir.path().display().to_string();
        config
    }

    /// Run log files written into the workspace.
    pub fn run_logs(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| is_run_log(p))
            .collect()
    }
}

fn is_run_log(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("transfer ") && n.ends_with(".log"))
}
