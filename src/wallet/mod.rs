//! Wallet tool integration subsystem.
//!
//! # Data Flow
//! ```text
//! Batch operation (version check, pubkey, config get/set, transfer)
//!     → client.rs (argument vector for the right program)
//!     → runner.rs (spawn, capture, stderr check, deadline)
//!     → trimmed stdout or WalletError
//! ```
//!
//! # Security Constraints
//! - Never invoke through a shell; batch fields are passed as argv entries
//! - The keypair file is passed by path only, never read
//! - Every invocation is awaited before the next one starts, since the
//!   wallet configuration is shared by all invocations on the host

pub mod client;
pub mod runner;
pub mod types;

pub use client::Wallet;
pub use runner::{CommandRunner, ProcessRunner};
pub use types::{Invocation, WalletError, WalletResult};
