//! SPL token batch transfer library.
//!
//! Drives the Solana wallet tools once per recipient in a CSV batch while
//! the operator's keypair configuration is temporarily switched to the
//! batch keypair.

pub mod batch;
pub mod cli;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod wallet;

pub use config::BatchConfig;
pub use lifecycle::{BatchRequest, RunError, RunReport};
pub use wallet::Wallet;
