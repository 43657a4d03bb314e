//! Batch subsystem.
//!
//! # Data Flow
//! ```text
//! batch CSV
//!     → reader.rs (header dropped, raw positional records)
//!     → types.rs (per-record check: blank / malformed / foreign / send)
//!     → transfer.rs (one TokenTransfer call per sendable record)
//!     → RunSummary + run log lines
//! ```
//!
//! # Design Decisions
//! - The reader never filters; records keep their line for attribution
//! - Validation is a pure function of the record
//! - The `0x` address check is a heuristic and deliberately the only one

pub mod reader;
pub mod transfer;
pub mod types;

pub use transfer::{run_transfers, TokenTransfer, TransferAbort};
pub use types::{BatchError, RunSummary, Transfer, TransferRecord};
