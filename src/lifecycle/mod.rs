//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Install check → Parse batch → Resolve public key → Open run log
//!     → guard.rs begin (snapshot + swap keypair path)
//!     → Transfer loop
//!     → guard.rs end (restore keypair path) → Close run log → Summary
//! ```
//!
//! # Design Decisions
//! - Ordered startup: nothing external is modified before the swap
//! - The wallet configuration is a scoped resource: every path after a
//!   successful swap goes through `ConfigGuard::end`
//! - A restoration failure is escalated, never swallowed

pub mod guard;
pub mod startup;

pub use guard::{ConfigGuard, GuardError, Restoration};
pub use startup::{run, BatchRequest, RunError, RunReport};
