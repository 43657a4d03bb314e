//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, per-run span with run_id)
//!
//! Transfer loop produces:
//!     → run_log.rs (one recipient per rejected or failed record)
//!
//! Consumers:
//!     → Operator terminal (stderr/stdout via tracing-subscriber)
//!     → Follow-up batches (run log file)
//! ```
//!
//! # Design Decisions
//! - Progress goes to the tracing subscriber, never to the run log
//! - The run log holds addresses only, so it can seed a retry batch

pub mod logging;
pub mod run_log;

pub use run_log::RunLog;
