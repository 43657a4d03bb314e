//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional --config)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → BatchConfig (validated, immutable)
//!     → borrowed by the run for its whole duration
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; a run never re-reads it
//! - All fields have defaults so running without a file is valid
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::BatchConfig;
pub use schema::ObservabilityConfig;
pub use schema::RunLogConfig;
pub use schema::WalletConfig;
