//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check program names are present (any path is fine, no shell is involved)
//! - Check the log level is one the subscriber understands
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BatchConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::BatchConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("wallet.{field} must not be empty")]
    EmptyProgram { field: &'static str },

    #[error("run_log.directory must not be empty")]
    EmptyRunLogDirectory,

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &BatchConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let programs = [
        ("cli", &config.wallet.cli),
        ("keygen", &config.wallet.keygen),
        ("token_cli", &config.wallet.token_cli),
    ];
    for (field, value) in programs {
        if value.trim().is_empty() {
            errors.push(ValidationError::EmptyProgram { field });
        }
    }

    if config.run_log.directory.trim().is_empty() {
        errors.push(ValidationError::EmptyRunLogDirectory);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
