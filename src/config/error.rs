//! Errors raised while locating, reading and checking configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required TOML file does not exist.
    #[error("Configuration file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// Two environment variables that select the configuration source were
    /// both set.
    #[error("{first} and {second} cannot both be set; use {first} for layered configuration or {second} for a single file")]
    ConflictingSources {
        first: &'static str,
        second: &'static str,
    },

    /// The merged sources do not fit the `Settings` shape.
    #[error("Failed to deserialize configuration: {0}")]
    Deserialize(String),

    /// `VIDNOTE_APP_ENV` or `--env` named no known environment.
    #[error("Unknown environment '{0}', expected one of: development, test, staging, production")]
    UnknownEnvironment(String),

    /// A value was read but is out of range or malformed.
    #[error("Validation error: {field} - {message}")]
    ValidationError { field: String, message: String },

    #[error("Configuration error: {0}")]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing_file(path: impl Into<PathBuf>) -> Self {
        ConfigError::MissingFile { path: path.into() }
    }
}
