//! Range and format checks run after all configuration layers are merged.
//!
//! Each section reports the first offending key as a dotted path such as
//! `database.min_connections`, matching the environment override
//! `VIDNOTE_DATABASE__MIN_CONNECTIONS`.

use crate::config::error::ConfigError;
use crate::config::settings::{
    DatabaseConfig, FileSettings, JwtConfig, LoggerSettings, ServerConfig, Settings,
};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const LOG_FORMATS: &[&str] = &["full", "compact", "json"];

const POSTGRES_SCHEMES: &[&str] = &["postgres://", "postgresql://"];

/// HS256 keys shorter than this are rejected
const MIN_JWT_SECRET_LEN: usize = 32;

fn ensure(ok: bool, field: &str, message: impl Into<String>) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        })
    }
}

fn one_of(value: &str, allowed: &[&str]) -> bool {
    allowed.contains(&value.to_ascii_lowercase().as_str())
}

impl ServerConfig {
    /// Port and request timeout must be non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.port != 0, "server.port", "Port must be between 1 and 65535")?;
        ensure(
            self.request_timeout > 0,
            "server.request_timeout",
            "Request timeout must be greater than 0 seconds",
        )
    }
}

impl DatabaseConfig {
    /// Requires a PostgreSQL URL and a pool whose bounds make sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            !self.url.is_empty(),
            "database.url",
            "Database URL is required; set VIDNOTE_DATABASE__URL",
        )?;
        ensure(
            POSTGRES_SCHEMES.iter().any(|s| self.url.starts_with(s)),
            "database.url",
            "Expected postgres://[user:password@]host[:port]/database",
        )?;
        ensure(
            self.max_connections > 0,
            "database.max_connections",
            "Max connections must be greater than 0",
        )?;
        ensure(
            self.min_connections > 0,
            "database.min_connections",
            "Min connections must be greater than 0",
        )?;
        ensure(
            self.min_connections <= self.max_connections,
            "database.min_connections",
            format!(
                "Min connections ({}) cannot exceed max connections ({})",
                self.min_connections, self.max_connections
            ),
        )?;
        ensure(
            self.connection_timeout > 0,
            "database.connection_timeout",
            "Connection timeout must be greater than 0 seconds",
        )
    }
}

impl JwtConfig {
    /// Only the server signs tokens, so this runs on `serve` rather than
    /// as part of [`Settings::validate`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            !self.secret.is_empty(),
            "jwt.secret",
            "JWT secret cannot be empty; set VIDNOTE_JWT__SECRET",
        )?;
        ensure(
            self.secret.len() >= MIN_JWT_SECRET_LEN,
            "jwt.secret",
            format!("JWT secret must be at least {MIN_JWT_SECRET_LEN} characters"),
        )?;
        ensure(
            self.access_token_expiration > 0,
            "jwt.access_token_expiration",
            "Access token expiration must be positive",
        )
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            !self.enabled || !self.path.trim().is_empty(),
            "logger.file.path",
            "File path is required when file logging is enabled",
        )?;
        ensure(
            one_of(&self.format, LOG_FORMATS),
            "logger.file.format",
            format!(
                "Invalid log format '{}', expected one of: {}",
                self.format,
                LOG_FORMATS.join(", ")
            ),
        )
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            one_of(&self.level, LOG_LEVELS),
            "logger.level",
            format!(
                "Invalid log level '{}', expected one of: {}",
                self.level,
                LOG_LEVELS.join(", ")
            ),
        )?;
        ensure(
            self.console.enabled || self.file.enabled,
            "logger",
            "At least one output (console or file) must be enabled",
        )?;
        self.file.validate()
    }
}

impl Settings {
    /// Checks server, database and logger; stops at the first failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.logger.validate()
    }
}
