//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `source_url` is not an http(s) URL
    /// - `refresh_interval_secs` is below one minute or above one week
    /// - `timezone` is not a known IANA zone
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.source_url()?;
        self.timezone()?;

        if self.refresh_interval_secs < 60 {
            return Err(ConfigError::Invalid {
                field: "refresh_interval_secs".into(),
                reason: "must be at least 60 seconds".into(),
            });
        }
        if self.refresh_interval_secs > 7 * 24 * 3_600 {
            return Err(ConfigError::Invalid {
                field: "refresh_interval_secs".into(),
                reason: "must not exceed 7 days (604800s)".into(),
            });
        }

        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must be greater than 0".into() });
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must not exceed 50MB".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.timeout() >= self.refresh_interval() {
            tracing::warn!(
                timeout_ms = self.timeout_ms,
                refresh_interval_secs = self.refresh_interval_secs,
                "request timeout is not shorter than the refresh interval; slow fetches will delay later cycles"
            );
        }

        Ok(())
    }
}
