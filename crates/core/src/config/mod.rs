//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (LMU_RACES_*)
//! 2. TOML config file (if LMU_RACES_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use chrono_tz::Tz;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

mod validation;

pub use validation::ConfigError;

/// Eviction sweeps run on this wall-clock grid.
pub const EVICTION_PERIOD: Duration = Duration::from_secs(10 * 60);

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (LMU_RACES_*)
/// 2. TOML config file (if LMU_RACES_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Page listing the scheduled races.
    ///
    /// Set via LMU_RACES_SOURCE_URL environment variable.
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// Seconds between two refresh cycles.
    ///
    /// Set via LMU_RACES_REFRESH_INTERVAL_SECS environment variable.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// IANA timezone the page's start times are written in.
    ///
    /// Set via LMU_RACES_TIMEZONE environment variable.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via LMU_RACES_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via LMU_RACES_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum bytes to fetch per request.
    ///
    /// Set via LMU_RACES_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

fn default_source_url() -> String {
    "https://www.racecontrol.gg".into()
}

fn default_refresh_interval_secs() -> u64 {
    3_600
}

fn default_timezone() -> String {
    "Europe/Rome".into()
}

fn default_user_agent() -> String {
    "lmu-races/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            refresh_interval_secs: default_refresh_interval_secs(),
            timezone: default_timezone(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Refresh interval as Duration for the refresh scheduler.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Parsed source page URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the URL does not parse or is not http(s).
    pub fn source_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(self.source_url.trim())
            .map_err(|e| ConfigError::Invalid { field: "source_url".into(), reason: e.to_string() })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(ConfigError::Invalid {
                field: "source_url".into(),
                reason: format!("unsupported scheme: {scheme}"),
            }),
        }
    }

    /// Parsed source timezone.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the name is not a known IANA zone.
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.timezone.parse::<Tz>().map_err(|_| ConfigError::Invalid {
            field: "timezone".into(),
            reason: format!("unknown zone {:?}", self.timezone),
        })
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `LMU_RACES_`
    /// 2. TOML file from `LMU_RACES_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("LMU_RACES_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("LMU_RACES_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
