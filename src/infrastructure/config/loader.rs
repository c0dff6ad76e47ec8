use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Path for tests definitions (--tests) must be defined")]
    MissingTestsPath,

    #[error("Path for where TICKscripts directory (--dir) must be defined")]
    MissingScriptsDir,

    #[error("Invalid {service} host: {host}. Must be an http:// or https:// URL")]
    InvalidHost { service: &'static str, host: String },

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid request_timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),
}

/// Values given on the command line; unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub influxdb_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kapacitor_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tests_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scripts_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingOverrides>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. The YAML config file, when one is given
    /// 3. Environment variables (`KAPACITOR_UNIT_*` prefix, `__` separates nesting)
    /// 4. Command line flags
    pub fn load(overrides: &ConfigOverrides, config_file: Option<&Path>) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if let Some(path) = config_file {
            figment = figment.merge(Yaml::file(path));
        }
        let config: Config = figment
            .merge(Env::prefixed("KAPACITOR_UNIT_").split("__"))
            .merge(Serialized::defaults(overrides))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.tests_path.is_empty() {
            return Err(ConfigError::MissingTestsPath);
        }
        if config.scripts_dir.is_empty() {
            return Err(ConfigError::MissingScriptsDir);
        }

        for (service, host) in [
            ("InfluxDB", &config.influxdb_host),
            ("Kapacitor", &config.kapacitor_host),
        ] {
            if !(host.starts_with("http://") || host.starts_with("https://")) {
                return Err(ConfigError::InvalidHost {
                    service,
                    host: host.clone(),
                });
            }
        }

        if config.request_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidTimeout(0));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
