use serde::{Deserialize, Serialize};

/// Main configuration structure for kapacitor-unit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// InfluxDB base URL
    #[serde(default = "default_influxdb_host")]
    pub influxdb_host: String,

    /// Kapacitor base URL
    #[serde(default = "default_kapacitor_host")]
    pub kapacitor_host: String,

    /// Test definitions: a YAML file or a directory of YAML files
    #[serde(default)]
    pub tests_path: String,

    /// Directory holding the TICKscripts
    #[serde(default)]
    pub scripts_dir: String,

    /// Per-request HTTP timeout in seconds; unset leaves requests unbounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_influxdb_host() -> String {
    "http://localhost:8086".to_string()
}

fn default_kapacitor_host() -> String {
    "http://localhost:9092".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            influxdb_host: default_influxdb_host(),
            kapacitor_host: default_kapacitor_host(),
            tests_path: String::new(),
            scripts_dir: String::new(),
            request_timeout_secs: None,
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
