use crate::domain::models::LoggingConfig;

/// Subscriber settings derived from the validated [`LoggingConfig`]
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl From<&LoggingConfig> for LogConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            level: config.level.clone(),
            format: if config.format == "json" {
                LogFormat::Json
            } else {
                LogFormat::Pretty
            },
        }
    }
}
