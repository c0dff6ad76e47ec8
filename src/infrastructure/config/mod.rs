//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading
//! - Environment variable overrides
//! - Command line overrides
//! - Configuration validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, ConfigOverrides, LoggingOverrides};
