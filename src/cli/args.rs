//! CLI argument definitions

use std::path::PathBuf;

use clap::Parser;

use crate::infrastructure::config::{ConfigOverrides, LoggingOverrides};

#[derive(Parser, Debug)]
#[command(name = "kapacitor-unit")]
#[command(about = "The unit test framework for TICK scripts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// InfluxDB host
    #[arg(long = "influxdb", env = "KAPACITOR_UNIT_INFLUXDB_HOST")]
    pub influxdb_host: Option<String>,

    /// Kapacitor host
    #[arg(long = "kapacitor", env = "KAPACITOR_UNIT_KAPACITOR_HOST")]
    pub kapacitor_host: Option<String>,

    /// Tests definition file, or a directory of them
    #[arg(long = "tests")]
    pub tests_path: Option<PathBuf>,

    /// TICKscripts directory
    #[arg(long = "dir")]
    pub scripts_dir: Option<PathBuf>,

    /// Optional YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long)]
    pub log_format: Option<String>,
}

impl Cli {
    /// Flags that override lower configuration layers.
    pub fn overrides(&self) -> ConfigOverrides {
        let logging = (self.log_level.is_some() || self.log_format.is_some()).then(|| {
            LoggingOverrides {
                level: self.log_level.clone(),
                format: self.log_format.clone(),
            }
        });
        ConfigOverrides {
            influxdb_host: self.influxdb_host.clone(),
            kapacitor_host: self.kapacitor_host.clone(),
            tests_path: self.tests_path.as_ref().map(|p| p.display().to_string()),
            scripts_dir: self.scripts_dir.as_ref().map(|p| p.display().to_string()),
            logging,
        }
    }
}
