//! Command line interface: argument parsing, test execution and reporting.

pub mod args;
pub mod output;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::adapters::{build_client, InfluxdbClient, KapacitorClient};
use crate::domain::models::Config;
use crate::services::{load_tests_from_file_system, RunSummary, TestRunner};

pub use args::Cli;

/// Load every declared test and run them in order, printing each outcome.
pub async fn execute(config: &Config) -> Result<RunSummary> {
    let http = build_client(config.request_timeout_secs.map(Duration::from_secs))?;
    let kapacitor = KapacitorClient::new(&config.kapacitor_host, http.clone());
    let influxdb = InfluxdbClient::new(&config.influxdb_host, http);

    let mut tests = load_tests_from_file_system(
        Path::new(&config.tests_path),
        Path::new(&config.scripts_dir),
    )
    .context("Error loading test configurations")?;

    let runner = TestRunner::new(Arc::new(kapacitor), Arc::new(influxdb));
    let mut summary = RunSummary::default();
    for test in &mut tests {
        let outcome = runner.run_one(test.as_mut()).await;
        println!("{}", output::render_outcome(&outcome));
        summary.outcomes.push(outcome);
    }
    println!("{}", output::render_summary(&summary));
    Ok(summary)
}

/// Print an error and exit with a non-zero status.
pub fn handle_error(err: &anyhow::Error) -> ! {
    eprintln!("{} {err:#}", console::style("ERROR:").red().bold());
    std::process::exit(1);
}
