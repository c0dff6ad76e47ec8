//! kapacitor-unit CLI entry point.

use clap::Parser;

use kapacitor_unit::cli::{self, output, Cli};
use kapacitor_unit::infrastructure::config::ConfigLoader;
use kapacitor_unit::infrastructure::logging::{init_logging, LogConfig};

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    println!("{}", output::render_welcome());

    let config = match ConfigLoader::load(&args.overrides(), args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => cli::handle_error(&err),
    };
    if let Err(err) = init_logging(&LogConfig::from(&config.logging)) {
        cli::handle_error(&err);
    }

    match cli::execute(&config).await {
        Ok(summary) if summary.all_passed() => {}
        Ok(_) => std::process::exit(1),
        Err(err) => cli::handle_error(&err),
    }
}
