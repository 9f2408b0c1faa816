//! Xenophon - shell history recorder
//!
//! This is the main entry point for the Xenophon command-line application.
//! It loads the configuration, sets up logging and runs the requested
//! command, turning any failure into a non-zero exit.

use clap::Parser;
use std::process;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use xenophon::cli::{self, Cli};
use xenophon::config::Config;
use xenophon::error::Result;

fn main() {
    let cli = Cli::parse();

    // Logging is not set up until the configuration is known
    let (config, created) = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // RUST_LOG wins over the flags and the configured level
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(cli.log_level(&config)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if created {
        info!("created config file at {}", cli.config_path().unwrap_or_default().display());
    }

    if let Err(e) = cli::run(&cli, config) {
        error!(
            category = e.category(),
            recoverable = e.is_recoverable(),
            "{}",
            e
        );
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<(Config, bool)> {
    let path = cli.config_path()?;
    Config::load_or_create(&path)
}
