//! Command-line interface module for Xenophon
//!
//! This module is organized into submodules:
//! - `args`: Command-line argument structures
//! - `handlers`: Command handler implementations

mod args;
mod handlers;

pub use args::*;
use handlers::*;

use crate::config::Config;
use crate::error::Result;
use crate::history::HistoryManager;
use crate::provider::FixedLocation;
use crate::storage::EngineKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Xenophon - a drop-in replacement for your shell history
#[derive(Parser)]
#[command(name = "xenophon")]
#[command(about = "Stores your shell history in a datastore with pluggable backends")]
#[command(version, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Insert a command into history
    Insert(InsertArgs),
    /// List command history for the current directory
    List(ListArgs),
    /// Show the most recent commands
    Last(LastArgs),
    /// Show commands recorded within a time window
    Period(PeriodArgs),
    /// Show configuration
    Config(ConfigArgs),
}

impl Cli {
    /// Resolve the configuration file this invocation uses
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::default_config_path(),
        }
    }

    /// Log level used when `RUST_LOG` is not set
    pub fn log_level<'a>(&self, config: &'a Config) -> &'a str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            &config.logging.level
        }
    }
}

/// Main CLI application
pub struct CliApp {
    pub config: Config,
    pub config_path: PathBuf,
    pub history: HistoryManager,
    pub verbose: bool,
    pub quiet: bool,
}

impl CliApp {
    /// Create a new CLI application
    pub fn new(cli: &Cli, config: Config) -> Result<Self> {
        let engine_kind = config.engine_kind().unwrap_or_else(|_| {
            warn!(
                "Unknown engine {}, defaulting to {}",
                config.storage_engine,
                EngineKind::Sqlite3
            );
            EngineKind::Sqlite3
        });

        if config.uses_fallback_home() {
            warn!(
                "No home directory found, history is kept in shared directory {}",
                config.database_path.display()
            );
        }

        debug!(
            engine = %engine_kind,
            path = %config.database_path.display(),
            "opening history store"
        );
        let engine = engine_kind.open(&config.database_path)?;
        let mut history = HistoryManager::new(engine);

        if let Commands::Insert(args) = &cli.command {
            if let Some(directory) = &args.directory {
                history = history.with_location(FixedLocation::new(directory.clone()));
            }
        }

        Ok(Self {
            config,
            config_path: cli.config_path()?,
            history,
            verbose: cli.verbose,
            quiet: cli.quiet,
        })
    }

    /// Run the CLI application
    pub fn run(&mut self, command: &Commands) -> Result<()> {
        match command {
            Commands::Insert(args) => handle_insert(self, args),
            Commands::List(args) => handle_list(self, args),
            Commands::Last(args) => handle_last(self, args),
            Commands::Period(args) => handle_period(self, args),
            Commands::Config(args) => handle_config(self, args),
        }
    }

    /// Release the history store
    pub fn close(self) -> Result<()> {
        self.history.close()
    }

    pub fn verbose_println(&self, message: &str) {
        if self.verbose && !self.quiet {
            eprintln!("[verbose] {}", message);
        }
    }
}

/// Run `cli` against an already loaded configuration
///
/// The store is closed once the command finishes, whether or not it
/// succeeded.
pub fn run(cli: &Cli, config: Config) -> Result<()> {
    let mut app = CliApp::new(cli, config)?;
    let result = app.run(&cli.command);
    let closed = app.close();
    result.and(closed)
}
