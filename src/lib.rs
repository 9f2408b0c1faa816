//! Xenophon - shell history recorder with pluggable storage engines
//!
//! This library provides functionality for:
//! - Recording commands together with their working directory and
//!   environment
//! - Storing them in memory or in SQLite behind one [`StorageEngine`] trait
//! - Querying by recency, time window and location
//! - Narrowing results through grep-style [`ResultSet::filter`] pipelines
//!
//! # Examples
//!
//! ```rust
//! use xenophon::filters::command_matches;
//! use xenophon::provider::{FixedEnvironment, FixedLocation};
//! use xenophon::{HistoryManager, MemoryStorage};
//!
//! let mut history = HistoryManager::new(Box::new(MemoryStorage::new()))
//!     .with_location(FixedLocation::new("/tmp"))
//!     .with_environment(FixedEnvironment::default());
//!
//! history.insert("cd /tmp/hello")?;
//! history.insert("vim")?;
//!
//! let cds = history.last_entries(10)?.filter(command_matches("^cd")?);
//! assert_eq!(cds.len(), 1);
//! history.close()?;
//! # Ok::<(), xenophon::Error>(())
//! ```

use std::path::Path;

pub mod cli;
pub mod config;
pub mod entry;
pub mod error;
pub mod filters;
pub mod history;
pub mod prelude;
pub mod provider;
pub mod storage;
pub mod streamer;
pub mod types;

pub use config::Config;
pub use entry::Entry;
pub use error::{Error, Result};
pub use history::HistoryManager;
pub use storage::{EngineKind, MemoryStorage, SqliteStorage, StorageEngine};
pub use streamer::ResultSet;
pub use types::EntryId;

/// Open a history manager backed by the SQLite database at `path`
pub fn open(path: &Path) -> Result<HistoryManager> {
    Ok(HistoryManager::new(Box::new(SqliteStorage::open(path)?)))
}

/// Open a history manager with the engine and path from `config`
pub fn init_with_config(config: &Config) -> Result<HistoryManager> {
    let engine = config.engine_kind()?.open(&config.database_path)?;
    Ok(HistoryManager::new(engine))
}
