//! Storage engines for command history
//!
//! This module defines the [`StorageEngine`] trait that every backend
//! implements, so the history manager works with any of them without
//! knowing which one it holds. Two engines ship with the crate:
//!
//! - [`MemoryStorage`]: a plain vector, for tests and as the reference
//!   behavior
//! - [`SqliteStorage`]: a single SQLite table, for real use
//!
//! Both answer the same three query shapes and hand back a
//! [`ResultSet`], which carries all further filtering.

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::streamer::ResultSet;
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Common interface for history storage backends
pub trait StorageEngine {
    /// Store a transient entry
    ///
    /// The engine assigns the id and the timestamp and returns the stored
    /// form, which is the only copy callers should rely on.
    fn add(&mut self, entry: Entry) -> Result<Entry>;

    /// The most recent `n` entries, oldest first
    #[must_use = "Query results should be used"]
    fn last_entries(&self, n: usize) -> Result<ResultSet>;

    /// Entries stored within `start..=end`, oldest first
    #[must_use = "Query results should be used"]
    fn period(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<ResultSet>;

    /// Entries recorded in exactly `location`, oldest first
    #[must_use = "Query results should be used"]
    fn location(&self, location: &str) -> Result<ResultSet>;

    /// Release the underlying resources
    fn close(self: Box<Self>) -> Result<()>;
}

/// The storage engines selectable from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EngineKind {
    #[default]
    Sqlite3,
    Memory,
}

impl EngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Sqlite3 => "sqlite3",
            EngineKind::Memory => "memory",
        }
    }

    /// Open an engine of this kind
    ///
    /// `database_path` is only consulted by engines that persist to disk.
    pub fn open(self, database_path: &Path) -> Result<Box<dyn StorageEngine>> {
        match self {
            EngineKind::Sqlite3 => Ok(Box::new(SqliteStorage::open(database_path)?)),
            EngineKind::Memory => Ok(Box::new(MemoryStorage::new())),
        }
    }
}

impl FromStr for EngineKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite3" | "sqlite" => Ok(EngineKind::Sqlite3),
            "memory" => Ok(EngineKind::Memory),
            other => Err(Error::config_validation(
                "storage_engine".to_string(),
                format!("unknown engine '{other}'"),
            )),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
