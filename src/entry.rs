//! The history entry record

use crate::types::EntryId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// One recorded command execution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    /// Engine-assigned id, unset until the entry is stored
    pub id: EntryId,
    /// When the engine stored the entry
    pub time: Option<DateTime<Utc>>,
    /// Working directory where the command was executed
    pub location: String,
    /// The command that was executed, verbatim
    pub command: String,
    /// Environment snapshot as `KEY=VALUE` strings
    pub env: Vec<String>,
}

impl Entry {
    /// Create a transient entry that has not been stored yet
    pub fn new<C, L>(command: C, location: L, env: Vec<String>) -> Self
    where
        C: Into<String>,
        L: Into<String>,
    {
        Self {
            id: EntryId::UNSET,
            time: None,
            location: location.into(),
            command: command.into(),
            env,
        }
    }

    /// Whether the entry carries everything a stored entry must have
    pub fn is_persisted(&self) -> bool {
        self.id.is_assigned() && self.time.is_some()
    }

    /// Get formatted timestamp, empty for transient entries
    pub fn formatted_time(&self) -> String {
        self.time
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>6}  {}  {}  {}",
            self.id,
            self.formatted_time(),
            self.location,
            self.command
        )
    }
}
