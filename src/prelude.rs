//! Prelude module for Xenophon
//!
//! Re-exports the types most callers need.
//!
//! # Usage
//!
//! ```rust
//! use xenophon::prelude::*;
//! ```

pub use crate::entry::Entry;
pub use crate::error::{Error, Result};
pub use crate::filters::{command_matches, location_matches};
pub use crate::history::HistoryManager;
pub use crate::provider::{EnvironmentGetter, LocationGetter};
pub use crate::storage::StorageEngine;
pub use crate::streamer::ResultSet;
pub use crate::types::EntryId;

// Re-export commonly used external types
pub use chrono::{DateTime, Utc};
