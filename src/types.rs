//! Type definitions for Xenophon
//!
//! Type-safe wrappers around primitive values used by the storage layer.

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A type-safe wrapper for entry IDs
///
/// Engines assign ids starting at 1. Zero (or anything negative) means the
/// entry has not been persisted yet.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl EntryId {
    /// The id carried by an entry that has not been stored
    pub const UNSET: EntryId = EntryId(0);

    /// Create a new EntryId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    pub fn as_i64(self) -> i64 {
        self.0
    }

    /// Whether an engine has assigned this id
    pub fn is_assigned(self) -> bool {
        self.0 > 0
    }
}

impl From<i64> for EntryId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<EntryId> for i64 {
    fn from(id: EntryId) -> Self {
        id.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl ToSql for EntryId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl FromSql for EntryId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(EntryId::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_id_conversion() {
        let id: EntryId = 42.into();
        assert_eq!(id.as_i64(), 42);
        let raw: i64 = id.into();
        assert_eq!(raw, 42);
    }

    #[test]
    fn test_unset_ids() {
        assert!(!EntryId::UNSET.is_assigned());
        assert!(!EntryId::new(-3).is_assigned());
        assert!(EntryId::new(1).is_assigned());
        assert_eq!(EntryId::default(), EntryId::UNSET);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EntryId::new(9)), "9");
        assert_eq!(format!("{:>3}", EntryId::new(9)), "  9");
    }

    #[test]
    fn test_ordering_follows_inner_value() {
        assert!(EntryId::new(2) > EntryId::new(1));
    }
}
