//! Chainable query results
//!
//! Every query in the crate hands back a [`ResultSet`]: an immutable,
//! already-materialized list of entries in ascending id order. Each
//! operation on it produces a new set, so a pipeline such as
//!
//! ```rust
//! # use xenophon::{Entry, ResultSet};
//! # let results = ResultSet::from(Vec::<Entry>::new());
//! let narrowed = results
//!     .location("/tmp")
//!     .filter(|_, e| e.command.starts_with("cd"))
//!     .filter(|i, _| i < 10);
//! assert!(narrowed.is_empty());
//! ```
//!
//! reads like a shell pipe, and every earlier stage stays usable.

use crate::entry::Entry;
use chrono::{DateTime, Utc};

/// An ordered, immutable set of entries produced by a query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    entries: Vec<Entry>,
}

impl ResultSet {
    /// Create an empty result set
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent `n` entries, oldest first
    ///
    /// Asking for more than the set holds returns the whole set.
    pub fn last_entries(&self, n: usize) -> ResultSet {
        let start = self.entries.len().saturating_sub(n);
        Self {
            entries: self.entries[start..].to_vec(),
        }
    }

    /// Entries stored within `start..=end`
    pub fn period(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> ResultSet {
        self.filter(|_, entry| {
            entry
                .time
                .is_some_and(|time| start <= time && time <= end)
        })
    }

    /// Entries whose location is exactly `location`
    pub fn location(&self, location: &str) -> ResultSet {
        self.filter(|_, entry| entry.location == location)
    }

    /// Keep the entries for which `predicate(index, entry)` holds
    ///
    /// The index is the position within this set, not the entry id.
    pub fn filter<F>(&self, mut predicate: F) -> ResultSet
    where
        F: FnMut(usize, &Entry) -> bool,
    {
        let entries = self
            .entries
            .iter()
            .enumerate()
            .filter(|(i, entry)| predicate(*i, *entry))
            .map(|(_, entry)| entry.clone())
            .collect();
        Self { entries }
    }

    /// The materialized entries of this stage
    pub fn output(&self) -> &[Entry] {
        &self.entries
    }

    /// Consume the set and return its entries
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    /// Visit each entry together with its position
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(usize, &Entry),
    {
        for (i, entry) in self.entries.iter().enumerate() {
            visit(i, entry);
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<Entry>> for ResultSet {
    fn from(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

impl IntoIterator for ResultSet {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
