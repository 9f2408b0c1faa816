//! In-memory storage engine

use super::StorageEngine;
use crate::entry::Entry;
use crate::error::Result;
use crate::streamer::ResultSet;
use crate::types::EntryId;
use chrono::{DateTime, Utc};

/// Keeps entries in insertion order for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Vec<Entry>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn snapshot(&self) -> ResultSet {
        ResultSet::from(self.entries.clone())
    }
}

impl StorageEngine for MemoryStorage {
    fn add(&mut self, mut entry: Entry) -> Result<Entry> {
        entry.id = EntryId::new(self.entries.len() as i64 + 1);
        entry.time = Some(Utc::now());
        self.entries.push(entry.clone());
        Ok(entry)
    }

    fn last_entries(&self, n: usize) -> Result<ResultSet> {
        let start = self.entries.len().saturating_sub(n);
        Ok(ResultSet::from(self.entries[start..].to_vec()))
    }

    fn period(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<ResultSet> {
        Ok(self.snapshot().period(start, end))
    }

    fn location(&self, location: &str) -> Result<ResultSet> {
        Ok(self.snapshot().location(location))
    }

    fn close(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_assigns_len_plus_one() {
        let mut store = MemoryStorage::new();
        assert!(store.is_empty());

        let first = store.add(Entry::new("ls", "/", Vec::new())).unwrap();
        let second = store.add(Entry::new("pwd", "/", Vec::new())).unwrap();

        assert_eq!(first.id, EntryId::new(1));
        assert_eq!(second.id, EntryId::new(2));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_add_overrides_caller_supplied_fields() {
        let mut store = MemoryStorage::new();
        let mut entry = Entry::new("ls", "/", Vec::new());
        entry.id = EntryId::new(99);
        entry.time = DateTime::from_timestamp(0, 0);

        let stored = store.add(entry).unwrap();
        assert_eq!(stored.id, EntryId::new(1));
        assert!(stored.time.unwrap() > DateTime::from_timestamp(0, 0).unwrap());
    }

    #[test]
    fn test_environment_is_kept() {
        let mut store = MemoryStorage::new();
        let env = vec!["PATH=/bin:/usr/local/bin".to_string(), "PWD=/home".to_string()];
        store.add(Entry::new("mkdir hello", "/home", env.clone())).unwrap();

        let found = store.location("/home").unwrap();
        assert_eq!(found.output()[0].env, env);
    }
}
