//! History management for Xenophon
//!
//! [`HistoryManager`] ties a storage engine to the location and
//! environment providers. It captures context for each inserted command,
//! hands the entry to the engine, and checks what comes back before
//! returning it. Queries are passed straight through to the engine.

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::provider::{CurrentDirectory, EnvironmentGetter, LocationGetter, ProcessEnvironment};
use crate::storage::StorageEngine;
use crate::streamer::ResultSet;
use chrono::{DateTime, Utc};

/// Main history manager
pub struct HistoryManager {
    engine: Box<dyn StorageEngine>,
    location: Box<dyn LocationGetter>,
    environment: Box<dyn EnvironmentGetter>,
}

impl HistoryManager {
    /// Create a manager over `engine` that captures the real working
    /// directory and process environment
    #[must_use = "History manager must be used to insert commands"]
    pub fn new(engine: Box<dyn StorageEngine>) -> Self {
        Self {
            engine,
            location: Box::new(CurrentDirectory),
            environment: Box::new(ProcessEnvironment),
        }
    }

    /// Replace the location provider
    pub fn with_location<L>(mut self, location: L) -> Self
    where
        L: LocationGetter + 'static,
    {
        self.location = Box::new(location);
        self
    }

    /// Replace the environment provider
    pub fn with_environment<E>(mut self, environment: E) -> Self
    where
        E: EnvironmentGetter + 'static,
    {
        self.environment = Box::new(environment);
        self
    }

    /// Record `command` and return the stored entry
    ///
    /// Nothing is written when either provider fails.
    pub fn insert(&mut self, command: &str) -> Result<Entry> {
        let location = self.location.get().map_err(Error::location_resolution)?;
        let env = self
            .environment
            .get()
            .map_err(Error::environment_resolution)?;

        let stored = self.engine.add(Entry::new(command, location, env))?;

        if stored.time.is_none() {
            return Err(Error::bad_data_insert(format!(
                "entry {} has no timestamp",
                stored.id
            )));
        }
        if !stored.id.is_assigned() {
            return Err(Error::bad_data_insert(format!(
                "entry has invalid id {}",
                stored.id
            )));
        }

        Ok(stored)
    }

    /// The most recent `n` entries, oldest first
    pub fn last_entries(&self, n: usize) -> Result<ResultSet> {
        self.engine.last_entries(n)
    }

    /// Entries stored within `start..=end`
    pub fn period(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<ResultSet> {
        self.engine.period(start, end)
    }

    /// Entries recorded in exactly `location`
    pub fn location(&self, location: &str) -> Result<ResultSet> {
        self.engine.location(location)
    }

    /// Close the underlying storage engine
    pub fn close(self) -> Result<()> {
        self.engine.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{command_matches, location_matches};
    use crate::provider::{FixedEnvironment, FixedLocation};
    use crate::storage::{MemoryStorage, SqliteStorage};
    use crate::types::EntryId;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FailingLocation;

    impl LocationGetter for FailingLocation {
        fn get(&self) -> Result<String> {
            Err(Error::custom("working directory was removed"))
        }
    }

    struct FailingEnvironment;

    impl EnvironmentGetter for FailingEnvironment {
        fn get(&self) -> Result<Vec<String>> {
            Err(Error::custom("environment unreadable"))
        }
    }

    /// Location provider whose answer can be changed between inserts
    #[derive(Clone, Default)]
    struct SharedLocation(Rc<RefCell<String>>);

    impl SharedLocation {
        fn set(&self, location: &str) {
            *self.0.borrow_mut() = location.to_string();
        }
    }

    impl LocationGetter for SharedLocation {
        fn get(&self) -> Result<String> {
            Ok(self.0.borrow().clone())
        }
    }

    /// Engine that stores nothing and returns whatever it was built with
    /// Answers every `add` with `reply`, or with a database error when unset
    struct MisbehavingStorage {
        reply: Option<Entry>,
    }

    impl StorageEngine for MisbehavingStorage {
        fn add(&mut self, _entry: Entry) -> Result<Entry> {
            self.reply
                .clone()
                .ok_or(Error::Database(rusqlite::Error::InvalidQuery))
        }

        fn last_entries(&self, _n: usize) -> Result<ResultSet> {
            Ok(ResultSet::new())
        }

        fn period(&self, _start: DateTime<Utc>, _end: DateTime<Utc>) -> Result<ResultSet> {
            Ok(ResultSet::new())
        }

        fn location(&self, _location: &str) -> Result<ResultSet> {
            Ok(ResultSet::new())
        }

        fn close(self: Box<Self>) -> Result<()> {
            Ok(())
        }
    }

    fn test_manager(engine: Box<dyn StorageEngine>) -> HistoryManager {
        HistoryManager::new(engine)
            .with_location(FixedLocation::new("/home"))
            .with_environment(FixedEnvironment::new(vec![
                "PATH=/bin:/usr/local/bin".to_string(),
                "PWD=/home".to_string(),
            ]))
    }

    fn count(manager: &HistoryManager) -> usize {
        manager.last_entries(usize::MAX).unwrap().len()
    }

    #[test]
    fn test_insert_returns_stored_entry() {
        let mut manager = test_manager(Box::new(MemoryStorage::new()));
        let entry = manager.insert("mkdir hello;cd /home/hello").unwrap();

        assert_eq!(entry.id, EntryId::new(1));
        assert!(entry.time.is_some());
        assert_eq!(entry.location, "/home");
        assert_eq!(entry.command, "mkdir hello;cd /home/hello");
        assert_eq!(entry.env.len(), 2);
    }

    #[test]
    fn test_insert_ids_increase() {
        let mut manager = test_manager(Box::new(SqliteStorage::open_in_memory().unwrap()));
        let ids: Vec<_> = ["cd /usr/local", "echo \"hello world\"", "ls"]
            .iter()
            .map(|command| manager.insert(command).unwrap().id)
            .collect();
        assert!(ids[0].is_assigned());
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_default_providers() {
        let mut manager = HistoryManager::new(Box::new(MemoryStorage::new()));
        let entry = manager.insert("true").unwrap();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(entry.location, cwd.to_string_lossy());
        assert!(!entry.env.is_empty());
    }

    #[test]
    fn test_location_failure_aborts_insert() {
        let mut manager = test_manager(Box::new(MemoryStorage::new()))
            .with_location(FailingLocation);

        let err = manager.insert("ls").unwrap_err();
        assert!(matches!(err, Error::LocationResolution { .. }));
        assert_eq!(err.category(), "resolution");
        assert_eq!(count(&manager), 0);
    }

    #[test]
    fn test_environment_failure_aborts_insert() {
        for engine in [
            Box::new(MemoryStorage::new()) as Box<dyn StorageEngine>,
            Box::new(SqliteStorage::open_in_memory().unwrap()),
        ] {
            let mut manager = test_manager(engine);
            manager.insert("cd /").unwrap();

            let mut manager = manager.with_environment(FailingEnvironment);
            let err = manager.insert("echo $PATH").unwrap_err();
            assert!(matches!(err, Error::EnvironmentResolution { .. }));
            assert_eq!(count(&manager), 1);
        }
    }

    #[test]
    fn test_missing_timestamp_is_rejected() {
        let mut reply = Entry::new("ls", "/", Vec::new());
        reply.id = EntryId::new(1);
        let mut manager = test_manager(Box::new(MisbehavingStorage { reply: Some(reply) }));

        let err = manager.insert("ls").unwrap_err();
        assert!(matches!(err, Error::BadDataInsert { .. }));
        assert_eq!(err.category(), "integrity");
    }

    #[test]
    fn test_unassigned_id_is_rejected() {
        let mut reply = Entry::new("ls", "/", Vec::new());
        reply.time = Some(Utc::now());
        let mut manager = test_manager(Box::new(MisbehavingStorage { reply: Some(reply) }));

        let err = manager.insert("ls").unwrap_err();
        assert!(matches!(err, Error::BadDataInsert { .. }));
    }

    #[test]
    fn test_storage_error_reaches_caller() {
        let mut manager = test_manager(Box::new(MisbehavingStorage { reply: None }));

        let err = manager.insert("ls").unwrap_err();
        assert!(matches!(err, Error::Database(rusqlite::Error::InvalidQuery)));
        assert_eq!(err.category(), "storage");
    }

    #[test]
    fn test_queries_pass_through() {
        let location = SharedLocation::default();
        let mut manager = HistoryManager::new(Box::new(MemoryStorage::new()))
            .with_location(location.clone())
            .with_environment(FixedEnvironment::default());

        let rows = [
            ("cd /", "/tmp"),
            ("echo $PATH", "/"),
            ("cd /tmp/hello", "/"),
            ("cd /tmp/bla", "/tmp/hello"),
            ("for i in {1..3}; do echo \"$i\"; done", "/tmp/bla"),
            ("vim", "/tmp/bla"),
        ];
        let mut stored = Vec::new();
        for (command, dir) in rows {
            location.set(dir);
            stored.push(manager.insert(command).unwrap());
        }

        assert_eq!(manager.location("/").unwrap().len(), 2);
        assert_eq!(manager.last_entries(3).unwrap().len(), 3);

        let first = stored[0].time.unwrap();
        let last = stored[5].time.unwrap();
        assert_eq!(manager.period(first, last).unwrap().len(), 6);

        let base = manager.last_entries(100).unwrap();
        assert_eq!(base.filter(command_matches("tmp").unwrap()).len(), 2);
        let in_tmp = base.filter(location_matches("tmp").unwrap());
        assert_eq!(in_tmp.len(), 4);
        let loops = in_tmp.filter(command_matches("for i").unwrap());
        assert_eq!(loops.len(), 1);
        assert!(loops.output()[0].command.starts_with("for"));

        manager.close().unwrap();
    }
}
