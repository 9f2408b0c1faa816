//! SQLite storage engine
//!
//! Entries live in a single `entry` table. The timestamp is filled in by
//! the column default, so `add` reads the row back after inserting it and
//! returns what the database actually stored.

use super::StorageEngine;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::streamer::ResultSet;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS entry (
        entry_id INTEGER PRIMARY KEY AUTOINCREMENT,
        entry_command TEXT NOT NULL,
        entry_location TEXT NOT NULL,
        entry_time INTEGER NOT NULL
            DEFAULT (CAST(ROUND((julianday('now') - 2440587.5) * 86400000.0) AS INTEGER))
    );
    CREATE INDEX IF NOT EXISTS entry_location_index ON entry (entry_location);
";

const SELECT_COLUMNS: &str = "SELECT entry_id, entry_command, entry_location, entry_time";

/// Smallest whole millisecond at or after `time`.
///
/// Stored times are whole milliseconds, so a lower bound with a sub-millisecond
/// part must round up or it admits rows that fall just before it.
fn ceil_millis(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis() + i64::from(time.timestamp_subsec_nanos() % 1_000_000 != 0)
}

/// History stored in a SQLite database file
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (or create) the database at `db_path`
    #[must_use = "Database connection must be used"]
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        Self::with_connection(conn)
    }

    /// Open a private database that disappears on close
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<Entry> {
        let millis: i64 = row.get(3)?;
        Ok(Entry {
            id: row.get(0)?,
            command: row.get(1)?,
            location: row.get(2)?,
            time: DateTime::from_timestamp_millis(millis),
            env: Vec::new(),
        })
    }

    fn query<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<ResultSet> {
        let mut stmt = self.conn.prepare(sql)?;
        let entries = stmt
            .query_map(params, Self::entry_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ResultSet::from(entries))
    }
}

impl StorageEngine for SqliteStorage {
    fn add(&mut self, entry: Entry) -> Result<Entry> {
        self.conn.execute(
            "INSERT INTO entry (entry_command, entry_location) VALUES (?1, ?2)",
            params![entry.command, entry.location],
        )?;
        let id = self.conn.last_insert_rowid();

        let sql = format!("{SELECT_COLUMNS} FROM entry WHERE entry_id = ?1");
        let stored = self
            .conn
            .query_row(&sql, params![id], Self::entry_from_row)
            .optional()?;

        stored.ok_or(Error::EntryNotFound { id })
    }

    fn last_entries(&self, n: usize) -> Result<ResultSet> {
        let limit = i64::try_from(n).unwrap_or(i64::MAX);
        self.query(
            "WITH recent AS (
                SELECT entry_id, entry_command, entry_location, entry_time
                FROM entry
                ORDER BY entry_id DESC
                LIMIT ?1
            )
            SELECT entry_id, entry_command, entry_location, entry_time
            FROM recent
            ORDER BY entry_id ASC",
            params![limit],
        )
    }

    fn period(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<ResultSet> {
        let sql = format!(
            "{SELECT_COLUMNS} FROM entry
             WHERE entry_time >= ?1 AND entry_time <= ?2
             ORDER BY entry_id ASC"
        );
        self.query(&sql, params![ceil_millis(start), end.timestamp_millis()])
    }

    fn location(&self, location: &str) -> Result<ResultSet> {
        let sql = format!(
            "{SELECT_COLUMNS} FROM entry
             WHERE entry_location = ?1
             ORDER BY entry_id ASC"
        );
        self.query(&sql, params![location])
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::Database(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntryId;
    use chrono::TimeDelta;
    use tempfile::NamedTempFile;

    #[test]
    fn test_database_creation() {
        let temp_file = NamedTempFile::new().unwrap();
        let store = SqliteStorage::open(temp_file.path()).unwrap();
        assert!(store.last_entries(10).unwrap().is_empty());
    }

    #[test]
    fn test_schema_creation_is_idempotent() {
        let temp_file = NamedTempFile::new().unwrap();

        let mut store = SqliteStorage::open(temp_file.path()).unwrap();
        store.add(Entry::new("ls -la", "/home/user", Vec::new())).unwrap();
        Box::new(store).close().unwrap();

        let store = SqliteStorage::open(temp_file.path()).unwrap();
        let entries = store.last_entries(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.output()[0].command, "ls -la");
    }

    #[test]
    fn test_location_index_exists() {
        let store = SqliteStorage::open_in_memory().unwrap();
        let name: Option<String> = store
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = 'entry'",
                [],
                |row| row.get(0),
            )
            .optional()
            .unwrap();
        assert_eq!(name.as_deref(), Some("entry_location_index"));
    }

    #[test]
    fn test_add_reads_back_stored_row() {
        let mut store = SqliteStorage::open_in_memory().unwrap();
        let before = Utc::now().timestamp_millis();
        let stored = store
            .add(Entry::new("cd /tmp/hello", "/tmp", vec!["PWD=/tmp".to_string()]))
            .unwrap();
        let after = Utc::now().timestamp_millis();

        assert_eq!(stored.id, EntryId::new(1));
        assert_eq!(stored.command, "cd /tmp/hello");
        assert_eq!(stored.location, "/tmp");
        // The table has no environment column.
        assert!(stored.env.is_empty());

        let millis = stored.time.unwrap().timestamp_millis();
        assert!(before - 1 <= millis && millis <= after + 1);
    }

    #[test]
    fn test_empty_command_is_stored() {
        let mut store = SqliteStorage::open_in_memory().unwrap();
        let stored = store.add(Entry::new("", "/", Vec::new())).unwrap();
        assert_eq!(stored.command, "");
        assert!(stored.id.is_assigned());
    }

    #[test]
    fn test_last_entries_huge_limit() {
        let mut store = SqliteStorage::open_in_memory().unwrap();
        store.add(Entry::new("vim", "/tmp/bla", Vec::new())).unwrap();
        assert_eq!(store.last_entries(usize::MAX).unwrap().len(), 1);
    }

    #[test]
    fn test_period_start_with_sub_millisecond_part() {
        let mut store = SqliteStorage::open_in_memory().unwrap();
        let stored = store.add(Entry::new("make", "/src", Vec::new())).unwrap();
        let time = stored.time.unwrap();

        let start = time + TimeDelta::microseconds(500);
        let end = time + TimeDelta::days(1);
        let from_engine = store.period(start, end).unwrap();
        let from_set = store.last_entries(10).unwrap().period(start, end);
        assert!(from_engine.is_empty());
        assert_eq!(from_engine.output(), from_set.output());

        // Still inclusive when the bound is the stored time itself.
        assert_eq!(store.period(time, end).unwrap().len(), 1);
        assert_eq!(store.period(time - TimeDelta::days(1), time).unwrap().len(), 1);
    }

    #[test]
    fn test_ceil_millis() {
        let time = DateTime::from_timestamp_millis(1_000).unwrap();
        assert_eq!(ceil_millis(time), 1_000);
        assert_eq!(ceil_millis(time + TimeDelta::microseconds(1)), 1_001);
        assert_eq!(ceil_millis(time - TimeDelta::microseconds(1)), 1_000);
    }

    #[test]
    fn test_add_reports_row_missing_after_insert() {
        let mut store = SqliteStorage::open_in_memory().unwrap();
        store
            .conn
            .execute_batch(
                "CREATE TRIGGER drop_new_entry AFTER INSERT ON entry
                 BEGIN DELETE FROM entry WHERE entry_id = NEW.entry_id; END;",
            )
            .unwrap();

        let err = store.add(Entry::new("ls", "/", Vec::new())).unwrap_err();
        assert!(matches!(err, Error::EntryNotFound { id: 1 }));
        assert_eq!(err.category(), "not_found");
    }
}
