//! Database repository layer
//!
//! Provides query and write operations for reading log entries.

use crate::error::Result;
use crate::types::{Entry, NewEntry, Position};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::EntryStore;

/// SQLite-backed entry store. One connection, serialized behind a mutex.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        tracing::debug!(path = %path.display(), "Opened database");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run migrations on this database
    pub fn migrate(&self) -> Result<()> {
        let conn = self.lock();
        super::schema::run_migrations(&conn)
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        // A panic mid-statement leaves SQLite consistent; keep serving.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ============================================
    // Entry operations
    // ============================================

    /// All entries, newest first.
    pub fn list_entries(&self) -> Result<Vec<Entry>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, date_ms, book, chapter FROM entries ORDER BY date_ms DESC, id DESC",
        )?;

        let entries = stmt
            .query_map([], Self::row_to_entry)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Get a single entry
    pub fn get_entry(&self, id: i64) -> Result<Option<Entry>> {
        let conn = self.lock();
        let entry = conn
            .query_row(
                "SELECT id, date_ms, book, chapter FROM entries WHERE id = ?",
                [id],
                Self::row_to_entry,
            )
            .optional()?;
        Ok(entry)
    }

    /// The id the next inserted entry will receive.
    pub fn next_id(&self) -> Result<i64> {
        let conn = self.lock();
        Self::next_id_in(&conn)
    }

    fn next_id_in(conn: &Connection) -> Result<i64> {
        let next: i64 =
            conn.query_row("SELECT COALESCE(MAX(id), 0) + 1 FROM entries", [], |r| {
                r.get(0)
            })?;
        Ok(next)
    }

    /// Insert a new entry, assigning `max(id) + 1`
    pub fn insert_entry(&self, entry: NewEntry) -> Result<Entry> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;

        let stored = entry.with_id(Self::next_id_in(&tx)?);
        tx.execute(
            "INSERT INTO entries (id, date_ms, book, chapter) VALUES (?1, ?2, ?3, ?4)",
            params![
                stored.id,
                stored.date,
                stored.start.section as i64,
                stored.start.chapter
            ],
        )?;
        tx.commit()?;

        tracing::debug!(id = stored.id, date = stored.date, "Inserted entry");
        Ok(stored)
    }

    /// Replace an entry's date and position. Returns `None` if the id is unknown.
    pub fn update_entry(&self, id: i64, entry: NewEntry) -> Result<Option<Entry>> {
        let conn = self.lock();
        let changed = conn.execute(
            "UPDATE entries SET date_ms = ?2, book = ?3, chapter = ?4 WHERE id = ?1",
            params![
                id,
                entry.date,
                entry.start.section as i64,
                entry.start.chapter
            ],
        )?;

        if changed == 0 {
            return Ok(None);
        }

        tracing::debug!(id, "Updated entry");
        Ok(Some(entry.with_id(id)))
    }

    /// Delete an entry. Returns `false` if the id is unknown.
    pub fn delete_entry(&self, id: i64) -> Result<bool> {
        let conn = self.lock();
        let changed = conn.execute("DELETE FROM entries WHERE id = ?", [id])?;
        if changed > 0 {
            tracing::debug!(id, "Deleted entry");
        }
        Ok(changed > 0)
    }

    /// Count stored entries
    pub fn count_entries(&self) -> Result<usize> {
        let conn = self.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM entries", [], |r| r.get(0))?;
        Ok(count as usize)
    }

    /// Replace every entry in a single transaction
    pub fn replace_all(&self, entries: &[Entry]) -> Result<()> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM entries", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO entries (id, date_ms, book, chapter) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for entry in entries {
                stmt.execute(params![
                    entry.id,
                    entry.date,
                    entry.start.section as i64,
                    entry.start.chapter
                ])?;
            }
        }

        tx.commit()?;
        tracing::info!(count = entries.len(), "Replaced entry collection");
        Ok(())
    }

    fn row_to_entry(row: &Row) -> rusqlite::Result<Entry> {
        let book: i64 = row.get(2)?;
        Ok(Entry {
            id: row.get(0)?,
            date: row.get(1)?,
            start: Position::new(book as usize, row.get(3)?),
        })
    }
}

impl EntryStore for Database {
    fn load_all(&self) -> Result<Vec<Entry>> {
        self.list_entries()
    }

    fn get(&self, id: i64) -> Result<Option<Entry>> {
        self.get_entry(id)
    }

    fn insert(&self, entry: NewEntry) -> Result<Entry> {
        self.insert_entry(entry)
    }

    fn update(&self, id: i64, entry: NewEntry) -> Result<Option<Entry>> {
        self.update_entry(id, entry)
    }

    fn delete(&self, id: i64) -> Result<bool> {
        self.delete_entry(id)
    }

    fn count(&self) -> Result<usize> {
        self.count_entries()
    }

    fn replace_all(&self, entries: &[Entry]) -> Result<()> {
        Database::replace_all(self, entries)
    }
}
