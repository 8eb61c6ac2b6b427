//! Database layer for lectio
//!
//! This module provides the storage layer using SQLite with:
//! - Schema migrations
//! - Repository operations for entries
//! - The [`EntryStore`] seam consumed by the journal service

pub mod repo;
pub mod schema;

pub use repo::Database;

use crate::error::Result;
use crate::types::{Entry, NewEntry};

/// Persistence of the entry collection.
///
/// `load_all` is the only source of the snapshot handed to analytics.
pub trait EntryStore {
    /// Every stored entry, in no particular order.
    fn load_all(&self) -> Result<Vec<Entry>>;

    /// A single entry by id.
    fn get(&self, id: i64) -> Result<Option<Entry>>;

    /// Store a new entry with id `max(existing) + 1` and return it.
    fn insert(&self, entry: NewEntry) -> Result<Entry>;

    /// Replace an entry's date and position. `None` when the id is unknown.
    fn update(&self, id: i64, entry: NewEntry) -> Result<Option<Entry>>;

    /// Delete an entry. `false` when the id is unknown.
    fn delete(&self, id: i64) -> Result<bool>;

    /// Number of stored entries.
    fn count(&self) -> Result<usize>;

    /// Replace the whole collection atomically.
    fn replace_all(&self, entries: &[Entry]) -> Result<()>;
}
