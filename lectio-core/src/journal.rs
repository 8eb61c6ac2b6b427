//! Journal service: validated CRUD, listing and statistics over an entry store.
//!
//! The journal owns no mutable state of its own. Writes go through the store;
//! reads load a snapshot with [`EntryStore::load_all`] and hand it to the pure
//! analytics functions.

use chrono::{FixedOffset, Offset, Utc};
use serde_json::Value;

use crate::analytics::{compute_statistics_with, paginate};
use crate::canon::Canon;
use crate::db::EntryStore;
use crate::error::{Error, Result};
use crate::seed::sample_entries;
use crate::types::{Entry, Page, StatisticsRecord};
use crate::validate::validate_entry;

/// Entry operations shared by the HTTP server and the CLI.
pub struct Journal<S> {
    store: S,
    canon: &'static Canon,
    day_offset: FixedOffset,
}

impl<S: EntryStore> Journal<S> {
    /// Journal over `store` using the standard section table and UTC days.
    pub fn new(store: S) -> Self {
        Self {
            store,
            canon: Canon::standard(),
            day_offset: Utc.fix(),
        }
    }

    /// Cut calendar days for streaks in a fixed offset instead of UTC.
    pub fn with_day_offset(mut self, day_offset: FixedOffset) -> Self {
        self.day_offset = day_offset;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn canon(&self) -> &'static Canon {
        self.canon
    }

    /// Validate a raw payload and store it as a new entry.
    pub fn create(&self, payload: &Value) -> Result<Entry> {
        let entry = validate_entry(self.canon, payload).map_err(Error::Validation)?;
        let stored = self.store.insert(entry)?;
        tracing::info!(
            id = stored.id,
            book = stored.start.section,
            chapter = stored.start.chapter,
            "Entry created"
        );
        Ok(stored)
    }

    /// Validate a raw payload and replace entry `id` with it.
    ///
    /// Validation runs before the existence check, so an invalid payload for
    /// an unknown id reports the validation problems.
    pub fn update(&self, id: i64, payload: &Value) -> Result<Entry> {
        let entry = validate_entry(self.canon, payload).map_err(Error::Validation)?;
        let updated = self
            .store
            .update(id, entry)?
            .ok_or(Error::EntryNotFound(id))?;
        tracing::info!(id, "Entry updated");
        Ok(updated)
    }

    /// Delete entry `id`.
    pub fn delete(&self, id: i64) -> Result<()> {
        if !self.store.delete(id)? {
            return Err(Error::EntryNotFound(id));
        }
        tracing::info!(id, "Entry deleted");
        Ok(())
    }

    /// Fetch entry `id`.
    pub fn get(&self, id: i64) -> Result<Entry> {
        self.store.get(id)?.ok_or(Error::EntryNotFound(id))
    }

    /// One page of entries, newest first. Out-of-range pages are clamped.
    pub fn list(&self, page: i64) -> Result<Page<Entry>> {
        let entries = self.store.load_all()?;
        Ok(paginate(&entries, page))
    }

    /// Every entry, newest first.
    pub fn all(&self) -> Result<Vec<Entry>> {
        let mut entries = self.store.load_all()?;
        crate::analytics::sort_canonical(&mut entries);
        Ok(entries)
    }

    /// Statistics over the full collection.
    pub fn statistics(&self) -> Result<StatisticsRecord> {
        let entries = self.store.load_all()?;
        let stats = compute_statistics_with(&entries, self.canon, &self.day_offset);
        tracing::debug!(
            total_entries = stats.total_entries,
            chapters_read = stats.total_chapters_read,
            longest_streak = stats.longest_streak_days,
            "Computed statistics"
        );
        Ok(stats)
    }

    /// Seed sample entries when the store is empty. Returns how many were added.
    pub fn seed_if_empty(&self) -> Result<usize> {
        if self.store.count()? > 0 {
            return Ok(0);
        }
        let entries = sample_entries(self.canon, &mut rand::thread_rng());
        self.store.replace_all(&entries)?;
        tracing::info!(count = entries.len(), "Seeded empty store with sample entries");
        Ok(entries.len())
    }

    /// Replace the whole collection with imported entries.
    pub fn import(&self, entries: &[Entry]) -> Result<()> {
        self.store.replace_all(entries)?;
        tracing::info!(count = entries.len(), "Imported entries");
        Ok(())
    }
}
