//! Core domain types for lectio
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Section** | One of the 66 named books of the anthology |
//! | **Position** | A (section, chapter) pair pointing into the anthology |
//! | **Entry** | A dated record of where the reader was |
//! | **Ordinal** | A position flattened onto a single chapter axis |
//! | **Streak** | A run of calendar-consecutive days with at least one entry |
//!
//! On the wire a section is called a `book`, matching the entry file format
//! `{"id": 1, "date": 1761955200000, "start": {"book": 0, "chapter": 3}}`.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::canon::{Canon, Division};

// ============================================
// Position
// ============================================

/// Where in the anthology an entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Section index, 0..=65
    #[serde(rename = "book")]
    pub section: usize,
    /// Chapter number, 1-based
    pub chapter: u32,
}

impl Position {
    pub fn new(section: usize, chapter: u32) -> Self {
        Self { section, chapter }
    }

    pub fn division(&self) -> Division {
        Division::of(self.section)
    }

    /// Human label such as "Psalms 23".
    pub fn label(&self, canon: &Canon) -> String {
        match canon.section(self.section) {
            Some(section) => format!("{} {}", section.name, self.chapter),
            None => format!("#{} {}", self.section, self.chapter),
        }
    }
}

// ============================================
// Entry
// ============================================

/// A stored reading log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier, assigned as max(existing) + 1
    pub id: i64,
    /// Milliseconds since the Unix epoch
    pub date: i64,
    /// Reading position
    pub start: Position,
}

impl Entry {
    pub fn new(id: i64, date: i64, start: Position) -> Self {
        Self { id, date, start }
    }

    /// The entry timestamp, if representable.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.date)
    }

    /// Calendar day of this entry in the given fixed offset.
    pub fn day(&self, offset: &FixedOffset) -> Option<NaiveDate> {
        self.timestamp()
            .map(|ts| ts.with_timezone(offset).date_naive())
    }
}

/// A validated entry that has not been assigned an id yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewEntry {
    /// Milliseconds since the Unix epoch
    pub date: i64,
    /// Reading position
    pub start: Position,
}

impl NewEntry {
    pub fn with_id(self, id: i64) -> Entry {
        Entry::new(id, self.date, self.start)
    }
}

// ============================================
// Derived records
// ============================================

/// Aggregate statistics over the whole entry collection.
///
/// Never persisted; recomputed on every request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatisticsRecord {
    /// Number of entries
    pub total_entries: usize,
    /// Net chapters advanced across the logged timeline (may be negative)
    pub total_chapters_read: i64,
    /// Distinct sections referenced by any entry
    pub unique_sections_touched: usize,
    /// Entries in sections 0..=38
    pub first_division_count: usize,
    /// Entries in sections 39..=65
    pub second_division_count: usize,
    /// Longest run of consecutive calendar days with an entry
    pub longest_streak_days: usize,
}

/// One page of the canonical listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Page actually served, after clamping (1-based)
    pub page: usize,
    /// Total number of pages; at least 1
    pub total_pages: usize,
    /// Total number of items across all pages
    pub total_entries: usize,
}
