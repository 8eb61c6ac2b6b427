//! Sample data for a fresh store.
//!
//! Thirty entries, one per day starting 2025-11-01 UTC, walking through the
//! sections in order with a random chapter in each.

use chrono::NaiveDate;
use rand::Rng;

use crate::canon::Canon;
use crate::types::{Entry, Position};

/// Number of sample entries.
pub const SEED_DAYS: usize = 30;

const DAY_MS: i64 = 86_400_000;

/// First sample day at midnight UTC, in milliseconds.
fn seed_start_ms() -> i64 {
    NaiveDate::from_ymd_opt(2025, 11, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default()
}

/// Generate the sample entries with ids `1..=30`.
pub fn sample_entries<R: Rng + ?Sized>(canon: &Canon, rng: &mut R) -> Vec<Entry> {
    let start = seed_start_ms();

    (0..SEED_DAYS)
        .map(|i| {
            let section_index = i % canon.len();
            let max_chapter = canon
                .section(section_index)
                .map(|s| s.chapter_count)
                .unwrap_or(1);
            Entry::new(
                i as i64 + 1,
                start + DAY_MS * i as i64,
                Position::new(section_index, rng.gen_range(1..=max_chapter)),
            )
        })
        .collect()
}
