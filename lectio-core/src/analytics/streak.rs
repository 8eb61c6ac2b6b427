//! Consecutive-day streak detection.

use std::collections::BTreeSet;

use chrono::{FixedOffset, NaiveDate};

use crate::types::Entry;

/// Distinct calendar days with at least one entry, ascending.
///
/// Days are cut in the given fixed offset. Timestamps chrono cannot represent
/// are skipped.
pub fn active_days(entries: &[Entry], offset: &FixedOffset) -> BTreeSet<NaiveDate> {
    entries.iter().filter_map(|e| e.day(offset)).collect()
}

/// Length of the longest run of calendar-consecutive active days.
///
/// Zero when there are no entries, at least one otherwise.
pub fn longest_streak(entries: &[Entry], offset: &FixedOffset) -> usize {
    longest_run(active_days(entries, offset).iter().copied())
}

/// Longest run of consecutive days in an ascending sequence of distinct days.
pub fn longest_run(days: impl IntoIterator<Item = NaiveDate>) -> usize {
    let mut longest = 0usize;
    let mut current = 0usize;
    let mut prev: Option<NaiveDate> = None;

    for day in days {
        match prev {
            Some(p) if (day - p).num_days() == 1 => current += 1,
            _ => current = 1,
        }
        longest = longest.max(current);
        prev = Some(day);
    }

    longest
}
