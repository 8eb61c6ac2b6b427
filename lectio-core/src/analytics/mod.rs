//! Analytics module for lectio
//!
//! Turns an unordered snapshot of entries into:
//! - A canonical newest-first ordering (shared with pagination)
//! - Net chapters read via signed deltas between adjacent entries
//! - Coverage (distinct sections) and the first/second division split
//! - The longest streak of calendar-consecutive days
//!
//! Nothing here performs I/O. Callers load the snapshot from an
//! [`EntryStore`](crate::db::EntryStore) and pass it in.

pub mod ordering;
pub mod paginate;
pub mod stats;
pub mod streak;

pub use ordering::{canonical_cmp, canonical_order, sort_canonical};
pub use paginate::{paginate, total_pages, PAGE_SIZE};
pub use stats::{
    chapters_read, compute_statistics, compute_statistics_with, division_split, unique_sections,
};
pub use streak::{active_days, longest_run, longest_streak};
