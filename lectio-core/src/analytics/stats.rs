//! Statistics over the full entry collection.
//!
//! Every function here is pure: it reads a snapshot of entries plus the
//! section table and never touches storage. Entries are assumed to hold valid
//! positions (enforced when they were written).

use std::collections::HashSet;

use chrono::{FixedOffset, Offset, Utc};

use super::ordering::canonical_order;
use super::streak::longest_streak;
use crate::canon::{Canon, Division};
use crate::position::to_ordinal;
use crate::types::{Entry, StatisticsRecord};

/// Compute statistics with calendar days cut in UTC.
pub fn compute_statistics(entries: &[Entry], canon: &Canon) -> StatisticsRecord {
    compute_statistics_with(entries, canon, &Utc.fix())
}

/// Compute statistics with calendar days cut in a fixed offset.
pub fn compute_statistics_with(
    entries: &[Entry],
    canon: &Canon,
    day_offset: &FixedOffset,
) -> StatisticsRecord {
    let ordered = canonical_order(entries);
    let (first_division_count, second_division_count) = division_split(entries);

    StatisticsRecord {
        total_entries: entries.len(),
        total_chapters_read: chapters_read(canon, &ordered),
        unique_sections_touched: unique_sections(entries),
        first_division_count,
        second_division_count,
        longest_streak_days: longest_streak(entries, day_offset),
    }
}

/// Net chapters advanced across canonically ordered entries.
///
/// Each adjacent pair contributes `ordinal(newer) - ordinal(older)`. Deltas are
/// signed: moving back in the text between two entries lowers the total.
pub fn chapters_read(canon: &Canon, ordered: &[&Entry]) -> i64 {
    ordered
        .windows(2)
        .map(|pair| to_ordinal(canon, &pair[0].start) - to_ordinal(canon, &pair[1].start))
        .sum()
}

/// Number of distinct sections referenced.
pub fn unique_sections(entries: &[Entry]) -> usize {
    entries
        .iter()
        .map(|e| e.start.section)
        .collect::<HashSet<_>>()
        .len()
}

/// Entry counts per division as `(first, second)`.
pub fn division_split(entries: &[Entry]) -> (usize, usize) {
    entries
        .iter()
        .fold((0, 0), |(first, second), e| match e.start.division() {
            Division::First => (first + 1, second),
            Division::Second => (first, second + 1),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    const DAY_MS: i64 = 86_400_000;
    const NOV_1: i64 = 1_761_955_200_000;

    fn entry(id: i64, day: i64, section: usize, chapter: u32) -> Entry {
        Entry::new(id, NOV_1 + day * DAY_MS, Position::new(section, chapter))
    }

    fn read(entries: &[Entry]) -> i64 {
        let canon = Canon::standard();
        chapters_read(canon, &canonical_order(entries))
    }

    #[test]
    fn test_empty_collection() {
        let stats = compute_statistics(&[], Canon::standard());
        assert_eq!(stats, StatisticsRecord::default());
    }

    #[test]
    fn test_single_entry_reads_nothing() {
        let entries = vec![entry(1, 0, 18, 40)];
        let stats = compute_statistics(&entries, Canon::standard());
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.total_chapters_read, 0);
        assert_eq!(stats.longest_streak_days, 1);
    }

    #[test]
    fn test_forward_progress_within_a_section() {
        // Older entry at Genesis 1, newer at Genesis 10.
        let entries = vec![entry(1, 0, 0, 1), entry(2, 1, 0, 10)];
        let ordered = canonical_order(&entries);
        assert_eq!(ordered[0].id, 2);
        assert_eq!(ordered[1].id, 1);
        assert_eq!(read(&entries), 9);
    }

    #[test]
    fn test_progress_across_sections() {
        // Genesis 50 -> Exodus 2 is two chapters on.
        let entries = vec![entry(1, 0, 0, 50), entry(2, 1, 1, 2)];
        assert_eq!(read(&entries), 2);
    }

    #[test]
    fn test_rereading_is_negative() {
        let entries = vec![entry(1, 0, 1, 5), entry(2, 1, 0, 45)];
        assert_eq!(read(&entries), -10);
    }

    #[test]
    fn test_duplicate_adjacent_position_adds_nothing() {
        let base = vec![entry(1, 0, 0, 1), entry(2, 2, 5, 3), entry(3, 4, 40, 7)];
        let before = read(&base);

        let mut with_dup = base.clone();
        with_dup.push(entry(4, 3, 5, 3));
        assert_eq!(read(&with_dup), before);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let entries = vec![entry(1, 3, 3, 1), entry(2, 0, 0, 5), entry(3, 1, 2, 10)];
        let mut shuffled = entries.clone();
        shuffled.swap(0, 2);
        assert_eq!(read(&entries), read(&shuffled));
    }

    #[test]
    fn test_unique_sections() {
        let entries = vec![
            entry(1, 0, 0, 1),
            entry(2, 1, 0, 2),
            entry(3, 2, 39, 1),
            entry(4, 3, 65, 22),
        ];
        assert_eq!(unique_sections(&entries), 3);
    }

    #[test]
    fn test_division_boundary_and_sum() {
        let entries = vec![entry(1, 0, 38, 1), entry(2, 1, 39, 1), entry(3, 2, 0, 1)];
        let stats = compute_statistics(&entries, Canon::standard());
        assert_eq!(stats.first_division_count, 2);
        assert_eq!(stats.second_division_count, 1);
        assert_eq!(
            stats.first_division_count + stats.second_division_count,
            stats.total_entries
        );
    }

    #[test]
    fn test_full_record() {
        let entries = vec![
            entry(1, 0, 0, 1),
            entry(2, 1, 0, 3),
            entry(3, 2, 0, 6),
            entry(4, 5, 39, 1),
        ];
        let stats = compute_statistics(&entries, Canon::standard());
        assert_eq!(
            stats,
            StatisticsRecord {
                total_entries: 4,
                // Matthew 1 is ordinal 930; Genesis 1 is 1.
                total_chapters_read: 929,
                unique_sections_touched: 2,
                first_division_count: 3,
                second_division_count: 1,
                longest_streak_days: 3,
            }
        );
    }
}
