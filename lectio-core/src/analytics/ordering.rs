//! Canonical listing order shared by statistics and pagination.

use std::cmp::Ordering;

use crate::types::Entry;

/// Most recent first; equal dates fall back to the higher id first.
pub fn canonical_cmp(a: &Entry, b: &Entry) -> Ordering {
    b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id))
}

/// Borrow `entries` in canonical order without copying them.
pub fn canonical_order(entries: &[Entry]) -> Vec<&Entry> {
    let mut ordered: Vec<&Entry> = entries.iter().collect();
    ordered.sort_by(|a, b| canonical_cmp(a, b));
    ordered
}

/// Sort `entries` into canonical order in place.
pub fn sort_canonical(entries: &mut [Entry]) {
    entries.sort_by(canonical_cmp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn entry(id: i64, date: i64) -> Entry {
        Entry::new(id, date, Position::new(0, 1))
    }

    #[test]
    fn test_newest_first() {
        let entries = vec![entry(1, 100), entry(2, 300), entry(3, 200)];
        let ids: Vec<i64> = canonical_order(&entries).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_equal_dates_break_on_id() {
        let entries = vec![entry(4, 100), entry(9, 100), entry(2, 100), entry(1, 50)];
        let ids: Vec<i64> = canonical_order(&entries).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![9, 4, 2, 1]);

        // Input order must not matter.
        let mut reversed = entries.clone();
        reversed.reverse();
        sort_canonical(&mut reversed);
        let ids: Vec<i64> = reversed.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![9, 4, 2, 1]);
    }
}
