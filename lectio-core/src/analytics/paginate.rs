//! Paginated listing over the canonical order.

use super::ordering::canonical_order;
use crate::types::{Entry, Page};

/// Entries per page.
pub const PAGE_SIZE: usize = 10;

/// Number of pages needed for `total` items; never less than one.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size).max(1)
}

/// Serve one page of entries, newest first.
///
/// Out-of-range page numbers are clamped to the nearest valid page instead of
/// failing, so page 0 serves page 1 and page 99 of three serves page 3.
pub fn paginate(entries: &[Entry], requested_page: i64) -> Page<Entry> {
    let ordered = canonical_order(entries);
    let total_entries = ordered.len();
    let total_pages = total_pages(total_entries, PAGE_SIZE);
    let page = requested_page.clamp(1, total_pages as i64) as usize;

    let start = ((page - 1) * PAGE_SIZE).min(total_entries);
    let end = (page * PAGE_SIZE).min(total_entries);

    Page {
        items: ordered[start..end].iter().map(|&e| e.clone()).collect(),
        page,
        total_pages,
        total_entries,
    }
}
