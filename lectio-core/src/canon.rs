//! The section table: 66 named books with fixed chapter counts.
//!
//! The table is built once per process and handed out as `&'static Canon`.
//! Prefix sums are computed at construction so ordinal lookups are O(1).

use std::sync::OnceLock;

/// Number of sections in the anthology.
pub const SECTION_COUNT: usize = 66;

/// Sections with an index below this belong to the first division.
pub const FIRST_DIVISION_LEN: usize = 39;

const NAMES: [&str; SECTION_COUNT] = [
    "Genesis",
    "Exodus",
    "Leviticus",
    "Numbers",
    "Deuteronomy",
    "Joshua",
    "Judges",
    "Ruth",
    "1 Samuel",
    "2 Samuel",
    "1 Kings",
    "2 Kings",
    "1 Chronicles",
    "2 Chronicles",
    "Ezra",
    "Nehemiah",
    "Esther",
    "Job",
    "Psalms",
    "Proverbs",
    "Ecclesiastes",
    "Song of Solomon",
    "Isaiah",
    "Jeremiah",
    "Lamentations",
    "Ezekiel",
    "Daniel",
    "Hosea",
    "Joel",
    "Amos",
    "Obadiah",
    "Jonah",
    "Micah",
    "Nahum",
    "Habakkuk",
    "Zephaniah",
    "Haggai",
    "Zechariah",
    "Malachi",
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

const CHAPTER_COUNTS: [u32; SECTION_COUNT] = [
    50, 40, 27, 36, 34, 24, 21, 4, 31, 24, 22, 25, 29, 36, 10, 13, 10, 42, 150, 31, 12, 8, 66, 52,
    5, 48, 12, 14, 3, 9, 1, 4, 7, 3, 3, 3, 2, 14, 4, 28, 16, 24, 21, 28, 16, 16, 13, 6, 6, 4, 4, 5,
    3, 6, 4, 3, 1, 13, 5, 5, 3, 5, 1, 1, 1, 22,
];

/// Which half of the anthology a section belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Division {
    /// Sections 0..=38
    First,
    /// Sections 39..=65
    Second,
}

impl Division {
    /// Division of a section index.
    pub fn of(section: usize) -> Self {
        if section < FIRST_DIVISION_LEN {
            Division::First
        } else {
            Division::Second
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Division::First => "first",
            Division::Second => "second",
        }
    }
}

/// One named section of the anthology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Display name (e.g., "Psalms")
    pub name: &'static str,
    /// Number of chapters; always positive
    pub chapter_count: u32,
}

/// The immutable section table.
#[derive(Debug)]
pub struct Canon {
    sections: Vec<Section>,
    /// `offsets[i]` is the number of chapters in sections `0..i`.
    offsets: Vec<i64>,
}

impl Canon {
    /// The process-wide table. Built on first use, never rebuilt.
    pub fn standard() -> &'static Canon {
        static CANON: OnceLock<Canon> = OnceLock::new();
        CANON.get_or_init(Canon::build)
    }

    fn build() -> Self {
        let sections: Vec<Section> = NAMES
            .iter()
            .zip(CHAPTER_COUNTS.iter())
            .map(|(&name, &chapter_count)| Section {
                name,
                chapter_count,
            })
            .collect();

        let mut offsets = Vec::with_capacity(sections.len());
        let mut running = 0i64;
        for section in &sections {
            offsets.push(running);
            running += i64::from(section.chapter_count);
        }

        tracing::debug!(sections = sections.len(), chapters = running, "Section table built");

        Self { sections, offsets }
    }

    /// All sections in canonical order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section at `index`, if in range.
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Chapters in all sections before `index`.
    ///
    /// Panics when `index` is out of range; callers validate first.
    pub fn chapters_before(&self, index: usize) -> i64 {
        self.offsets[index]
    }

    /// Total chapters across the anthology.
    pub fn total_chapters(&self) -> i64 {
        self.sections
            .iter()
            .map(|s| i64::from(s.chapter_count))
            .sum()
    }

    /// Find a section index by name, ignoring case and surrounding whitespace.
    pub fn find(&self, name: &str) -> Option<usize> {
        let wanted = name.trim();
        self.sections
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(wanted))
    }
}
