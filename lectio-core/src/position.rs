//! Position model: ordinal mapping and position validation.

use serde_json::Value;

use crate::canon::Canon;
use crate::types::Position;

pub const BOOK_REQUIRED: &str = "A valid book selection is required.";
pub const BOOK_OUT_OF_RANGE: &str = "Book index must be between 0 and 65.";
pub const CHAPTER_REQUIRED: &str = "A valid chapter number is required.";
pub const CHAPTER_TOO_LOW: &str = "Chapter must be at least 1.";

/// Flatten a position onto a single chapter axis.
///
/// Genesis 1 is ordinal 1, Exodus 1 is 51, Revelation 22 is 1189.
/// The position must already be valid; an out-of-range section panics.
pub fn to_ordinal(canon: &Canon, position: &Position) -> i64 {
    canon.chapters_before(position.section) + i64::from(position.chapter)
}

/// Coerce a loosely typed JSON field into an integer.
///
/// Accepts integers, finite floats (truncated toward zero) and strings holding
/// either. Floats outside the `i64` range are rejected rather than clamped.
/// Everything else, including the empty string, is non-numeric.
pub fn numeric_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate_float)),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate_float))
        }
        _ => None,
    }
}

fn truncate_float(f: f64) -> Option<i64> {
    // 2^63 is exact in f64; i64::MAX is not.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let t = f.trunc();
    (t.is_finite() && (-LIMIT..LIMIT).contains(&t)).then_some(t as i64)
}

/// Validate raw section and chapter fields.
///
/// Every problem found is reported; an empty list means the pair is a valid
/// position.
pub fn validate_position(
    canon: &Canon,
    raw_section: Option<&Value>,
    raw_chapter: Option<&Value>,
) -> Vec<String> {
    check(
        canon,
        raw_section.and_then(numeric_value),
        raw_chapter.and_then(numeric_value),
    )
}

/// Validate an already-numeric section and chapter.
pub fn validate_numeric_position(canon: &Canon, section: i64, chapter: i64) -> Vec<String> {
    check(canon, Some(section), Some(chapter))
}

/// Build a position, or report why the pair is invalid.
pub fn try_position(canon: &Canon, section: i64, chapter: i64) -> Result<Position, Vec<String>> {
    let errors = validate_numeric_position(canon, section, chapter);
    if errors.is_empty() {
        Ok(Position::new(section as usize, chapter as u32))
    } else {
        Err(errors)
    }
}

fn check(canon: &Canon, section: Option<i64>, chapter: Option<i64>) -> Vec<String> {
    let mut errors = Vec::new();

    let section = match section {
        None => {
            errors.push(BOOK_REQUIRED.to_string());
            None
        }
        Some(index) if index < 0 || index >= canon.len() as i64 => {
            errors.push(BOOK_OUT_OF_RANGE.to_string());
            None
        }
        Some(index) => canon.section(index as usize),
    };

    match chapter {
        None => errors.push(CHAPTER_REQUIRED.to_string()),
        Some(chapter) => {
            if chapter < 1 {
                errors.push(CHAPTER_TOO_LOW.to_string());
            }
            if let Some(section) = section {
                if chapter > i64::from(section.chapter_count) {
                    errors.push(format!(
                        "{} only has {} chapters.",
                        section.name, section.chapter_count
                    ));
                }
            }
        }
    }

    errors
}
