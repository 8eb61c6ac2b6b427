//! Formatting helpers shared across front ends.

use chrono::{DateTime, FixedOffset, NaiveDate};

/// Format an entry timestamp (milliseconds) as `YYYY-MM-DD` in the given offset.
pub fn format_day(date_ms: i64, offset: &FixedOffset) -> String {
    match DateTime::from_timestamp_millis(date_ms) {
        Some(ts) => ts.with_timezone(offset).format("%Y-%m-%d").to_string(),
        None => "—".to_string(),
    }
}

/// Parse `YYYY-MM-DD` into milliseconds at local midnight in the given offset.
pub fn parse_day(text: &str, offset: &FixedOffset) -> Option<i64> {
    let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    let local = midnight.and_local_timezone(*offset).single()?;
    Some(local.timestamp_millis())
}

/// Pluralize a day count (e.g., "1 day", "3 days").
pub fn format_days(days: usize) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

/// Format a signed chapter total (e.g., "9 chapters", "-1 chapter").
pub fn format_chapters(chapters: i64) -> String {
    match chapters {
        1 => "1 chapter".to_string(),
        -1 => "-1 chapter".to_string(),
        n => format!("{} chapters", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Offset, Utc};

    #[test]
    fn test_day_round_trip_in_utc() {
        let utc = Utc.fix();
        let ms = parse_day("2025-11-01", &utc).unwrap();
        assert_eq!(ms, 1_761_955_200_000);
        assert_eq!(format_day(ms, &utc), "2025-11-01");
    }

    #[test]
    fn test_parse_day_in_offset() {
        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        let ms = parse_day("2025-11-01", &minus_five).unwrap();
        assert_eq!(ms, 1_761_955_200_000 + 5 * 3_600_000);
        assert_eq!(format_day(ms, &minus_five), "2025-11-01");
        assert_eq!(format_day(ms, &Utc.fix()), "2025-11-01");
    }

    #[test]
    fn test_parse_day_rejects_garbage() {
        assert!(parse_day("11/01/2025", &Utc.fix()).is_none());
        assert!(parse_day("2025-02-30", &Utc.fix()).is_none());
    }

    #[test]
    fn test_counts() {
        assert_eq!(format_days(1), "1 day");
        assert_eq!(format_days(0), "0 days");
        assert_eq!(format_chapters(-12), "-12 chapters");
        assert_eq!(format_chapters(1), "1 chapter");
    }
}
