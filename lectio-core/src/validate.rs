//! Validation of raw entry payloads.
//!
//! Payloads arrive as loosely typed JSON (`{"date": ..., "start": {"book": ..,
//! "chapter": ..}}`). Validation never stops at the first problem: callers get
//! the full list of messages at once.

use chrono::DateTime;
use serde_json::Value;

use crate::canon::Canon;
use crate::position::{numeric_value, validate_position};
use crate::types::{NewEntry, Position};

pub const DATE_REQUIRED: &str = "A valid date is required.";
pub const START_REQUIRED: &str = "Start location is required.";

/// Validate a raw entry payload, returning every problem found.
pub fn entry_errors(canon: &Canon, payload: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    // Dates must map to a calendar day.
    let date = payload
        .get("date")
        .and_then(numeric_value)
        .filter(|ms| DateTime::from_timestamp_millis(*ms).is_some());
    if date.is_none() {
        errors.push(DATE_REQUIRED.to_string());
    }

    match payload.get("start").filter(|start| start.is_object()) {
        None => errors.push(START_REQUIRED.to_string()),
        Some(start) => {
            errors.extend(validate_position(
                canon,
                start.get("book"),
                start.get("chapter"),
            ));
        }
    }

    errors
}

/// Validate a raw entry payload and convert it into a [`NewEntry`].
pub fn validate_entry(canon: &Canon, payload: &Value) -> Result<NewEntry, Vec<String>> {
    let errors = entry_errors(canon, payload);
    if !errors.is_empty() {
        return Err(errors);
    }

    // Fields are known numeric and in range past this point.
    let field = |value: Option<&Value>| value.and_then(numeric_value).unwrap_or_default();
    let start = &payload["start"];

    Ok(NewEntry {
        date: field(payload.get("date")),
        start: Position::new(
            field(start.get("book")) as usize,
            field(start.get("chapter")) as u32,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{BOOK_REQUIRED, CHAPTER_REQUIRED};
    use serde_json::json;

    #[test]
    fn test_valid_payload() {
        let canon = Canon::standard();
        let payload = json!({"date": 1_761_955_200_000i64, "start": {"book": 42, "chapter": "3"}});
        let entry = validate_entry(canon, &payload).unwrap();
        assert_eq!(entry.date, 1_761_955_200_000);
        assert_eq!(entry.start, Position::new(42, 3));
    }

    #[test]
    fn test_string_date_is_accepted() {
        let canon = Canon::standard();
        let payload = json!({"date": "1761955200000", "start": {"book": 0, "chapter": 1}});
        assert_eq!(
            validate_entry(canon, &payload).unwrap().date,
            1_761_955_200_000
        );
    }

    #[test]
    fn test_unrepresentable_dates_are_rejected() {
        let canon = Canon::standard();
        for date in [json!("1e300"), json!(1e300), json!(i64::MAX), json!(i64::MIN)] {
            let payload = json!({"date": date, "start": {"book": 0, "chapter": 1}});
            assert_eq!(
                validate_entry(canon, &payload).unwrap_err(),
                vec![DATE_REQUIRED.to_string()],
                "date {} should be rejected",
                date
            );
        }
    }

    #[test]
    fn test_missing_everything() {
        let canon = Canon::standard();
        assert_eq!(
            entry_errors(canon, &json!({})),
            vec![DATE_REQUIRED.to_string(), START_REQUIRED.to_string()]
        );
        assert_eq!(
            entry_errors(canon, &json!(null)),
            vec![DATE_REQUIRED.to_string(), START_REQUIRED.to_string()]
        );
    }

    #[test]
    fn test_start_must_be_an_object() {
        let canon = Canon::standard();
        let payload = json!({"date": 1, "start": "Genesis 1"});
        assert_eq!(entry_errors(canon, &payload), vec![START_REQUIRED.to_string()]);
    }

    #[test]
    fn test_errors_accumulate_across_fields() {
        let canon = Canon::standard();
        let payload = json!({"date": "yesterday", "start": {"book": 18, "chapter": 151}});
        assert_eq!(
            validate_entry(canon, &payload).unwrap_err(),
            vec![
                DATE_REQUIRED.to_string(),
                "Psalms only has 150 chapters.".to_string()
            ]
        );

        let payload = json!({"date": 5, "start": {}});
        assert_eq!(
            entry_errors(canon, &payload),
            vec![BOOK_REQUIRED.to_string(), CHAPTER_REQUIRED.to_string()]
        );
    }
}
