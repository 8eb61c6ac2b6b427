//! JSON import and export of the entry collection.
//!
//! The file format is a plain array of entries:
//!
//! ```json
//! [{"id": 1, "date": 1761955200000, "start": {"book": 0, "chapter": 3}}]
//! ```

use std::collections::HashSet;

use serde_json::Value;

use crate::analytics::sort_canonical;
use crate::canon::Canon;
use crate::error::{Error, Result};
use crate::types::Entry;
use crate::validate::validate_entry;

/// Serialize entries as a pretty-printed JSON array, newest first.
pub fn export_json(entries: &[Entry]) -> Result<String> {
    let mut ordered = entries.to_vec();
    sort_canonical(&mut ordered);
    Ok(serde_json::to_string_pretty(&ordered)?)
}

/// Parse and validate an exported entry array.
///
/// Every entry is checked; problems are reported together, each prefixed with
/// the index of the offending element.
pub fn import_json(canon: &Canon, text: &str) -> Result<Vec<Entry>> {
    let value: Value = serde_json::from_str(text)?;
    let items = value
        .as_array()
        .ok_or_else(|| Error::Validation(vec!["Expected a JSON array of entries.".to_string()]))?;

    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let id = item.get("id").and_then(Value::as_i64).filter(|id| *id > 0);
        match id {
            None => errors.push(format!("entry {}: a positive integer id is required.", index)),
            Some(id) if !seen.insert(id) => {
                errors.push(format!("entry {}: duplicate id {}.", index, id))
            }
            Some(_) => {}
        }

        match validate_entry(canon, item) {
            Ok(entry) => {
                if let Some(id) = id {
                    entries.push(entry.with_id(id));
                }
            }
            Err(problems) => {
                errors.extend(
                    problems
                        .into_iter()
                        .map(|p| format!("entry {}: {}", index, p)),
                );
            }
        }
    }

    if !errors.is_empty() {
        return Err(Error::Validation(errors));
    }

    Ok(entries)
}
