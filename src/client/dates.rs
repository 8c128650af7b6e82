//! Date display formatting, factored once instead of per-worker field lists.
//!
//! The store emits ISO dates (`YYYY-MM-DD`, or RFC 3339 timestamps for rows
//! that came through a timestamp column); the client shows `MM/DD/YYYY`.
//! The transform is applied uniformly to any record shape carrying the known
//! date field names; every other field passes through untouched.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

/// Every date-valued field the API can return, across all record shapes.
pub const DATE_FIELDS: &[&str] = &[
    "filed_date",
    "last_checked_date",
    "status_date",
    "response_sent_date",
    "uspto_mailing_date",
];

/// Rewrite the known date fields of one record to display format, in place.
/// Unparseable or non-string values are left as they are.
pub fn localize_record(record: &mut Value) {
    let Value::Object(map) = record else {
        return;
    };

    for field in DATE_FIELDS {
        if let Some(value) = map.get_mut(*field) {
            if let Some(display) = value.as_str().and_then(to_display) {
                *value = Value::String(display);
            }
        }
    }
}

/// Collection-fetch path: localize every record.
pub fn localize_collection(records: &mut [Value]) {
    for record in records.iter_mut() {
        localize_record(record);
    }
}

fn to_display(raw: &str) -> Option<String> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.format("%m/%d/%Y").to_string());
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.format("%m/%d/%Y").to_string());
    }
    None
}
