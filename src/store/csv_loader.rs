//! Reads the raw usage CSV into [`Event`]s.
//!
//! Expected columns: `id, created_at, company_id, type, content, attribute,
//! <ignored>, updated_at, original_timestamp[, value]`. Bad rows are logged and
//! skipped.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::DateTime;
use thiserror::Error;

use super::StoreError;
use crate::analytics::types::{Event, Timestamp};
use crate::constants::MIN_CSV_COLUMNS;

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%#z",
    "%Y-%m-%dT%H:%M:%S%.f%#z",
];

#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("invalid {field} format: '{value}'")]
    Timestamp { field: &'static str, value: String },
}

pub fn load_events(path: &Path, max_events: usize) -> Result<Vec<Event>, StoreError> {
    let file = File::open(path).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), "Loading events");
    read_events(file, max_events)
}

pub fn read_events<R: Read>(reader: R, max_events: usize) -> Result<Vec<Event>, StoreError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    if rdr.headers()?.is_empty() {
        return Err(StoreError::TooSmall("missing header row".to_string()));
    }

    let mut events = Vec::new();
    let mut rows = 0usize;
    let mut skipped = 0usize;

    for (idx, result) in rdr.records().enumerate() {
        let row = idx + 1;
        rows += 1;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(row, error = %e, "Skipping unreadable row");
                skipped += 1;
                continue;
            }
        };

        if record.len() < MIN_CSV_COLUMNS {
            tracing::warn!(row, columns = record.len(), "Skipping row with insufficient columns");
            skipped += 1;
            continue;
        }

        match parse_row(&record) {
            Ok(event) => {
                if events.len() >= max_events {
                    tracing::warn!(max_events, row, "Event cap reached, ignoring remaining rows");
                    break;
                }
                events.push(event);
            }
            Err(e) => {
                tracing::warn!(row, error = %e, "Skipping row");
                skipped += 1;
            }
        }
    }

    if rows == 0 {
        return Err(StoreError::TooSmall("no data rows".to_string()));
    }

    tracing::info!(loaded = events.len(), skipped, "Events loaded");
    Ok(events)
}

pub fn parse_row(record: &csv::StringRecord) -> Result<Event, RowError> {
    let field = |idx: usize| record.get(idx).unwrap_or("");

    let created_at = required_timestamp("created_at", field(1))?;
    let updated_at = required_timestamp("updated_at", field(7))?;
    let original_timestamp = if is_null(field(8)) {
        created_at
    } else {
        required_timestamp("original_timestamp", field(8))?
    };

    Ok(Event {
        id: field(0).to_string(),
        created_at,
        company_id: field(2).to_string(),
        event_type: field(3).to_string(),
        content: field(4).to_string(),
        attribute: field(5).to_string(),
        updated_at,
        original_timestamp,
        value: normalize_value(field(9)),
    })
}

/// Parses a source timestamp, keeping the offset it was written with.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok())
}

fn required_timestamp(field: &'static str, raw: &str) -> Result<Timestamp, RowError> {
    parse_timestamp(raw).ok_or_else(|| RowError::Timestamp {
        field,
        value: raw.to_string(),
    })
}

fn is_null(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw == "null"
}

/// Shortest decimal rendering of a numeric value; `None` for null or non-numeric input.
fn normalize_value(raw: &str) -> Option<String> {
    if is_null(raw) {
        return None;
    }
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    const HEADER: &str =
        "id,created_at,company_id,type,content,attribute,metadata,updated_at,original_timestamp,value\n";

    fn load(body: &str) -> Result<Vec<Event>, StoreError> {
        read_events(format!("{HEADER}{body}").as_bytes(), usize::MAX)
    }

    #[test]
    fn parses_offset_timestamps() {
        let ts = parse_timestamp("2025-03-01 10:15:30.123456-07").unwrap();
        assert_eq!(
            ts,
            Utc.with_ymd_and_hms(2025, 3, 1, 17, 15, 30).unwrap()
                + chrono::Duration::microseconds(123_456)
        );
        assert_eq!(ts.offset().local_minus_utc(), -7 * 3600);
        assert_eq!(ts.to_rfc3339(), "2025-03-01T10:15:30.123456-07:00");
        assert!(parse_timestamp("2025-03-01 10:15:30+00").is_some());
        assert!(parse_timestamp("2025-03-01T10:15:30Z").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn reads_full_row() {
        let events = load(
            "e1,2025-03-01 10:00:00+00,A,activity,\"User active CMMS - Acme Corp a@x.com /p\",page,,2025-03-01 11:00:00+00,null,2.50\n",
        )
        .unwrap();
        assert_eq!(events.len(), 1);
        let e = &events[0];
        assert_eq!(e.id, "e1");
        assert_eq!(e.company_id, "A");
        assert_eq!(e.event_type, "activity");
        assert_eq!(e.original_timestamp, e.created_at);
        assert_eq!(e.value.as_deref(), Some("2.5"));
    }

    #[test]
    fn value_column_is_optional() {
        let events = load(
            "e1,2025-03-01 10:00:00+00,A,t,c,a,,2025-03-01 10:00:00+00,2025-02-01 10:00:00+00\n\
             e2,2025-03-01 10:00:00+00,A,t,c,a,,2025-03-01 10:00:00+00,,abc\n",
        )
        .unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].value, None);
        assert_eq!(
            events[0].original_timestamp,
            Utc.with_ymd_and_hms(2025, 2, 1, 10, 0, 0).unwrap()
        );
        assert_eq!(events[1].value, None);
    }

    #[test]
    fn skips_short_and_malformed_rows() {
        let events = load(
            "short,row\n\
             bad,not-a-time,A,t,c,a,,2025-03-01 10:00:00+00,null,\n\
             ok,2025-03-01 10:00:00+00,A,t,c,a,,2025-03-01 10:00:00+00,null,\n",
        )
        .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "ok");
    }

    #[test]
    fn header_only_is_too_small() {
        assert!(matches!(load(""), Err(StoreError::TooSmall(_))));
        assert!(matches!(
            read_events("".as_bytes(), 10),
            Err(StoreError::TooSmall(_))
        ));
    }

    #[test]
    fn respects_event_cap() {
        let row = "x,2025-03-01 10:00:00+00,A,t,c,a,,2025-03-01 10:00:00+00,null,\n";
        let body = format!("{HEADER}{}", row.repeat(5));
        let events = read_events(body.as_bytes(), 3).unwrap();
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn bad_original_timestamp_is_a_row_error() {
        let record = csv::StringRecord::from(vec![
            "x",
            "2025-03-01 10:00:00+00",
            "A",
            "t",
            "c",
            "a",
            "",
            "2025-03-01 10:00:00+00",
            "soon",
        ]);
        assert_eq!(
            parse_row(&record),
            Err(RowError::Timestamp {
                field: "original_timestamp",
                value: "soon".to_string()
            })
        );
    }
}
