use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::ExportError;
use crate::record::EventRecord;

pub const COLUMNS: [&str; 7] = [
    "Event Title",
    "Event Location",
    "Start Date",
    "Start Time",
    "End Date",
    "End Time",
    "Event URL",
];

/// Flat, display-ready row. Absent values become sentinels here and nowhere else.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    title: &'a str,
    location: String,
    start_date: String,
    start_time: String,
    end_date: String,
    end_time: String,
    url: &'a str,
}

impl<'a> From<&'a EventRecord> for CsvRow<'a> {
    fn from(record: &'a EventRecord) -> Self {
        let (start_date, start_time) = record.start.display_pair();
        let (end_date, end_time) = record.end.display_pair();
        CsvRow {
            title: record.title_or_default(),
            location: record.location.display(),
            start_date,
            start_time,
            end_date,
            end_time,
            url: record.url_or_default(),
        }
    }
}

/// Write all records to `path`, replacing any existing file.
pub fn save_events_to_csv(records: &[EventRecord], path: &Path) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    wtr.write_record(COLUMNS)?;
    for record in records {
        wtr.serialize(CsvRow::from(record))?;
    }
    wtr.flush()?;
    info!("Saved {} events to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::datetime::parse_timestamp;
    use crate::record::{EventTime, Location};

    fn sample() -> EventRecord {
        EventRecord {
            title: Some("Test Event".into()),
            location: Location {
                venue: Some("Test Venue".into()),
                street_address: Some("123 Test Street".into()),
            },
            start: parse_timestamp("2025-02-13T16:00:00Z"),
            end: parse_timestamp("2025-02-13T20:00:00Z"),
            url: Some("https://www.quicket.co.za/events/123456-test-event/".into()),
        }
    }

    fn read_back(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let headers = rdr.headers().unwrap().iter().map(String::from).collect();
        let rows = rdr
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        (headers, rows)
    }

    #[test]
    fn single_record_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_events.csv");
        save_events_to_csv(&[sample()], &path).unwrap();

        let (headers, rows) = read_back(&path);
        assert_eq!(headers, COLUMNS);
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0],
            vec![
                "Test Event",
                "Test Venue, 123 Test Street",
                "2025-02-13",
                "16:00:00",
                "2025-02-13",
                "20:00:00",
                "https://www.quicket.co.za/events/123456-test-event/",
            ]
        );
    }

    #[test]
    fn sentinels_at_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sparse.csv");
        let record = EventRecord {
            start: EventTime::Invalid,
            ..EventRecord::default()
        };
        save_events_to_csv(&[record], &path).unwrap();

        let (_, rows) = read_back(&path);
        assert_eq!(
            rows[0],
            vec!["N/A", "N/A, N/A", "Invalid Date", "Invalid Time", "N/A", "N/A", "N/A"]
        );
    }

    #[test]
    fn overwrites_instead_of_appending() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.csv");
        std::fs::write(&path, "stale,content\n1,2\n3,4\n5,6\n").unwrap();

        save_events_to_csv(&[sample(), sample()], &path).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        save_events_to_csv(&[sample(), sample()], &path).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
        assert!(!first.contains("stale"));
        assert_eq!(read_back(&path).1.len(), 2);
    }

    #[test]
    fn empty_run_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        save_events_to_csv(&[], &path).unwrap();
        let (headers, rows) = read_back(&path);
        assert_eq!(headers, COLUMNS);
        assert!(rows.is_empty());
    }

    #[test]
    fn unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("events.csv");
        assert!(save_events_to_csv(&[sample()], &path).is_err());
    }
}
