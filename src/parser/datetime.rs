use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::record::{EventTime, NOT_AVAILABLE};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// Parse an ISO 8601 timestamp into the wall-clock time it names.
///
/// `N/A` maps to [`EventTime::Missing`]; anything unparseable maps to
/// [`EventTime::Invalid`]. Offsets are kept as written, not converted to UTC.
pub fn parse_timestamp(raw: &str) -> EventTime {
    let s = raw.trim();
    if s == NOT_AVAILABLE {
        return EventTime::Missing;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return EventTime::Exact(dt.naive_local());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return EventTime::Exact(dt.naive_local());
        }
    }

    let naive = s.strip_suffix(['Z', 'z']).unwrap_or(s);
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, fmt) {
            return EventTime::Exact(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(naive, "%Y-%m-%d") {
        return EventTime::Exact(date.and_time(NaiveTime::MIN));
    }

    EventTime::Invalid
}

/// Split an ISO 8601 timestamp into `("YYYY-MM-DD", "HH:MM:SS")`.
pub fn split_datetime(raw: &str) -> (String, String) {
    parse_timestamp(raw).display_pair()
}
