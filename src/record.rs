use chrono::NaiveDateTime;

/// Placeholder written for any field that could not be extracted.
pub const NOT_AVAILABLE: &str = "N/A";
pub const INVALID_DATE: &str = "Invalid Date";
pub const INVALID_TIME: &str = "Invalid Time";

/// One scraped event. Absent fields stay `None` until export.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventRecord {
    pub title: Option<String>,
    pub location: Location,
    pub start: EventTime,
    pub end: EventTime,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub venue: Option<String>,
    pub street_address: Option<String>,
}

impl Location {
    /// "Venue, Street" with each half defaulted on its own.
    pub fn display(&self) -> String {
        format!(
            "{}, {}",
            self.venue.as_deref().unwrap_or(NOT_AVAILABLE),
            self.street_address.as_deref().unwrap_or(NOT_AVAILABLE)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EventTime {
    #[default]
    Missing,
    /// A timestamp was present but not ISO 8601.
    Invalid,
    Exact(NaiveDateTime),
    /// Free-text date/time as printed on a listing card.
    Listed {
        date: Option<String>,
        time: Option<String>,
    },
}

impl EventTime {
    /// Split into the (date, time) cells written to the output file.
    pub fn display_pair(&self) -> (String, String) {
        match self {
            EventTime::Missing => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
            EventTime::Invalid => (INVALID_DATE.to_string(), INVALID_TIME.to_string()),
            EventTime::Exact(dt) => (
                dt.format("%Y-%m-%d").to_string(),
                dt.format("%H:%M:%S").to_string(),
            ),
            EventTime::Listed { date, time } => (
                date.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                time.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            ),
        }
    }
}

impl EventRecord {
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn url_or_default(&self) -> &str {
        self.url.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// Trim and drop empty strings so that blank values count as absent.
pub fn clean_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn empty_location_uses_both_defaults() {
        assert_eq!(Location::default().display(), "N/A, N/A");
    }

    #[test]
    fn partial_location() {
        let loc = Location {
            venue: Some("Artscape".into()),
            street_address: None,
        };
        assert_eq!(loc.display(), "Artscape, N/A");
    }

    #[test]
    fn exact_time_pair() {
        let dt = NaiveDate::from_ymd_opt(2025, 2, 13)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        assert_eq!(
            EventTime::Exact(dt).display_pair(),
            ("2025-02-13".to_string(), "09:05:00".to_string())
        );
    }

    #[test]
    fn missing_and_invalid_are_distinct() {
        assert_eq!(EventTime::Missing.display_pair().0, "N/A");
        assert_eq!(EventTime::Invalid.display_pair().0, "Invalid Date");
        assert_eq!(EventTime::Invalid.display_pair().1, "Invalid Time");
    }

    #[test]
    fn listed_time_keeps_text() {
        let t = EventTime::Listed {
            date: Some("Sat 15 Mar".into()),
            time: None,
        };
        assert_eq!(t.display_pair(), ("Sat 15 Mar".to_string(), "N/A".to_string()));
    }

    #[test]
    fn clean_text_drops_blank() {
        assert_eq!(clean_text("  "), None);
        assert_eq!(clean_text(" Jazz Night \n").as_deref(), Some("Jazz Night"));
    }
}
