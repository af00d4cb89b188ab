use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use super::datetime::parse_timestamp;
use super::PageParser;
use crate::record::{clean_text, EventRecord, EventTime, Location};

static LD_JSON: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());

const EVENT_TYPE: &str = "Event";

/// Reads schema.org `Event` objects out of `application/ld+json` script blocks.
pub struct JsonLdParser;

impl PageParser for JsonLdParser {
    fn name(&self) -> &'static str {
        "json-ld"
    }

    fn parse(&self, html: &str) -> Vec<EventRecord> {
        let doc = Html::parse_document(html);
        let mut events = Vec::new();

        for (i, script) in doc.select(&LD_JSON).enumerate() {
            let body: String = script.text().collect();
            match serde_json::from_str::<Value>(body.trim()) {
                Ok(value) => collect_events(&value, &mut events),
                Err(e) => debug!("Skipping malformed ld+json block #{}: {}", i, e),
            }
        }

        events
    }
}

/// Walk a block: a single object, a list of objects, or an `@graph` container.
fn collect_events(value: &Value, out: &mut Vec<EventRecord>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_events(item, out);
            }
        }
        Value::Object(obj) => {
            if obj.get("@type").and_then(Value::as_str) == Some(EVENT_TYPE) {
                out.push(parse_event(value));
            } else if let Some(graph) = obj.get("@graph") {
                collect_events(graph, out);
            }
        }
        _ => {}
    }
}

/// Map one schema.org `Event` object onto a record.
pub fn parse_event(event: &Value) -> EventRecord {
    let location = event
        .get("location")
        .filter(|l| l.is_object())
        .map(|loc| Location {
            venue: text(loc, "name"),
            street_address: match loc.get("address") {
                Some(Value::String(s)) => clean_text(s),
                Some(addr) => text(addr, "streetAddress"),
                None => None,
            },
        })
        .unwrap_or_default();

    EventRecord {
        title: text(event, "name"),
        location,
        start: timestamp(event, "startDate"),
        end: timestamp(event, "endDate"),
        url: text(event, "url"),
    }
}

fn text(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).and_then(clean_text)
}

fn timestamp(value: &Value, key: &str) -> EventTime {
    text(value, key).map_or(EventTime::Missing, |s| parse_timestamp(&s))
}
