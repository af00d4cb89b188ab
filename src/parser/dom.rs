use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::PageParser;
use crate::record::{clean_text, EventRecord, EventTime, Location};

static CARD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.event-card").unwrap());
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3").unwrap());
static LOCATION: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.location").unwrap());
static DATE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.date").unwrap());
static TIME: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.time").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Legacy listing layout: one `div.event-card` per event, fields by class name.
pub struct DomParser;

impl PageParser for DomParser {
    fn name(&self) -> &'static str {
        "dom"
    }

    fn parse(&self, html: &str) -> Vec<EventRecord> {
        let doc = Html::parse_document(html);
        doc.select(&CARD).map(parse_card).collect()
    }
}

fn parse_card(card: ElementRef<'_>) -> EventRecord {
    let date = child_text(card, &DATE);
    let time = child_text(card, &TIME);
    let start = if date.is_none() && time.is_none() {
        EventTime::Missing
    } else {
        EventTime::Listed { date, time }
    };

    EventRecord {
        title: child_text(card, &TITLE),
        location: Location {
            venue: child_text(card, &LOCATION),
            street_address: None,
        },
        start,
        end: EventTime::Missing,
        url: None,
    }
}

/// Whitespace-collapsed text of the first matching descendant.
fn child_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let el = card.select(selector).next()?;
    let raw: String = el.text().collect();
    clean_text(&WHITESPACE_RE.replace_all(&raw, " "))
}
