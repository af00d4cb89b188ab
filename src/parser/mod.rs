pub mod datetime;
pub mod dom;
pub mod jsonld;

use serde::Deserialize;

use crate::record::EventRecord;

/// Turns one fetched listing page into event records.
///
/// Implementations never fail: anything they cannot read is skipped or
/// left absent on the record.
pub trait PageParser {
    fn name(&self) -> &'static str;
    fn parse(&self, html: &str) -> Vec<EventRecord>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ParserKind {
    /// Embedded schema.org JSON-LD blocks
    #[default]
    JsonLd,
    /// Legacy `div.event-card` markup
    Dom,
}

impl ParserKind {
    pub fn build(self) -> Box<dyn PageParser> {
        match self {
            ParserKind::JsonLd => Box::new(jsonld::JsonLdParser),
            ParserKind::Dom => Box::new(dom::DomParser),
        }
    }
}
