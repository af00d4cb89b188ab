use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::export;
use crate::fetch::Fetcher;
use crate::parser::PageParser;
use crate::record::EventRecord;
use crate::settings::ScrapeConfig;
use crate::throttle::RateLimiter;

/// Counts returned after the export step.
pub struct RunSummary {
    pub pages: usize,
    pub pages_with_events: usize,
    pub records: usize,
    pub output: PathBuf,
}

/// Fetch and parse one listing page. Fetch failures are logged and yield no records.
pub fn scrape_page(
    page: u32,
    config: &ScrapeConfig,
    fetcher: &dyn Fetcher,
    parser: &dyn PageParser,
) -> Vec<EventRecord> {
    let url = config.page_url(page);
    match fetcher.fetch(&url) {
        Ok(html) => parser.parse(&html),
        Err(e) => {
            warn!("Error fetching page {}: {}", page, e);
            Vec::new()
        }
    }
}

/// Walk the configured page range, throttling after every page, then export once.
pub fn run(
    config: &ScrapeConfig,
    fetcher: &dyn Fetcher,
    parser: &dyn PageParser,
    limiter: &RateLimiter,
) -> Result<RunSummary> {
    let mut all_events = Vec::new();
    let mut pages = 0;
    let mut pages_with_events = 0;

    for page in config.pages() {
        info!("Scraping page {}...", page);
        let events = scrape_page(page, config, fetcher, parser);
        info!("Found {} events on page {}", events.len(), page);

        pages += 1;
        if !events.is_empty() {
            pages_with_events += 1;
        }
        all_events.extend(events);
        limiter.wait();
    }

    export::save_events_to_csv(&all_events, &config.output)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    Ok(RunSummary {
        pages,
        pages_with_events,
        records: all_events.len(),
        output: config.output.clone(),
    })
}
