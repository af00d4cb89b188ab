mod error;
mod export;
mod fetch;
mod parser;
mod pipeline;
mod record;
mod settings;
mod throttle;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::info;

use crate::parser::ParserKind;
use crate::settings::ScrapeConfig;
use crate::throttle::RateLimiter;

#[derive(Parser)]
#[command(name = "quicket_scraper", about = "Scrape Quicket event listings into a CSV file")]
struct Cli {
    /// First listing page to fetch
    #[arg(long)]
    pages_from: Option<u32>,
    /// Last listing page to fetch (inclusive)
    #[arg(long)]
    pages_to: Option<u32>,
    /// Output CSV path
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Extraction strategy
    #[arg(long, value_enum)]
    parser: Option<ParserKind>,
    /// Minimum delay between pages, in seconds
    #[arg(long)]
    min_delay: Option<f64>,
    /// Maximum delay between pages, in seconds
    #[arg(long)]
    max_delay: Option<f64>,
    /// Per-request timeout, in seconds
    #[arg(long)]
    timeout: Option<u64>,
    /// Render pages in headless Chrome before parsing (needs the `render` feature)
    #[arg(long)]
    render: bool,
    /// TOML config file layered under environment and flags
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, config: &mut ScrapeConfig) {
        if let Some(p) = self.pages_from {
            config.first_page = p;
        }
        if let Some(p) = self.pages_to {
            config.last_page = p;
        }
        if let Some(o) = &self.output {
            config.output = o.clone();
        }
        if let Some(k) = self.parser {
            config.parser = k;
        }
        if let Some(d) = self.min_delay {
            config.min_delay_secs = d;
        }
        if let Some(d) = self.max_delay {
            config.max_delay_secs = d;
        }
        if let Some(t) = self.timeout {
            config.request_timeout_secs = t;
        }
        if self.render {
            config.render = true;
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut config = ScrapeConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    let fetcher = fetch::build_fetcher(&config)?;
    let parser = config.parser.build();
    let limiter = RateLimiter::new(config.min_delay_secs, config.max_delay_secs);
    info!(
        "Scraping pages {}..={} with the {} parser",
        config.first_page,
        config.last_page,
        parser.name()
    );

    let summary = pipeline::run(&config, fetcher.as_ref(), parser.as_ref(), &limiter)?;
    println!(
        "Done: {} events from {} pages ({} with events) written to {}",
        summary.records,
        summary.pages,
        summary.pages_with_events,
        summary.output.display()
    );
    println!("Finished in {}", format_duration(t0.elapsed()));

    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn bare_invocation_keeps_defaults() {
        let cli = Cli::parse_from(["quicket_scraper"]);
        let mut config = ScrapeConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.pages(), 1..=10);
        assert_eq!(config.output, PathBuf::from("quicket_events.csv"));
        assert_eq!(config.parser, ParserKind::JsonLd);
        assert!(!config.render);
    }

    #[test]
    fn flags_override() {
        let cli = Cli::parse_from([
            "quicket_scraper",
            "--pages-to",
            "3",
            "--parser",
            "dom",
            "--min-delay",
            "0.5",
            "-o",
            "out.csv",
        ]);
        let mut config = ScrapeConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.last_page, 3);
        assert_eq!(config.parser, ParserKind::Dom);
        assert_eq!(config.min_delay_secs, 0.5);
        assert_eq!(config.output, PathBuf::from("out.csv"));
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1h 2m 5s");
    }
}
