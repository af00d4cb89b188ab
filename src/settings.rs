use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::parser::ParserKind;

const PAGE_PLACEHOLDER: &str = "{page}";

/// Everything the driver needs for one run. Defaults reproduce the fixed
/// behaviour: pages 1..=10 of quicket.co.za into `quicket_events.csv`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub page_url_template: String,
    pub first_page: u32,
    pub last_page: u32,
    pub output: PathBuf,
    pub min_delay_secs: f64,
    pub max_delay_secs: f64,
    pub request_timeout_secs: u64,
    pub render: bool,
    pub render_timeout_secs: u64,
    pub parser: ParserKind,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            page_url_template: "https://www.quicket.co.za/events/?page={page}".to_string(),
            first_page: 1,
            last_page: 10,
            output: PathBuf::from("quicket_events.csv"),
            min_delay_secs: 1.0,
            max_delay_secs: 3.0,
            request_timeout_secs: 10,
            render: false,
            render_timeout_secs: 20,
            parser: ParserKind::JsonLd,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/124.0 Safari/537.36"
                .to_string(),
        }
    }
}

impl ScrapeConfig {
    /// Defaults, then an optional config file, then `QUICKET_*` environment variables.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }
        let settings = builder
            .add_source(Environment::with_prefix("QUICKET").try_parsing(true))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.page_url_template.contains(PAGE_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "page_url_template must contain {}",
                PAGE_PLACEHOLDER
            )));
        }
        if self.first_page == 0 {
            return Err(ConfigError::Invalid("pages are numbered from 1".into()));
        }
        if self.last_page < self.first_page {
            return Err(ConfigError::Invalid(format!(
                "last_page ({}) is before first_page ({})",
                self.last_page, self.first_page
            )));
        }
        let delays_ok = self.min_delay_secs.is_finite()
            && self.max_delay_secs.is_finite()
            && self.min_delay_secs >= 0.0
            && self.min_delay_secs <= self.max_delay_secs;
        if !delays_ok {
            return Err(ConfigError::Invalid(format!(
                "delay bounds [{}, {}] must satisfy 0 <= min <= max",
                self.min_delay_secs, self.max_delay_secs
            )));
        }
        if self.request_timeout_secs == 0 || self.render_timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeouts must be at least 1s".into()));
        }
        Ok(())
    }

    pub fn page_url(&self, page: u32) -> String {
        self.page_url_template
            .replace(PAGE_PLACEHOLDER, &page.to_string())
    }

    pub fn pages(&self) -> std::ops::RangeInclusive<u32> {
        self.first_page..=self.last_page
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }
}
