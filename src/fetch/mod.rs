#[cfg(feature = "render")]
mod render;

use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::error::FetchError;
use crate::settings::ScrapeConfig;

/// One GET per call, no retries.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Plain blocking HTTP client; returns the server's HTML as-is.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send()?.error_for_status()?;
        let body = response.text()?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

/// Pick the fetcher for this run. Rendering needs the `render` feature.
pub fn build_fetcher(config: &ScrapeConfig) -> Result<Box<dyn Fetcher>> {
    if config.render {
        #[cfg(feature = "render")]
        {
            let fetcher = render::RenderFetcher::from_env(config.render_timeout())?;
            return Ok(Box::new(fetcher));
        }
        #[cfg(not(feature = "render"))]
        tracing::warn!("Rendering requested but this build lacks the `render` feature; using plain HTTP");
    }
    Ok(Box::new(HttpFetcher::new(
        config.request_timeout(),
        &config.user_agent,
    )?))
}
