use std::time::Duration;

use spider_client::shapes::request::{RequestType, ReturnFormat, ReturnFormatHandling};
use spider_client::{RequestParams, Spider};
use tokio::runtime::Runtime;
use tracing::debug;

use super::Fetcher;
use crate::error::FetchError;

/// Fetches pages through spider.cloud's headless Chrome so client-side
/// scripts run before the HTML is returned. The async client is driven on a
/// private current-thread runtime, so `fetch` blocks like the HTTP fetcher.
pub struct RenderFetcher {
    spider: Spider,
    runtime: Runtime,
    timeout: Duration,
}

impl RenderFetcher {
    pub fn from_env(timeout: Duration) -> Result<Self, FetchError> {
        let api_key = std::env::var("SPIDER_API_KEY").map_err(|_| {
            FetchError::Render("SPIDER_API_KEY environment variable must be set".into())
        })?;
        let spider = Spider::new(Some(api_key))
            .map_err(|e| FetchError::Render(format!("failed to create Spider client: {}", e)))?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| FetchError::Render(e.to_string()))?;
        Ok(Self {
            spider,
            runtime,
            timeout,
        })
    }
}

impl Fetcher for RenderFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let params = RequestParams {
            return_format: Some(ReturnFormatHandling::Single(ReturnFormat::Raw)),
            request: Some(RequestType::Chrome),
            ..Default::default()
        };

        let response = self
            .runtime
            .block_on(async {
                tokio::time::timeout(
                    self.timeout,
                    self.spider.scrape_url(url, Some(params), "application/json"),
                )
                .await
            })
            .map_err(|_| FetchError::RenderTimeout(self.timeout.as_secs()))?
            .map_err(|e| FetchError::Render(e.to_string()))?;

        // The body may come back as a JSON-encoded string rather than a value.
        let parsed: serde_json::Value = match response.as_str() {
            Some(s) => serde_json::from_str(s).unwrap_or(response.clone()),
            None => response,
        };

        let html = parsed
            .as_array()
            .and_then(|arr| arr.first())
            .and_then(|obj| obj.get("content"))
            .and_then(|c| c.as_str())
            .map(str::to_string)
            .ok_or_else(|| FetchError::Render(format!("no content in render response for {}", url)))?;

        debug!("Rendered {} bytes from {}", html.len(), url);
        Ok(html)
    }
}
