use crate::types::{CollectorError, FetchConfig, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Thin HTTP wrapper owning one `reqwest::Client`.
///
/// Each collector builds its own `Fetcher`; nothing is shared across
/// collector instances. The client timeout bounds every `fetch_text` call,
/// so a hanging feed cannot stall the rest of the run.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Fetches a URL and returns its body as text. Timeouts are reported
    /// with a timeout-specific message; non-2xx statuses are fetch errors.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!(%url, "fetching");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollectorError::Fetch(format!(
                "HTTP {} for {url}",
                status.as_u16()
            )));
        }

        let body = response.text().await.map_err(|e| self.classify(url, e))?;
        debug!(%url, bytes = body.len(), "fetched");
        Ok(body)
    }

    fn classify(&self, url: &str, error: reqwest::Error) -> CollectorError {
        if error.is_timeout() {
            CollectorError::Fetch(format!(
                "request timed out after {}s: {url}",
                self.config.timeout_seconds
            ))
        } else {
            CollectorError::Http(error)
        }
    }
}
