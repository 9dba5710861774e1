use reqwest::{header, Client};
use tokio::time::sleep;

use crate::config::FetchConfig;
use crate::error::{Error, Result};

/// HTTP client for the job feed with a fixed-delay retry policy.
pub struct FeedClient {
    client: Client,
    config: FetchConfig,
}

impl FeedClient {
    pub fn new(user_agent: &str, config: FetchConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_str(user_agent)?);
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static(
                "application/rss+xml, application/xml;q=0.9, text/xml;q=0.8, */*;q=0.5",
            ),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    /// Downloads `url`, retrying network failures and error statuses up to
    /// `max_attempts` times in total with `backoff` between attempts.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    tracing::warn!(
                        "Attempt {}/{} failed: {}. Retrying in {:?}",
                        attempt,
                        max_attempts,
                        e,
                        self.config.backoff
                    );
                    sleep(self.config.backoff).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!("Fetching {} failed after {} attempt(s): {}", url, attempt, e);
                    return Err(e);
                }
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::FeedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
