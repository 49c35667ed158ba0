//! HTTP fetcher with retry and linear backoff
//!
//! All network I/O goes through [`Fetcher`]. Every request carries the
//! configured User-Agent header; failed requests (network error or non-2xx
//! status) are retried up to the configured attempt count with a delay that
//! grows linearly between attempts.

use crate::config::ClientConfig;
use reqwest::Client;
use scraper::Html;
use thiserror::Error;
use url::Url;

/// Errors returned once the retry budget is exhausted
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed after {attempts} attempts: {source}")]
    Network {
        url: String,
        attempts: u32,
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status} after {attempts} attempts")]
    Status {
        url: String,
        status: u16,
        attempts: u32,
    },
}

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL the page was fetched from
    pub url: Url,

    /// Raw response body
    pub body: String,
}

impl FetchedPage {
    /// Parses the body into a traversable document
    ///
    /// html5ever parsing is lenient and never fails outright; absence of
    /// expected structure is surfaced later by the extractors.
    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }
}

/// Issues GET requests with a fixed identification header and retry logic
///
/// The fetcher holds no mutable state; it can be shared freely behind an
/// `Arc` across frontier branches and workers.
pub struct Fetcher {
    client: Client,
    max_retries: u32,
    retry_delay: std::time::Duration,
}

impl Fetcher {
    /// Builds a fetcher from an immutable client configuration
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries.max(1),
            retry_delay: config.retry_delay,
        })
    }

    /// Fetches a URL, retrying on network error or non-success status
    ///
    /// The delay before retry n is `retry_delay * n`, so with the default
    /// one-second base the waits are 1s then 2s. After the final attempt the
    /// last failure is returned as a [`FetchError`].
    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self.try_fetch(url).await {
                Ok(body) => {
                    return Ok(FetchedPage {
                        url: url.clone(),
                        body,
                    });
                }
                Err(error) if attempt < self.max_retries => {
                    tracing::warn!(
                        "attempt {}/{} for {} failed: {}, retrying",
                        attempt,
                        self.max_retries,
                        url,
                        error
                    );
                    tokio::time::sleep(self.retry_delay * attempt).await;
                }
                Err(Attempt::Network(source)) => {
                    return Err(FetchError::Network {
                        url: url.to_string(),
                        attempts: attempt,
                        source,
                    });
                }
                Err(Attempt::Status(status)) => {
                    return Err(FetchError::Status {
                        url: url.to_string(),
                        status,
                        attempts: attempt,
                    });
                }
            }
        }
    }

    /// One request attempt: GET, check status, read body
    async fn try_fetch(&self, url: &Url) -> Result<String, Attempt> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(Attempt::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Attempt::Status(status.as_u16()));
        }

        response.text().await.map_err(Attempt::Network)
    }
}

/// Per-attempt failure, before retry classification
#[derive(Debug)]
enum Attempt {
    Network(reqwest::Error),
    Status(u16),
}

impl std::fmt::Display for Attempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Attempt::Network(e) => write!(f, "{}", e),
            Attempt::Status(status) => write!(f, "HTTP {}", status),
        }
    }
}
