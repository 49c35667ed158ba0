//! Crawler configuration values
//!
//! Both configuration types are immutable values constructed once at startup
//! and injected into the components that need them. There is no ambient
//! global state: the HTTP client is built from a [`ClientConfig`], and the
//! pipeline shape (worker count, queue capacity) comes from a [`CrawlConfig`].

use std::time::Duration;

/// User-Agent header sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration for the HTTP client and its retry behavior
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User-Agent header value sent with every request
    pub user_agent: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// Maximum number of attempts per URL (first try included)
    pub max_retries: u32,

    /// Base delay before a retry; the delay before retry n is `retry_delay * n`
    /// (linear growth: 1s, 2s, ... with the default base)
    pub retry_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}

/// Configuration for the crawl pipeline shape
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Number of concurrent workers fetching and extracting post pages
    pub workers: usize,

    /// Capacity of the work and results queues; a full work queue blocks the
    /// frontier (backpressure) until workers catch up
    pub queue_capacity: usize,

    /// Maximum number of frontier branches fetching listing pages at once
    pub max_concurrent_branches: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            workers: 5,
            queue_capacity: 100,
            max_concurrent_branches: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.retry_delay, Duration::from_secs(1));
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_crawl_config_defaults() {
        let config = CrawlConfig::default();
        assert_eq!(config.workers, 5);
        assert_eq!(config.queue_capacity, 100);
        assert!(config.max_concurrent_branches > 0);
    }
}
