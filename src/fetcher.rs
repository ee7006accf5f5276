//! HTTP content fetcher for the page and its scripts.

use crate::types::{FetchError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, trace};

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Single-shot GET fetcher. Cheap to share: the underlying client pools connections.
#[derive(Debug, Clone)]
pub struct ContentFetcher {
    client: Client,
    user_agent: String,
    timeout: Duration,
}

impl ContentFetcher {
    /// Create a fetcher sending `user_agent` and giving up after `timeout`.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
            timeout,
        })
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch `url` and return its body as text. Never retries.
    pub async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        trace!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus {
                code: status.as_u16(),
            });
        }

        let content = response.text().await.map_err(classify)?;
        debug!("Fetched {} ({} bytes)", url, content.len());
        Ok(content)
    }
}

/// Map a reqwest error onto the fetch failure taxonomy.
fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_builder() {
        FetchError::InvalidUrl {
            cause: err.to_string(),
        }
    } else {
        FetchError::Network {
            cause: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_creation() {
        let fetcher = ContentFetcher::new(DEFAULT_USER_AGENT, Duration::from_secs(DEFAULT_TIMEOUT_SECS)).unwrap();
        assert_eq!(fetcher.user_agent(), "Mozilla/5.0");
        assert_eq!(fetcher.timeout(), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_unsupported_scheme_is_invalid_url() {
        let fetcher = ContentFetcher::new(DEFAULT_USER_AGENT, Duration::from_secs(1)).unwrap();
        let err = fetcher.fetch("ftp://example.com/lib.js").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop to get a port nothing listens on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let fetcher = ContentFetcher::new(DEFAULT_USER_AGENT, Duration::from_secs(2)).unwrap();
        let err = fetcher
            .fetch(&format!("http://127.0.0.1:{}/lib.js", port))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Network { .. }), "got {:?}", err);
    }
}
