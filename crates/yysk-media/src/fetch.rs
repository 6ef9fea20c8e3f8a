//! HTTP GET collaborator used by the prewarm task.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use yysk_core::AppConfig;

use crate::error::MediaError;
use crate::retry::retry_with_backoff;

/// Status and body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issue a GET with the given extra headers.
    ///
    /// Implementations return `Err` for non-2xx statuses.
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<FetchResponse, MediaError>;
}

/// [`Fetcher`] backed by `reqwest`.
///
/// 429 and network failures are retried with exponential backoff, as are 5xx
/// statuses; other non-2xx statuses fail immediately.
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl HttpFetcher {
    /// # Errors
    ///
    /// Returns [`MediaError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, MediaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// # Errors
    ///
    /// Returns [`MediaError::Http`] if the client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, MediaError> {
        Self::new(
            config.prewarm_timeout_secs,
            &config.prewarm_user_agent,
            config.prewarm_max_retries,
            config.prewarm_backoff_base_secs,
        )
    }

    async fn get_once(&self, url: &str, headers: &[(&str, &str)]) -> Result<FetchResponse, MediaError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(MediaError::RateLimited {
                url: url.to_owned(),
                retry_after_secs,
            });
        }

        if !status.is_success() {
            return Err(MediaError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        Ok(FetchResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<FetchResponse, MediaError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            self.get_once(url, headers)
        })
        .await
    }
}
