use thiserror::Error;

/// Failures of the prewarm collaborators.
///
/// The URL-building operations never return these; they only surface from
/// [`Fetcher`](crate::fetch::Fetcher) and [`WarmCache`](crate::cache::WarmCache)
/// implementations and are swallowed by the prewarm task.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {url} (retry after {retry_after_secs}s)")]
    RateLimited { url: String, retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("warm cache error: {0}")]
    Cache(String),
}
