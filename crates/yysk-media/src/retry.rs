//! Exponential backoff for prewarm requests.
//!
//! Only transient failures are retried; anything else is returned at once so
//! a broken warm-up gives up quickly.

use std::future::Future;
use std::time::Duration;

use crate::error::MediaError;

/// Retriable errors:
/// - [`MediaError::RateLimited`]: HTTP 429.
/// - [`MediaError::Http`]: connection or timeout failures.
/// - [`MediaError::UnexpectedStatus`] with a 5xx status.
fn is_retriable(err: &MediaError) -> bool {
    match err {
        MediaError::RateLimited { .. } | MediaError::Http(_) => true,
        MediaError::UnexpectedStatus { status, .. } => *status >= 500,
        MediaError::Cache(_) => false,
    }
}

/// Executes `operation`, retrying transient errors up to `max_retries`
/// additional times.
///
/// The wait before the n-th retry is `backoff_base_secs * 2^(n-1)` seconds.
/// With `max_retries = 0` the operation runs exactly once.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, MediaError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, MediaError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient prewarm error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
