//! Bounded retry loop around API calls
//!
//! An attempt returns `Ok(value)`, [`RetryDecision::Retry`] for a transient failure
//! or [`RetryDecision::Fatal`] to abort at once. [`retry`] keeps re-running the
//! attempt with exponential backoff until it succeeds, fails fatally, or the next
//! sleep would overrun the timeout.

use std::future::Future;
use std::time::Duration;

use tencentcloud_sdk::SdkError;
use tokio::time::Instant;

use crate::error::{ProviderError, ProviderResult};

/// Budget for describe calls.
pub const READ_RETRY_TIMEOUT: Duration = Duration::from_secs(3 * 60);
/// Budget for mutating calls.
pub const WRITE_RETRY_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Error codes retried on every call. A listed category (`FailedOperation`) also
/// covers its sub-codes (`FailedOperation.Xxx`).
pub const RETRYABLE_CODES: &[&str] = &[
    "ClientError.NetworkError",
    "ClientError.HttpStatusCodeError",
    "FailedOperation",
    "TradeUnknownError",
    "RequestLimitExceeded",
    "ResourceInUse",
    "ResourceInsufficient",
    "ResourceUnavailable",
    "ResourceBusy",
];

const MAX_RETRY_AFTER_SECS: u64 = 30;
const MAX_BACKOFF_MS: u64 = 10_000;

/// Outcome of a failed attempt.
#[derive(Debug)]
pub enum RetryDecision {
    Retry(ProviderError),
    Fatal(ProviderError),
}

impl RetryDecision {
    /// Abort with `err`.
    pub fn fatal(err: impl Into<ProviderError>) -> Self {
        Self::Fatal(err.into())
    }

    pub fn into_error(self) -> ProviderError {
        match self {
            Self::Retry(e) | Self::Fatal(e) => e,
        }
    }
}

impl From<ProviderError> for RetryDecision {
    /// Classify with the default retryable code list.
    fn from(err: ProviderError) -> Self {
        classify(err, &[])
    }
}

impl From<SdkError> for RetryDecision {
    fn from(err: SdkError) -> Self {
        classify(ProviderError::Sdk(err), &[])
    }
}

/// Result of a single attempt.
pub type Attempt<T> = std::result::Result<T, RetryDecision>;

/// `true` when `code` is listed in [`RETRYABLE_CODES`] or `extra`, either exactly or
/// by its category before the first `.`.
pub fn is_retryable_code(code: &str, extra: &[&str]) -> bool {
    let listed = |c: &str| RETRYABLE_CODES.contains(&c) || extra.contains(&c);
    if listed(code) {
        return true;
    }
    code.split_once('.').is_some_and(|(category, _)| listed(category))
}

/// Decide whether `err` is worth another attempt.
///
/// Network errors, timeouts, and throttling are always retried. API errors are
/// retried when their code matches [`RETRYABLE_CODES`] or `extra`.
pub fn classify(err: impl Into<ProviderError>, extra: &[&str]) -> RetryDecision {
    let err = err.into();
    let retryable = match &err {
        ProviderError::Sdk(
            SdkError::NetworkError { .. } | SdkError::Timeout { .. } | SdkError::RateLimited { .. },
        ) => true,
        ProviderError::Sdk(SdkError::Api { error_code, .. }) => is_retryable_code(error_code, extra),
        _ => false,
    };
    if retryable {
        RetryDecision::Retry(err)
    } else {
        RetryDecision::Fatal(err)
    }
}

/// Run `attempt` until it succeeds, fails fatally, or `timeout` is exhausted.
///
/// Exhaustion yields [`ProviderError::RetryTimeout`] carrying the last error.
pub async fn retry<T, F, Fut>(timeout: Duration, mut attempt: F) -> ProviderResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Attempt<T>>,
{
    let deadline = Instant::now() + timeout;
    let mut failures: u32 = 0;

    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(RetryDecision::Fatal(e)) => return Err(e),
            Err(RetryDecision::Retry(e)) => {
                let delay = retry_delay(&e, failures);
                if Instant::now() + delay > deadline {
                    log::error!("Retry budget of {}s exhausted: {e}", timeout.as_secs());
                    return Err(ProviderError::RetryTimeout {
                        timeout_secs: timeout.as_secs(),
                        last: Box::new(e),
                    });
                }
                failures += 1;
                log::warn!(
                    "Attempt {failures} failed, retrying in {:.1}s: {e}",
                    delay.as_secs_f32()
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Retry one SDK call, classifying its errors with `extra` retryable codes.
pub async fn retry_call<T, F, Fut>(timeout: Duration, extra: &[&str], mut call: F) -> ProviderResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = tencentcloud_sdk::Result<T>>,
{
    retry(timeout, || {
        let fut = call();
        async move { fut.await.map_err(|e| classify(e, extra)) }
    })
    .await
}

/// Like [`retry_call`], but an API error whose code matches one of `absent`
/// (exactly or by category) yields `Ok(None)` instead of an error.
pub async fn retry_lookup<T, F, Fut>(
    timeout: Duration,
    absent: &[&str],
    extra: &[&str],
    mut call: F,
) -> ProviderResult<Option<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = tencentcloud_sdk::Result<T>>,
{
    retry(timeout, || {
        let fut = call();
        async move {
            match fut.await {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    let err = ProviderError::Sdk(e);
                    if absent.iter().any(|code| err.has_code(code)) {
                        log::debug!("Treating '{err}' as absent");
                        Ok(None)
                    } else {
                        Err(classify(err, extra))
                    }
                }
            }
        }
    })
    .await
}

/// Delay before the next attempt
///
/// A throttled response with `Retry-After` waits that long (capped at 30s); anything
/// else backs off exponentially.
fn retry_delay(error: &ProviderError, failures: u32) -> Duration {
    if let ProviderError::Sdk(SdkError::RateLimited {
        retry_after: Some(secs),
        ..
    }) = error
    {
        Duration::from_secs((*secs).min(MAX_RETRY_AFTER_SECS))
    } else {
        backoff_delay(failures)
    }
}

/// 100ms, 200ms, 400ms, ... capped at 10s.
fn backoff_delay(failures: u32) -> Duration {
    let capped = failures.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped);
    Duration::from_millis(delay_ms.min(MAX_BACKOFF_MS))
}
