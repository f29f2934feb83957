use std::future::Future;
use std::time::Duration;

use crate::error::{ClientError, Result};

const MAX_ATTEMPTS: u32 = 3;
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// Runs `operation` up to three times, doubling the delay between attempts.
///
/// Only transport failures are retried. Errors the server itself produced
/// (not-found, conflicts, validation rejections) are returned on the first
/// attempt: repeating those requests cannot change the answer.
pub async fn with_retry<T, F, Fut>(operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut backoff = INITIAL_BACKOFF;
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(ClientError::RequestError(e)) if attempt < MAX_ATTEMPTS => {
                tracing::warn!(
                    "Request failed (attempt {}/{}), retrying in {:?}: {}",
                    attempt,
                    MAX_ATTEMPTS,
                    backoff,
                    e
                );
                tokio::time::sleep(backoff).await;
                backoff *= 2;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_first_success_makes_one_attempt() {
        let calls = AtomicU32::new(0);

        let result: Result<u32> = with_retry(|| {
            let calls = &calls;
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(7)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_api_errors_are_not_retried() {
        let calls = AtomicU32::new(0);

        let result: Result<u32> = with_retry(|| {
            let calls = &calls;
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ClientError::ApiError {
                    status: 404,
                    message: "Competition not found".to_string(),
                    errors: Vec::new(),
                })
            }
        })
        .await;

        assert!(matches!(
            result,
            Err(ClientError::ApiError { status: 404, .. })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transport_failures_exhaust_all_attempts() {
        let calls = AtomicU32::new(0);
        let client = reqwest::Client::new();

        // Nothing listens on port 1, so every attempt fails at connect time.
        let result: Result<u32> = with_retry(|| {
            let calls = &calls;
            let client = &client;
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                client.get("http://127.0.0.1:1/").send().await?;
                Ok(0)
            }
        })
        .await;

        assert!(matches!(result, Err(ClientError::RequestError(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
