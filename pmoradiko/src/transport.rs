//! Authenticated transport seam
//!
//! The resolver never talks to `reqwest` directly: every outbound request
//! goes through a [`Transport`], which also supplies the auth token. Both
//! network stages race the caller's [`CancellationToken`].

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::HeaderValue;
use reqwest::{Request, Response};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Sends requests on behalf of an already authenticated session
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a request, aborting with [`Error::Cancelled`] if `cancel` fires.
    ///
    /// Non-2xx statuses are reported as errors by the transport.
    async fn send(&self, request: Request, cancel: &CancellationToken) -> Result<Response>;

    /// Current auth token, if the session holds one
    fn auth_token(&self) -> Option<String>;
}

/// Run `future` unless `cancel` fires first.
///
/// Cancellation is polled first, so an already cancelled token never starts
/// the future.
pub async fn cancellable<T, F>(cancel: &CancellationToken, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        result = future => result,
    }
}

/// Read a whole response body, honoring cancellation.
///
/// The response is consumed whatever the outcome.
pub async fn read_body(response: Response, cancel: &CancellationToken) -> Result<Vec<u8>> {
    cancellable(cancel, async move {
        response
            .bytes()
            .await
            .map(|body| body.to_vec())
            .map_err(Error::from)
    })
    .await
}

/// Encode a header value, naming the header on failure
pub(crate) fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| Error::InvalidHeader(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancellable_passes_result_through() {
        let cancel = CancellationToken::new();
        let value = cancellable(&cancel, async { Ok(42) }).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_cancelled_token_skips_future() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let polled = AtomicBool::new(false);
        let result: Result<()> = cancellable(&cancel, async {
            polled.store(true, Ordering::SeqCst);
            Ok(())
        })
        .await;
        assert!(result.unwrap_err().is_cancelled());
        assert!(!polled.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_cancel_interrupts_pending_future() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let result: Result<()> = tokio::time::timeout(
            Duration::from_secs(2),
            cancellable(&cancel, std::future::pending()),
        )
        .await
        .expect("cancellation must be prompt");
        assert!(result.unwrap_err().is_cancelled());
    }
}
