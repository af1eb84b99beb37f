//! Retry loop for transient HTTP failures.

use std::time::Duration;

use log::{debug, warn};
use reqwest::header::RETRY_AFTER;
use reqwest::{RequestBuilder, Response, StatusCode};

/// HTTP statuses that signal a transient condition worth retrying.
const RETRYABLE_STATUS: [StatusCode; 2] = [
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::SERVICE_UNAVAILABLE,
];

/// Upper bound on the exponential backoff delay.
const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Sends a request, retrying on 429/503 responses and on transport errors.
///
/// `build_request` is invoked once per attempt: multipart bodies cannot be
/// reused after a send, so every attempt gets a freshly built request.
/// Retryability is purely status-driven: an error *response* with any other
/// status is returned as-is for the caller to classify. `max_retries` bounds
/// the retries, so up to `max_retries + 1` requests go out.
pub(crate) async fn send_with_retry<F>(
    operation_name: &str,
    build_request: F,
    max_retries: u32,
) -> reqwest::Result<Response>
where
    F: Fn() -> RequestBuilder,
{
    let mut attempt: u32 = 0;

    loop {
        match build_request().send().await {
            Ok(response) => {
                if !RETRYABLE_STATUS.contains(&response.status()) || attempt == max_retries {
                    return Ok(response);
                }

                // Prefer the server-mandated delay when it parses.
                let delay = retry_after(&response).unwrap_or_else(|| backoff(attempt));
                warn!(
                    "{}: attempt {}/{} got HTTP {}, retrying in {:?}...",
                    operation_name,
                    attempt + 1,
                    max_retries + 1,
                    response.status(),
                    delay
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                if attempt == max_retries {
                    return Err(e);
                }

                let delay = backoff(attempt);
                warn!(
                    "{}: attempt {}/{} failed ({}), retrying in {:?}...",
                    operation_name,
                    attempt + 1,
                    max_retries + 1,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
        }

        attempt += 1;
        debug!("{}: starting attempt {}", operation_name, attempt + 1);
    }
}

/// Delay requested by the server via `Retry-After`, if present and well-formed.
///
/// Only the delay-seconds form is recognized; an HTTP-date value falls back
/// to the computed backoff.
fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Exponential backoff: 1s, 2s, 4s, 8s, capped at [`MAX_BACKOFF`].
fn backoff(attempt: u32) -> Duration {
    let delay = Duration::from_millis(1000u64 << attempt.min(4));
    delay.min(MAX_BACKOFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_is_exponential() {
        assert_eq!(backoff(0), Duration::from_secs(1));
        assert_eq!(backoff(1), Duration::from_secs(2));
        assert_eq!(backoff(2), Duration::from_secs(4));
        assert_eq!(backoff(3), Duration::from_secs(8));
    }

    #[test]
    fn test_backoff_is_capped() {
        assert_eq!(backoff(4), Duration::from_secs(10));
        assert_eq!(backoff(30), Duration::from_secs(10));
        assert_eq!(backoff(u32::MAX), Duration::from_secs(10));
    }

    async fn response_with_status(
        server: &mut mockito::ServerGuard,
        status: usize,
        headers: &[(&str, &str)],
    ) -> Response {
        let mut mock = server.mock("GET", "/").with_status(status);
        for (name, value) in headers {
            mock = mock.with_header(*name, *value);
        }
        let _mock = mock.create_async().await;

        reqwest::Client::new()
            .get(server.url())
            .send()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_retry_after_parses_seconds() {
        let mut server = mockito::Server::new_async().await;
        let response = response_with_status(&mut server, 429, &[("Retry-After", "7")]).await;

        assert_eq!(retry_after(&response), Some(Duration::from_secs(7)));
    }

    #[tokio::test]
    async fn test_retry_after_missing() {
        let mut server = mockito::Server::new_async().await;
        let response = response_with_status(&mut server, 429, &[]).await;

        assert_eq!(retry_after(&response), None);
    }

    #[tokio::test]
    async fn test_retry_after_malformed() {
        let mut server = mockito::Server::new_async().await;
        let response = response_with_status(&mut server, 429, &[("Retry-After", "soon")]).await;

        assert_eq!(retry_after(&response), None);
    }

    #[tokio::test]
    async fn test_success_returns_without_retry() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let url = server.url();
        let response = send_with_retry("test", || client.get(&url), 3).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_retryable_status_returns_immediately() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(400)
            .expect(1)
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let url = server.url();
        let response = send_with_retry("test", || client.get(&url), 3).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_persistent_429_exhausts_budget_and_returns_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(429)
            .with_header("Retry-After", "0")
            .expect(3)
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let url = server.url();
        let response = send_with_retry("test", || client.get(&url), 2).await.unwrap();

        // The final failing response comes back as a response, not an error.
        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_zero_budget_returns_retryable_status_untouched() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(503)
            .expect(1)
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let url = server.url();
        let response = send_with_retry("test", || client.get(&url), 0).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_transport_error_surfaces_on_final_attempt() {
        // Bind and drop a listener so the port refuses connections.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = reqwest::Client::new();
        let url = format!("http://{}", addr);
        let result = send_with_retry("test", || client.get(&url), 0).await;

        assert!(result.is_err());
    }
}
