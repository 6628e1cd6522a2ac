//! Shared request dispatch with logging and bounded retry.
//!
//! Every endpoint funnels through [`send_request_with_retry`], which is
//! the single place where outbound requests are logged, HTTP 429 is
//! retried with exponential backoff, and non-success statuses are turned
//! into [`ClientError::ApiError`] with the response body preserved.

use reqwest::{RequestBuilder, Response};
use tracing::debug;

use crate::error::{ClientError, Result};

/// Maximum number of retry attempts when the caller passes zero.
const DEFAULT_MAX_RETRIES: usize = 3;

/// Sends an HTTP request, retrying HTTP 429 with exponential backoff.
///
/// Backoff is `2^attempt` seconds (1s, 2s, 4s). All other non-success
/// statuses fail immediately with the response body as the message.
/// `path` and `method` are only used for logging.
///
/// # Errors
///
/// Returns `ClientError::MaxRetriesExceeded` when retries are exhausted,
/// `ClientError::ApiError` for non-2xx responses, and propagates
/// transport errors as `ClientError::HttpError`.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
    path: &str,
    method: &str,
) -> Result<Response> {
    let max_retries = if max_retries == 0 {
        DEFAULT_MAX_RETRIES
    } else {
        max_retries
    };

    debug!(method, path, "sending request");

    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                // Streaming bodies cannot be cloned; single attempt only.
                if attempt == 0 {
                    debug!(method, path, "request body not clonable, single attempt");
                    let response = builder.send().await?;
                    return check_status(response).await;
                } else {
                    return Err(ClientError::MaxRetriesExceeded(attempt));
                }
            }
        };

        match attempt_builder.send().await {
            Ok(response) if response.status().as_u16() == 429 => {
                if attempt < max_retries {
                    let backoff_secs = 2u64.pow(attempt as u32);
                    debug!(
                        method,
                        path,
                        attempt = attempt + 1,
                        backoff_secs,
                        "rate limited (HTTP 429), retrying"
                    );
                    tokio::time::sleep(tokio::time::Duration::from_secs(backoff_secs)).await;
                } else {
                    debug!(method, path, attempts = attempt + 1, "retries exhausted");
                    return Err(ClientError::MaxRetriesExceeded(max_retries + 1));
                }
            }
            Ok(response) => {
                if attempt > 0 {
                    debug!(method, path, attempt = attempt + 1, "request succeeded after retry");
                }
                return check_status(response).await;
            }
            Err(e) => return Err(ClientError::from(e)),
        }
    }

    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}

/// Convert a non-success response into an `ApiError`, keeping the body.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        debug!(status = status.as_u16(), url = %response.url(), "response received");
        return Ok(response);
    }

    let status = status.as_u16();
    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    let message = extract_error_message(&body);
    debug!(status, url = %url, "request failed");

    Err(ClientError::ApiError {
        status,
        url,
        message,
    })
}

/// Best-effort extraction of a message string from an error body.
///
/// The backend's error schema is not pinned down; look for common
/// `error`/`message` fields and fall back to the raw body.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message", "detail"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    body.to_string()
}
