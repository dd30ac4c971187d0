//! Error classification for plan service responses.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::Deserialize;

/// Maximum number of attempts for transient network failures.
pub const MAX_RETRIES: usize = 3;

/// Delay between attempts in milliseconds.
pub const RETRY_DELAY_MS: u64 = 1000;

/// Error body returned by the plan service: `{"error": "...", "retry_after": 12}`.
#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    retry_after: Option<u64>,
}

/// Errors surfaced by the plan service.
#[derive(Debug)]
pub enum ApiError {
    /// HTTP 429. The server may say how long to wait before retrying.
    RateLimited {
        message: String,
        retry_after: Option<u64>,
    },
    /// Any other non-2xx response.
    Server { status: u16, message: String },
}

impl ApiError {
    /// Whether the transport layer should retry this error on its own.
    /// Only 5xx responses qualify; rate limits are owned by the caller's
    /// countdown, and other client errors won't succeed on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::RateLimited { .. } => false,
            ApiError::Server { status, .. } => *status >= 500,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::RateLimited { message, .. } => {
                write!(f, "Rate limit exceeded: {}. Try again later.", message)
            }
            ApiError::Server { status, message } => {
                write!(f, "Request failed (HTTP {}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Extracts the wait duration in seconds from a `Retry-After` header, if
/// present. HTTP-date values are not supported by the plan service and
/// yield `None`.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    headers.get(RETRY_AFTER)?.to_str().ok()?.trim().parse().ok()
}

/// Classifies a non-2xx response into an [`ApiError`].
///
/// The user-facing message comes from a JSON `{"error"}` body when the
/// service sends one, falling back to the raw body text, falling back to
/// the status reason. For 429 responses the wait duration is taken from
/// the body's `retry_after` field, with the `Retry-After` header as a
/// fallback.
pub fn classify_response(
    status: StatusCode,
    retry_after_header: Option<u64>,
    body: &str,
) -> ApiError {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok();

    let message = parsed
        .as_ref()
        .map(|b| b.error.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            let text = body.trim();
            if text.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                text.to_string()
            }
        });

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = parsed.and_then(|b| b.retry_after).or(retry_after_header);
        ApiError::RateLimited {
            message,
            retry_after,
        }
    } else {
        ApiError::Server {
            status: status.as_u16(),
            message,
        }
    }
}
