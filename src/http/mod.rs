//! HTTP client module with retry logic and error handling.

mod client;
mod retry;

pub use client::HttpClient;
pub use retry::{ApiError, MAX_RETRIES, RETRY_DELAY_MS, classify_response, parse_retry_after};
