//! HTTP client with built-in retry logic and error handling.

use anyhow::{Context, Result};
use log::{debug, warn};
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::retry::{ApiError, MAX_RETRIES, RETRY_DELAY_MS, classify_response, parse_retry_after};

/// HTTP client with built-in retry logic for network operations.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Performs a POST request with a JSON body and deserializes the JSON
    /// response. Automatically retries on transient errors.
    #[tracing::instrument(skip(self, body))]
    pub async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        debug!("POST JSON to {}...", url);

        self.with_retry("POST JSON", || async {
            let response = self
                .client
                .post(url)
                .json(body)
                .send()
                .await
                .context("Failed to send request")?;

            read_json_response(response).await
        })
        .await
    }

    /// Performs a GET request and deserializes the JSON response.
    /// Automatically retries on transient errors.
    #[tracing::instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET JSON from {}...", url);

        self.with_retry("GET JSON", || async {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .context("Failed to send request")?;

            read_json_response(response).await
        })
        .await
    }

    /// Executes an async operation with retry logic.
    async fn with_retry<F, Fut, T>(&self, operation_name: &str, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut last_error = None;

        for attempt in 1..=MAX_RETRIES {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if !is_retryable_error(&e) {
                        debug!("{}: non-retryable error: {}", operation_name, e);
                        return Err(e);
                    }

                    if attempt < MAX_RETRIES {
                        warn!(
                            "{}: attempt {}/{} failed ({}), retrying in {}ms...",
                            operation_name, attempt, MAX_RETRIES, e, RETRY_DELAY_MS
                        );
                        tokio::time::sleep(std::time::Duration::from_millis(RETRY_DELAY_MS)).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            anyhow::anyhow!("{}: failed after {} attempts", operation_name, MAX_RETRIES)
        }))
    }
}

/// Reads a response, mapping non-2xx statuses to [`ApiError`] with the
/// user-facing message and rate-limit wait extracted from body and headers.
async fn read_json_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .context("Failed to parse JSON response");
    }

    let retry_after_header = parse_retry_after(response.headers());
    let body = response.text().await.unwrap_or_default();
    Err(classify_response(status, retry_after_header, &body).into())
}

/// Checks if an anyhow::Error is retryable based on its content.
fn is_retryable_error(e: &anyhow::Error) -> bool {
    match e.downcast_ref::<ApiError>() {
        Some(api_error) => api_error.is_transient(),
        // Transport errors (connection, timeout, dns) are retryable.
        None => true,
    }
}
