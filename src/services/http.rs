// src/services/http.rs
use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use thiserror::Error;

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned {status}")]
    Status { url: String, status: StatusCode },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("No data for {0}")]
    NotFound(String),
}

/// Builds the client shared by every outbound fetch.
///
/// Compression is negotiated by reqwest itself; connections are pooled across calls.
pub fn build_client() -> Result<Client, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );

    let client = Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .default_headers(headers)
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    Ok(client)
}

/// Sends the request and turns any non-2xx status into [`FetchError::Status`].
pub async fn fetch_text(request: reqwest::RequestBuilder) -> Result<String, FetchError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: response.url().to_string(),
            status,
        });
    }
    Ok(response.text().await?)
}
