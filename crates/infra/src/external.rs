//! Outbound HTTP client for the external-API proxy.

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;
use tracing::instrument;

#[derive(Debug, Error)]
pub enum ExternalApiError {
    /// The requested endpoint is empty or tries to leave the configured base URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The upstream answered with a non-success status.
    #[error("upstream returned {status}")]
    Status { status: u16, body: String },

    /// The request could not be completed (connect, timeout, body read).
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Body and content type of a successful upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalResponse {
    pub content_type: Option<String>,
    pub body: String,
}

/// GET-only client bound to one base URL.
#[derive(Debug, Clone)]
pub struct ExternalApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ExternalApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ExternalApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for `endpoint` (plus an optional raw query string), or
    /// `InvalidEndpoint` if it would leave the base URL.
    ///
    /// The joined URL is parsed and normalized before the check, so encoded
    /// dot segments (`%2e%2e`) cannot climb above the base path either.
    pub fn url_for(&self, endpoint: &str, query: Option<&str>) -> Result<Url, ExternalApiError> {
        let endpoint = endpoint.trim().trim_start_matches('/');
        let invalid = || ExternalApiError::InvalidEndpoint(endpoint.to_string());

        let rejected = endpoint.is_empty()
            || endpoint.contains("://")
            || endpoint.contains('\\')
            || endpoint.split('/').any(is_parent_segment);
        if rejected {
            return Err(invalid());
        }

        let base = Url::parse(&self.base_url).map_err(|_| invalid())?;
        let mut url = Url::parse(&format!("{}/{}", self.base_url, endpoint)).map_err(|_| invalid())?;

        let base_path = format!("{}/", base.path().trim_end_matches('/'));
        if url.origin() != base.origin() || !url.path().starts_with(&base_path) {
            return Err(invalid());
        }

        url.set_query(query.filter(|q| !q.is_empty()));
        Ok(url)
    }

    /// GET `{base_url}/{endpoint}[?query]` and return the body. Non-2xx is an error.
    #[instrument(skip(self), err)]
    pub async fn get(
        &self,
        endpoint: &str,
        query: Option<&str>,
    ) -> Result<ExternalResponse, ExternalApiError> {
        let url = self.url_for(endpoint, query)?;
        let response = self.http.get(url).send().await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ExternalApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(ExternalResponse { content_type, body })
    }
}

/// `..`, in any mix of literal and percent-encoded dots.
fn is_parent_segment(segment: &str) -> bool {
    matches!(
        segment.to_ascii_lowercase().as_str(),
        ".." | ".%2e" | "%2e." | "%2e%2e"
    )
}
