//! HTTPS client for the Mars rover photos API
//!
//! Issues one GET per query and classifies every failure into the error taxonomy.

use crate::{photos::PhotoSet, query::Query, rover::Rover, Error, Result};
use reqwest::{Client, ClientBuilder, StatusCode};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Anything that can answer a photo query
///
/// The selector only depends on this trait so tests can script responses.
pub trait PhotoSource {
    fn fetch(&self, rover: Rover, query: &Query) -> impl Future<Output = Result<PhotoSet>>;
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Service root, e.g. `https://api.nasa.gov/mars-photos/api/v1`
    pub base_url: Url,
    /// API key appended to every request
    pub api_key: String,
    /// Request timeout
    pub timeout: Duration,
}

impl FetcherConfig {
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client for the photos endpoint
pub struct ApiClient {
    client: Client,
    config: FetcherConfig,
}

impl ApiClient {
    /// Create a new client with configuration
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .use_rustls_tls()
            .build()
            .map_err(|e| Error::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Build request URL with query parameters
    fn build_request_url(&self, rover: Rover, query: &Query) -> Result<Url> {
        let raw = format!(
            "{}/rovers/{}/photos",
            self.config.base_url.as_str().trim_end_matches('/'),
            rover
        );
        let mut url = Url::parse(&raw)
            .map_err(|e| Error::Config(format!("Invalid request URL '{}': {}", raw, e)))?;

        url.query_pairs_mut()
            .extend_pairs(query.to_pairs(&self.config.api_key));

        Ok(url)
    }

    /// Map a transport error onto the taxonomy
    fn classify_transport(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Network(format!(
                "Request timeout after {} seconds",
                self.config.timeout.as_secs()
            ))
        } else if err.is_connect() {
            Error::Network(
                "Failed to connect to NASA API. Check your internet connection.".to_string(),
            )
        } else {
            Error::Network(format!("Request failed: {}", err))
        }
    }

    /// Get client configuration
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }
}

impl PhotoSource for ApiClient {
    #[instrument(skip(self, query), fields(rover = %rover, query = ?query.key))]
    async fn fetch(&self, rover: Rover, query: &Query) -> Result<PhotoSet> {
        let url = self.build_request_url(rover, query)?;

        // The key is part of the query string, keep it out of the logs
        debug!(path = url.path(), "Requesting photos");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "Photos request rejected");
            return Err(status_error(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.classify_transport(e))?;

        let photos = PhotoSet::from_json(&body)?;
        debug!(count = photos.len(), "Received photos");
        Ok(photos)
    }
}

fn status_error(status: StatusCode) -> Error {
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            Error::Api("API rate limit exceeded. Please try again later.".to_string())
        }
        StatusCode::NOT_FOUND => Error::Api("Rover or endpoint not found.".to_string()),
        other => Error::Api(format!("HTTP error {}", other)),
    }
}
