//! HTTP fetcher implementation
//!
//! This module performs the actual network retrievals:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests that return the raw status and body
//! - Transport error classification for logging

use crate::config::ApiConfig;
use crate::fetch::{Fetch, RawResponse};
use crate::{CrackError, Result};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The API configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use booster_crack::config::ApiConfig;
/// use booster_crack::fetch::build_http_client;
///
/// let client = build_http_client(&ApiConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ApiConfig) -> std::result::Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .https_only(config.base_url.starts_with("https://"))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetch capability backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from the API configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = build_http_client(config).map_err(|source| CrackError::Transport {
            locator: config.base_url.clone(),
            source,
        })?;
        Ok(Self { client })
    }

    /// Wraps an already configured client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, locator: &str) -> Result<RawResponse> {
        tracing::debug!(locator, "GET");

        let response = match self.client.get(locator).send().await {
            Ok(response) => response,
            Err(source) => {
                tracing::debug!(locator, kind = classify(&source), "request failed");
                return Err(CrackError::Transport {
                    locator: locator.to_string(),
                    source,
                });
            }
        };

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| CrackError::Transport {
                locator: locator.to_string(),
                source,
            })?;

        tracing::debug!(locator, status = status.as_u16(), bytes = body.len(), "response");

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            body: body.to_vec(),
        })
    }
}

/// Short label for a transport failure
fn classify(error: &reqwest::Error) -> &'static str {
    if error.is_timeout() {
        "timeout"
    } else if error.is_connect() {
        "connect"
    } else if error.is_builder() {
        "invalid request"
    } else {
        "other"
    }
}
