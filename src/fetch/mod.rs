//! Fetch capability for the paged collector
//!
//! A [`Fetch`] performs exactly one retrieval and hands back the raw
//! response; it does not interpret the status. The collector receives the
//! capability by reference, so tests can drive it with an in-memory stub and
//! production code with [`HttpFetcher`].

mod http;

pub use http::{build_http_client, HttpFetcher};

use serde::de::DeserializeOwned;
use std::future::Future;

use crate::Result;

/// Raw outcome of a single retrieval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Canonical reason phrase for the status (may be empty)
    pub status_text: String,
    /// Response body, unparsed
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Builds a response from a status code and body
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("")
            .to_string();

        Self {
            status,
            status_text,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }
}

/// One network retrieval, given a locator
pub trait Fetch {
    fn fetch(&self, locator: &str) -> impl Future<Output = Result<RawResponse>> + Send;
}
