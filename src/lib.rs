//! Booster-Crack: a small client for browsing card sets on Scryfall
//!
//! This crate drains Scryfall's cursor-paginated list endpoints into plain
//! vectors, builds the search locators for set-code queries, keeps a local
//! card collection with per-printing counts, and renders cards for export.

pub mod collection;
pub mod config;
pub mod fetch;
pub mod output;
pub mod paging;
pub mod query;
pub mod scryfall;

use thiserror::Error;

/// Main error type for Booster-Crack operations
#[derive(Debug, Error)]
pub enum CrackError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Collection error: {0}")]
    Collection(#[from] CollectionError),

    /// The retrieval itself failed (connection refused, DNS, timeout, ...)
    #[error("HTTP error for {locator}: {source}")]
    Transport {
        locator: String,
        source: reqwest::Error,
    },

    /// The upstream answered, but with a non-success status
    #[error("Scryfall API error: {status} {status_text}. URL: {locator}. Details: {details}")]
    UpstreamStatus {
        status: u16,
        status_text: String,
        locator: String,
        details: serde_json::Value,
    },

    /// The body could not be read as the expected shape
    #[error("Malformed page from {locator}: {message}")]
    MalformedPage { locator: String, message: String },

    #[error("Cannot fetch an empty locator")]
    EmptyLocator,

    #[error("Collection cancelled while fetching {locator}")]
    Cancelled { locator: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while building search locators
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("No set codes given")]
    NoSetCodes,

    #[error("Set code must be non-empty and alphanumeric, got '{0}'")]
    InvalidSetCode(String),

    #[error("Card identifier cannot be empty")]
    EmptyIdentifier,
}

/// Errors raised by the local card collection
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("No copies of {0} are in the collection")]
    NotInCollection(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid list name '{0}': use letters, digits, '-' and '_'")]
    InvalidListName(String),

    #[error("List already exists at {}", .0.display())]
    ListExists(std::path::PathBuf),

    #[error("No list named '{0}'")]
    ListNotFound(String),

    #[error("Could not determine the user configuration directory")]
    NoConfigDir,

    #[error("Collection file {} is not valid JSON: {source}", .path.display())]
    Json {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Booster-Crack operations
pub type Result<T> = std::result::Result<T, CrackError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for query construction
pub type QueryResult<T> = std::result::Result<T, QueryError>;

/// Result type alias for collection operations
pub type CollectionResult<T> = std::result::Result<T, CollectionError>;

// Re-export commonly used types
pub use collection::{Archive, CollectedCard, CollectionStore};
pub use config::Config;
pub use fetch::{Fetch, HttpFetcher, RawResponse};
pub use paging::{collect_all, collect_all_until, Page};
pub use scryfall::{Card, Ruling, ScryfallClient};
