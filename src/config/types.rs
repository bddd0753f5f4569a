use crate::output::OutputFormat;
use serde::Deserialize;
use std::path::PathBuf;

/// Default Scryfall API root
pub const DEFAULT_BASE_URL: &str = "https://api.scryfall.com";

/// Main configuration structure for Booster-Crack
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub collection: CollectionConfig,
}

/// Upstream API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Root of the card-data API, e.g. `https://api.scryfall.com`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Deadline for a single retrieval, in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Deadline for establishing a connection, in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("booster-crack/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Format used when the command line does not pick one
    #[serde(default)]
    pub format: OutputFormat,
}

/// Local collection configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionConfig {
    /// Directory holding `collection.json` and named lists; defaults to the
    /// user configuration directory
    #[serde(default)]
    pub directory: Option<PathBuf>,
}
