use crate::config::types::{ApiConfig, CollectionConfig, Config};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_collection_config(&config.collection)?;
    Ok(())
}

/// Validates the collection directory, when one is set
fn validate_collection_config(config: &CollectionConfig) -> Result<(), ConfigError> {
    if let Some(directory) = &config.directory {
        if directory.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "collection directory cannot be empty".to_string(),
            ));
        }
    }
    Ok(())
}

/// Validates upstream API configuration
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    validate_base_url(&config.base_url)?;

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs ({}) cannot exceed timeout_secs ({})",
            config.connect_timeout_secs, config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates the API root: http(s), and no query or fragment
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url '{}': {}", base_url, e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            base_url
        )));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' cannot carry a query or fragment",
            base_url
        )));
    }

    Ok(())
}
