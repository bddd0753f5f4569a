//! Configuration module for Booster-Crack
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; a missing file section falls back to the defaults.
//!
//! # Example
//!
//! ```no_run
//! use booster_crack::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("booster-crack.toml")).unwrap();
//! println!("Fetching from: {}", config.api.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ApiConfig, CollectionConfig, Config, OutputConfig, DEFAULT_BASE_URL};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
