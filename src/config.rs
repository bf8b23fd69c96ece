use std::env;
use tracing::warn;

/// Environment variable holding the property API base URL.
pub const API_URL_VAR: &str = "PROPERTY_API_URL";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the property API. Empty when unset; requests then become
    /// relative to the path alone.
    pub api_base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        let api_base_url = env::var(API_URL_VAR).unwrap_or_default();
        if api_base_url.is_empty() {
            warn!("{} is not set; using an empty API base URL", API_URL_VAR);
        }
        Self { api_base_url }
    }
}
