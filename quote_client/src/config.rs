//! Provider configuration.
//!
//! Every setting has a default, so the client works without a configuration
//! file. A JSON file passed with `--config` may override any subset of fields:
//!
//! ```json
//! { "base_url": "https://query2.finance.yahoo.com", "timeout_secs": 10 }
//! ```
use std::fs;
use std::path::Path;
use std::time::Duration;

use log::info;
use quote_core::{QuoteError, Result};
use serde::{Deserialize, Serialize};

/// Settings of the Yahoo Finance provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API host used for crumb and quote requests.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Page visited first to obtain session cookies.
    #[serde(default = "default_cookie_url")]
    pub cookie_url: String,
    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}
fn default_cookie_url() -> String {
    "https://fc.yahoo.com".to_string()
}
fn default_user_agent() -> String {
    concat!(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 ",
        "(KHTML, like Gecko) Chrome/120.0 Safari/537.36"
    )
    .to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_connect_timeout() -> u64 {
    10
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cookie_url: default_cookie_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl ProviderConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        let config: ProviderConfig = serde_json::from_str(content)?;
        config.validate()
    }

    /// Loads a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Loads `path` when given, otherwise falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let config = Self::from_file(path)?;
                info!("Loaded provider configuration from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connect timeout as a `Duration`.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    fn validate(self) -> Result<Self> {
        if self.timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(QuoteError::Config("timeouts must be positive".to_string()));
        }
        if !self.base_url.starts_with("http") {
            return Err(QuoteError::Config(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        Ok(self)
    }
}
