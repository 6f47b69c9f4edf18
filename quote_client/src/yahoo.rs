//! Yahoo Finance implementation of `QuoteProvider`.
//!
//! Quote requests must carry a crumb tied to the session cookies, so each fetch
//! runs three blocking requests on one cookie-enabled client:
//! cookie page, `/v1/test/getcrumb`, then `/v7/finance/quote` for all symbols.
use log::{debug, warn};
use quote_core::{QuoteError, QuoteProvider, Result, Symbol};
use reqwest::blocking::Client;
use serde_json::{Map, Value};

use crate::config::ProviderConfig;

/// Blocking Yahoo Finance quote client.
pub struct YahooProvider {
    client: Client,
    config: ProviderConfig,
}

fn transport(err: reqwest::Error) -> QuoteError {
    QuoteError::Provider(err.to_string())
}

impl YahooProvider {
    /// Builds the HTTP client from `config`.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(transport)?;
        Ok(Self { client, config })
    }

    fn fetch_crumb(&self) -> Result<String> {
        // The cookie page usually answers 404; only the cookies it sets matter.
        match self.client.get(&self.config.cookie_url).send() {
            Ok(response) => debug!("Cookie page answered {}", response.status()),
            Err(e) => warn!("Cookie request to {} failed: {}", self.config.cookie_url, e),
        }

        let url = format!("{}/v1/test/getcrumb", self.config.base_url);
        let response = self.client.get(&url).send().map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::Provider(format!("crumb request failed: {}", status)));
        }

        let crumb = response.text().map_err(transport)?.trim().to_string();
        if crumb.is_empty() || crumb.contains('<') {
            return Err(QuoteError::Provider("provider returned an invalid crumb".to_string()));
        }
        debug!("Obtained crumb");
        Ok(crumb)
    }
}

impl QuoteProvider for YahooProvider {
    fn fetch(&self, symbols: &[Symbol]) -> Result<Value> {
        let crumb = self.fetch_crumb()?;
        let joined = join_symbols(symbols);
        let url = format!("{}/v7/finance/quote", self.config.base_url);

        debug!("GET {} symbols={}", url, joined);
        let response = self
            .client
            .get(&url)
            .query(&[("symbols", joined.as_str()), ("crumb", crumb.as_str())])
            .send()
            .map_err(transport)?;
        debug!("Quote request answered {}", response.status());

        // Error statuses still carry a JSON body describing the problem.
        let body: Value = response.json().map_err(transport)?;
        Ok(by_symbol(body, symbols))
    }
}

fn join_symbols(symbols: &[Symbol]) -> String {
    symbols.iter().map(Symbol::as_str).collect::<Vec<_>>().join(",")
}

/// Reshapes a `/v7/finance/quote` body into a mapping keyed by symbol.
///
/// An empty result becomes a "No data found" string and a `finance.error`
/// body becomes its description; both are rejected later by the shape check.
/// Bodies of any other form are returned untouched.
pub fn by_symbol(body: Value, requested: &[Symbol]) -> Value {
    let results = match body.pointer("/quoteResponse/result").and_then(Value::as_array) {
        Some(results) => results,
        None => {
            return match body.pointer("/finance/error/description").and_then(Value::as_str) {
                Some(description) => Value::String(description.to_string()),
                None => body,
            };
        }
    };

    let mut quotes = Map::new();
    for result in results {
        match result.get("symbol").and_then(Value::as_str) {
            Some(symbol) => {
                quotes.insert(symbol.to_string(), result.clone());
            }
            None => warn!("Skipping quote without a symbol"),
        }
    }

    if quotes.is_empty() {
        return Value::String(format!("No data found for symbols: {}", join_symbols(requested)));
    }
    Value::Object(quotes)
}
