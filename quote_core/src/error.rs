//! Error types shared by the library and the command-line client.
//!
//! The `QuoteError` enum covers every way a quote request can fail, from the
//! provider call down to a single timestamp conversion. The library only ever
//! returns these values; turning them into process exit codes is left to the
//! binary.
use std::io;

use thiserror::Error;

use crate::symbol::Symbol;

/// Unified error type for quote retrieval and formatting.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// Transport-level failure while talking to the quote provider.
    #[error("Provider request failed: {0}")]
    Provider(String),

    /// The provider answered with something other than a symbol -> quote mapping.
    #[error("Unexpected provider response: {0}")]
    ProviderShape(String),

    /// A required attribute is absent from a provider quote.
    #[error("'{field}' is missing for symbol {symbol}")]
    FieldExtraction {
        /// Symbol whose quote is incomplete.
        symbol: Symbol,
        /// Provider key that could not be found.
        field: &'static str,
    },

    /// A provider quote carries an attribute with an unexpected JSON type.
    #[error("malformed quote for symbol {symbol}: {source}")]
    MalformedQuote {
        /// Symbol whose quote could not be decoded.
        symbol: Symbol,
        /// Underlying decoding failure.
        source: serde_json::Error,
    },

    /// An epoch value could not be turned into exchange-local time.
    #[error("{field} for symbol {symbol}: {detail}")]
    TimestampConversion {
        /// Symbol being converted.
        symbol: Symbol,
        /// Provider key holding the instant (or the timezone).
        field: &'static str,
        /// What went wrong.
        detail: String,
    },

    /// A symbol string was rejected before any request was made.
    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    /// Nothing to request.
    #[error("At least one symbol is required")]
    NoSymbols,

    /// I/O error while reading symbol or configuration files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl QuoteError {
    /// Process exit code the command-line client reports for this error.
    ///
    /// Every failure kind is terminal for a run and shares the same code.
    pub fn exit_code(&self) -> u8 {
        1
    }
}
