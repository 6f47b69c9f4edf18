//! Ticker symbols and helpers for reading them from text input.

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

/// Opaque identifier of a security, e.g. `AAPL` or `BRK-B`.
///
/// The value is kept exactly as given: case and duplicates are the provider's
/// business, not ours. The only rule is that it must not be blank.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a symbol, rejecting blank strings.
    pub fn new(raw: impl Into<String>) -> Result<Self, QuoteError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(QuoteError::InvalidSymbol(raw));
        }
        Ok(Symbol(raw))
    }

    /// Borrow the symbol text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Symbol {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::new(s)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Trait providing text parsing for symbols.
pub trait SymbolParser {
    /// Parses symbols from a buffered reader.
    ///
    /// Symbols may be separated by commas, whitespace or new lines. Empty
    /// entries are skipped; order and duplicates are preserved.
    fn parse_from_reader<R: BufRead>(reader: R) -> Result<Vec<Symbol>, QuoteError>;
}

impl SymbolParser for Symbol {
    fn parse_from_reader<R: BufRead>(reader: R) -> Result<Vec<Self>, QuoteError> {
        let mut symbols = Vec::new();

        for line_result in reader.lines() {
            let line = line_result?;
            for token in line.split(|c: char| c == ',' || c.is_whitespace()) {
                if token.is_empty() {
                    continue;
                }
                symbols.push(token.parse::<Self>()?);
            }
        }
        Ok(symbols)
    }
}
