//! Formatted quote values produced for display.
use std::collections::BTreeMap;

use serde::Serialize;

use crate::symbol::Symbol;

/// Display-ready subset of a provider quote.
///
/// Numeric attributes are copied as reported; the three instants are rendered in
/// the exchange's local time. Serialized names match the provider keys they were
/// derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedQuote {
    /// Last regular-session price.
    pub regular_market_price: f64,
    /// First trade date, `YYYY-MM-DD HH:MM:SS TZ`.
    pub first_trade_date_milliseconds: String,
    /// Time of the last regular-session update, `HH:MMAM TZ`.
    pub regular_market_time: String,
    /// Regular-session open, `HH:MMAM TZ`.
    pub regular_market_open: String,
    /// Session high.
    pub regular_market_day_high: f64,
    /// Session low.
    pub regular_market_day_low: f64,
    /// Session volume.
    pub regular_market_volume: u64,
    /// Best bid.
    pub bid: f64,
    /// Best ask.
    pub ask: f64,
}

/// Rendered value of one quote attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// Floating-point attribute.
    Float(f64),
    /// Integral attribute.
    Integer(u64),
    /// Pre-formatted text.
    Text(&'a str),
}

impl FormattedQuote {
    /// Attribute names and values, sorted by name.
    pub fn fields(&self) -> [(&'static str, FieldValue<'_>); 9] {
        [
            ("ask", FieldValue::Float(self.ask)),
            ("bid", FieldValue::Float(self.bid)),
            (
                "firstTradeDateMilliseconds",
                FieldValue::Text(&self.first_trade_date_milliseconds),
            ),
            ("regularMarketDayHigh", FieldValue::Float(self.regular_market_day_high)),
            ("regularMarketDayLow", FieldValue::Float(self.regular_market_day_low)),
            ("regularMarketOpen", FieldValue::Text(&self.regular_market_open)),
            ("regularMarketPrice", FieldValue::Float(self.regular_market_price)),
            ("regularMarketTime", FieldValue::Text(&self.regular_market_time)),
            ("regularMarketVolume", FieldValue::Integer(self.regular_market_volume)),
        ]
    }
}

/// Formatted quotes for one invocation, ordered by symbol.
pub type QuoteReport = BTreeMap<Symbol, FormattedQuote>;
