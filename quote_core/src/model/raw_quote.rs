//! Provider-side quote payloads and their boundary validation.
//!
//! A provider response is first checked for shape (`QuoteBatch::from_response`),
//! then each `RawQuote` is checked for completeness (`RawQuote::validate`). Nothing
//! past this module ever looks up a provider key by name.
use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::QuoteError;
use crate::symbol::Symbol;

/// Attributes reported by the provider for one symbol.
///
/// Every field is optional here so that a missing key surfaces as a
/// `FieldExtraction` error naming that key, rather than as an opaque decoding
/// failure. An explicit `null` counts as absent, since no display value can be
/// derived from it. Keys the formatter does not use are ignored.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuote {
    pub exchange_timezone_short_name: Option<String>,
    /// Full IANA zone name, used when the short name is not a known zone.
    pub exchange_timezone_name: Option<String>,
    /// Epoch seconds.
    pub regular_market_time: Option<f64>,
    /// Epoch seconds.
    pub regular_market_open: Option<f64>,
    /// Epoch milliseconds.
    pub first_trade_date_milliseconds: Option<f64>,
    pub regular_market_price: Option<f64>,
    pub regular_market_day_high: Option<f64>,
    pub regular_market_day_low: Option<f64>,
    pub regular_market_volume: Option<u64>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
}

/// A `RawQuote` with every required attribute present.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub struct MarketQuote {
    pub timezone: String,
    pub timezone_fallback: Option<String>,
    pub regular_market_time: f64,
    pub regular_market_open: f64,
    pub first_trade_date_milliseconds: f64,
    pub regular_market_price: f64,
    pub regular_market_day_high: f64,
    pub regular_market_day_low: f64,
    pub regular_market_volume: u64,
    pub bid: f64,
    pub ask: f64,
}

/// Provider key names, in the order they are checked.
#[allow(missing_docs)]
pub mod keys {
    pub const EXCHANGE_TIMEZONE_SHORT_NAME: &str = "exchangeTimezoneShortName";
    pub const REGULAR_MARKET_TIME: &str = "regularMarketTime";
    pub const REGULAR_MARKET_OPEN: &str = "regularMarketOpen";
    pub const FIRST_TRADE_DATE_MILLISECONDS: &str = "firstTradeDateMilliseconds";
    pub const REGULAR_MARKET_PRICE: &str = "regularMarketPrice";
    pub const REGULAR_MARKET_DAY_HIGH: &str = "regularMarketDayHigh";
    pub const REGULAR_MARKET_DAY_LOW: &str = "regularMarketDayLow";
    pub const REGULAR_MARKET_VOLUME: &str = "regularMarketVolume";
    pub const BID: &str = "bid";
    pub const ASK: &str = "ask";
}

fn require<T>(value: Option<T>, symbol: &Symbol, field: &'static str) -> Result<T, QuoteError> {
    value.ok_or_else(|| QuoteError::FieldExtraction {
        symbol: symbol.clone(),
        field,
    })
}

impl RawQuote {
    /// Checks that every required attribute is present.
    ///
    /// Fails with `FieldExtraction` on the first missing key.
    pub fn validate(self, symbol: &Symbol) -> Result<MarketQuote, QuoteError> {
        Ok(MarketQuote {
            timezone: require(
                self.exchange_timezone_short_name,
                symbol,
                keys::EXCHANGE_TIMEZONE_SHORT_NAME,
            )?,
            timezone_fallback: self.exchange_timezone_name,
            regular_market_time: require(
                self.regular_market_time,
                symbol,
                keys::REGULAR_MARKET_TIME,
            )?,
            regular_market_open: require(
                self.regular_market_open,
                symbol,
                keys::REGULAR_MARKET_OPEN,
            )?,
            first_trade_date_milliseconds: require(
                self.first_trade_date_milliseconds,
                symbol,
                keys::FIRST_TRADE_DATE_MILLISECONDS,
            )?,
            regular_market_price: require(
                self.regular_market_price,
                symbol,
                keys::REGULAR_MARKET_PRICE,
            )?,
            regular_market_day_high: require(
                self.regular_market_day_high,
                symbol,
                keys::REGULAR_MARKET_DAY_HIGH,
            )?,
            regular_market_day_low: require(
                self.regular_market_day_low,
                symbol,
                keys::REGULAR_MARKET_DAY_LOW,
            )?,
            regular_market_volume: require(
                self.regular_market_volume,
                symbol,
                keys::REGULAR_MARKET_VOLUME,
            )?,
            bid: require(self.bid, symbol, keys::BID)?,
            ask: require(self.ask, symbol, keys::ASK)?,
        })
    }
}

/// All quotes returned by one provider call, keyed by symbol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteBatch {
    quotes: BTreeMap<Symbol, RawQuote>,
}

impl QuoteBatch {
    /// Validates the shape of a provider response.
    ///
    /// The response must be a JSON object whose values are themselves objects.
    /// Anything else (an error string, `null`, an array) is a `ProviderShape`
    /// error. Attribute values of the wrong JSON type are reported as
    /// `MalformedQuote`.
    pub fn from_response(response: Value) -> Result<Self, QuoteError> {
        let entries = match response {
            Value::Object(entries) => entries,
            other => return Err(QuoteError::ProviderShape(describe(&other))),
        };

        let mut quotes = BTreeMap::new();
        for (key, value) in entries {
            let symbol = Symbol::new(key)
                .map_err(|_| QuoteError::ProviderShape("blank symbol key".to_string()))?;
            if !value.is_object() {
                return Err(QuoteError::ProviderShape(format!(
                    "quote for {} is {}",
                    symbol,
                    describe(&value)
                )));
            }
            let raw = serde_json::from_value::<RawQuote>(value).map_err(|source| {
                QuoteError::MalformedQuote {
                    symbol: symbol.clone(),
                    source,
                }
            })?;
            quotes.insert(symbol, raw);
        }
        Ok(QuoteBatch { quotes })
    }

    /// Number of quotes in the batch.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// `true` when the provider returned no quotes.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Iterate over quotes in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &RawQuote)> {
        self.quotes.iter()
    }
}

impl FromIterator<(Symbol, RawQuote)> for QuoteBatch {
    fn from_iter<I: IntoIterator<Item = (Symbol, RawQuote)>>(iter: I) -> Self {
        QuoteBatch {
            quotes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for QuoteBatch {
    type Item = (Symbol, RawQuote);
    type IntoIter = std::collections::btree_map::IntoIter<Symbol, RawQuote>;

    fn into_iter(self) -> Self::IntoIter {
        self.quotes.into_iter()
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("a boolean ({})", b),
        Value::Number(n) => format!("a number ({})", n),
        Value::String(s) => format!("a string ({:?})", s),
        Value::Array(a) => format!("an array of {} items", a.len()),
        Value::Object(_) => "an object".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn aapl() -> Symbol {
        Symbol::new("AAPL").unwrap()
    }

    fn complete() -> Value {
        json!({
            "exchangeTimezoneShortName": "America/New_York",
            "regularMarketTime": 1700000000,
            "regularMarketOpen": 1699972200,
            "firstTradeDateMilliseconds": 345479400000i64,
            "regularMarketPrice": 187.44,
            "regularMarketDayHigh": 188.11,
            "regularMarketDayLow": 186.3,
            "regularMarketVolume": 60108359,
            "bid": 187.4,
            "ask": 187.5,
            "shortName": "Apple Inc."
        })
    }

    #[test]
    fn non_object_response_is_a_shape_error() {
        let err = QuoteBatch::from_response(json!("No data found for symbols: XXXX")).unwrap_err();
        assert!(matches!(err, QuoteError::ProviderShape(_)));

        let err = QuoteBatch::from_response(json!([1, 2])).unwrap_err();
        assert!(matches!(err, QuoteError::ProviderShape(_)));
    }

    #[test]
    fn non_object_quote_is_a_shape_error() {
        let err = QuoteBatch::from_response(json!({ "AAPL": "Quote not found" })).unwrap_err();
        match err {
            QuoteError::ProviderShape(detail) => assert!(detail.contains("AAPL")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn wrong_attribute_type_is_malformed() {
        let mut quote = complete();
        quote["bid"] = json!("n/a");
        let err = QuoteBatch::from_response(json!({ "AAPL": quote })).unwrap_err();
        assert!(matches!(err, QuoteError::MalformedQuote { .. }));
    }

    #[test]
    fn complete_quote_validates() {
        let batch = QuoteBatch::from_response(json!({ "AAPL": complete() })).unwrap();
        assert_eq!(batch.len(), 1);
        let (symbol, raw) = batch.into_iter().next().unwrap();
        let quote = raw.validate(&symbol).unwrap();
        assert_eq!(quote.timezone, "America/New_York");
        assert_eq!(quote.timezone_fallback, None);
        assert_eq!(quote.regular_market_volume, 60108359);
        assert_eq!(quote.bid, 187.4);
    }

    #[test]
    fn null_attribute_counts_as_missing() {
        let mut quote = complete();
        quote["bid"] = Value::Null;
        let batch = QuoteBatch::from_response(json!({ "AAPL": quote })).unwrap();
        let (symbol, raw) = batch.into_iter().next().unwrap();
        assert_eq!(raw.bid, None);
        match raw.validate(&symbol).unwrap_err() {
            QuoteError::FieldExtraction { field, .. } => assert_eq!(field, keys::BID),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_key_is_named() {
        let raw: RawQuote = serde_json::from_value(json!({
            "exchangeTimezoneShortName": "America/New_York",
            "regularMarketTime": 1700000000
        }))
        .unwrap();
        match raw.validate(&aapl()).unwrap_err() {
            QuoteError::FieldExtraction { symbol, field } => {
                assert_eq!(symbol, aapl());
                assert_eq!(field, keys::REGULAR_MARKET_OPEN);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
