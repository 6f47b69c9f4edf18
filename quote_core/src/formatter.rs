//! Turning provider quotes into display-ready quotes.
//!
//! The whole batch succeeds or fails together: the first incomplete quote,
//! unknown timezone or unusable timestamp aborts formatting and no partial
//! report is produced.
use log::{debug, info};

use crate::error::QuoteError;
use crate::market_time::{self, CLOCK_FORMAT, DATE_TIME_FORMAT};
use crate::model::raw_quote::keys;
use crate::model::{FormattedQuote, QuoteBatch, QuoteReport, RawQuote};
use crate::provider::QuoteProvider;
use crate::result::Result;
use crate::symbol::Symbol;

/// Requests quotes for `symbols` from `provider` and formats them.
///
/// One provider call is made for the whole list. Errors:
/// - `NoSymbols` if `symbols` is empty (no request is made);
/// - `Provider` if the request itself fails;
/// - `ProviderShape` if the answer is not a per-symbol mapping;
/// - `FieldExtraction`, `MalformedQuote` or `TimestampConversion` if any quote
///   cannot be formatted.
pub fn get_quotes<P: QuoteProvider>(provider: &P, symbols: &[Symbol]) -> Result<QuoteReport> {
    if symbols.is_empty() {
        return Err(QuoteError::NoSymbols);
    }
    info!("Requesting quotes for {} symbol(s)", symbols.len());
    let response = provider.fetch(symbols)?;
    let batch = QuoteBatch::from_response(response)?;
    debug!("Provider returned {} quote(s)", batch.len());
    format_batch(batch)
}

/// Formats every quote in `batch`, failing on the first bad one.
pub fn format_batch(batch: QuoteBatch) -> Result<QuoteReport> {
    batch
        .into_iter()
        .map(|(symbol, raw)| {
            let formatted = format_quote(&symbol, raw)?;
            Ok((symbol, formatted))
        })
        .collect()
}

/// Formats a single provider quote.
pub fn format_quote(symbol: &Symbol, raw: RawQuote) -> Result<FormattedQuote> {
    let quote = raw.validate(symbol)?;

    let conversion_error = move |field: &'static str| {
        move |detail: String| QuoteError::TimestampConversion {
            symbol: symbol.clone(),
            field,
            detail,
        }
    };

    let tz = market_time::resolve_timezone(&quote.timezone, quote.timezone_fallback.as_deref())
        .map_err(conversion_error(keys::EXCHANGE_TIMEZONE_SHORT_NAME))?;
    let updated_at = market_time::from_epoch_seconds(tz, quote.regular_market_time)
        .map_err(conversion_error(keys::REGULAR_MARKET_TIME))?;
    let opened_at = market_time::from_epoch_seconds(tz, quote.regular_market_open)
        .map_err(conversion_error(keys::REGULAR_MARKET_OPEN))?;
    let first_trade = market_time::from_epoch_millis(tz, quote.first_trade_date_milliseconds)
        .map_err(conversion_error(keys::FIRST_TRADE_DATE_MILLISECONDS))?;

    Ok(FormattedQuote {
        regular_market_price: quote.regular_market_price,
        first_trade_date_milliseconds: first_trade.format(DATE_TIME_FORMAT).to_string(),
        regular_market_time: updated_at.format(CLOCK_FORMAT).to_string(),
        regular_market_open: opened_at.format(CLOCK_FORMAT).to_string(),
        regular_market_day_high: quote.regular_market_day_high,
        regular_market_day_low: quote.regular_market_day_low,
        regular_market_volume: quote.regular_market_volume,
        bid: quote.bid,
        ask: quote.ask,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(tz: &str) -> RawQuote {
        RawQuote {
            exchange_timezone_short_name: Some(tz.to_string()),
            exchange_timezone_name: None,
            regular_market_time: Some(1_700_000_000.0),
            regular_market_open: Some(1_699_972_200.0),
            first_trade_date_milliseconds: Some(1_500_000_000_000.0),
            regular_market_price: Some(187.44),
            regular_market_day_high: Some(188.11),
            regular_market_day_low: Some(186.3),
            regular_market_volume: Some(60_108_359),
            bid: Some(187.4),
            ask: Some(187.5),
        }
    }

    fn symbol(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    #[test]
    fn formats_every_field() {
        let quote = format_quote(&symbol("AAPL"), raw("America/New_York")).unwrap();
        assert_eq!(
            quote,
            FormattedQuote {
                regular_market_price: 187.44,
                first_trade_date_milliseconds: "2017-07-13 22:40:00 EDT".to_string(),
                regular_market_time: "05:13PM EST".to_string(),
                regular_market_open: "09:30AM EST".to_string(),
                regular_market_day_high: 188.11,
                regular_market_day_low: 186.3,
                regular_market_volume: 60_108_359,
                bid: 187.4,
                ask: 187.5,
            }
        );
    }

    #[test]
    fn unknown_timezone_is_fatal() {
        let err = format_quote(&symbol("AAPL"), raw("Mars/Olympus_Mons")).unwrap_err();
        match err {
            QuoteError::TimestampConversion { field, .. } => {
                assert_eq!(field, keys::EXCHANGE_TIMEZONE_SHORT_NAME)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn short_zone_name_falls_back_to_full_name() {
        let mut quote = raw("EDT");
        quote.exchange_timezone_name = Some("America/New_York".to_string());
        let formatted = format_quote(&symbol("AAPL"), quote).unwrap();
        assert_eq!(formatted.regular_market_time, "05:13PM EST");
    }

    #[test]
    fn out_of_range_instant_is_fatal() {
        let mut quote = raw("America/New_York");
        quote.first_trade_date_milliseconds = Some(f64::MAX);
        let err = format_quote(&symbol("AAPL"), quote).unwrap_err();
        assert!(matches!(
            err,
            QuoteError::TimestampConversion {
                field: keys::FIRST_TRADE_DATE_MILLISECONDS,
                ..
            }
        ));
    }

    #[test]
    fn one_bad_quote_fails_the_batch() {
        let mut broken = raw("America/New_York");
        broken.bid = None;
        let batch: QuoteBatch = [
            (symbol("AAPL"), raw("America/New_York")),
            (symbol("MSFT"), broken),
        ]
        .into_iter()
        .collect();

        match format_batch(batch).unwrap_err() {
            QuoteError::FieldExtraction { symbol: s, field } => {
                assert_eq!(s, symbol("MSFT"));
                assert_eq!(field, keys::BID);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
