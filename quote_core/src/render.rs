//! Presentation of a `QuoteReport`.
//!
//! Formatting logic never depends on the output format; new formats only need a
//! variant here.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::model::{FieldValue, QuoteReport};
use crate::result::Result;

/// Supported output formats.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    Eq,
    PartialEq,
)]
#[value(rename_all = "lower")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// Indented mapping with quoted keys, one attribute per line.
    #[default]
    Pretty,
    /// Pretty-printed JSON object keyed by symbol.
    Json,
}

/// Renders `report` in the requested format, without a trailing newline.
pub fn render(report: &QuoteReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(render_pretty(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

/// Renders `report` as a nested mapping with sorted keys:
///
/// ```text
/// {'AAPL': {'ask': 187.5,
///           'bid': 187.4,
///           ...
///           'regularMarketVolume': 60108359}}
/// ```
pub fn render_pretty(report: &QuoteReport) -> String {
    if report.is_empty() {
        return "{}".to_string();
    }

    let mut out = String::new();
    let last_symbol = report.len() - 1;
    for (i, (symbol, quote)) in report.iter().enumerate() {
        let head = format!("{}{}: {{", if i == 0 { "{" } else { " " }, quoted(symbol.as_str()));
        let indent = " ".repeat(head.chars().count());

        let fields = quote.fields();
        let last_field = fields.len() - 1;
        for (j, (name, value)) in fields.iter().enumerate() {
            out.push_str(if j == 0 { &head } else { &indent });
            out.push_str(&quoted(name));
            out.push_str(": ");
            match value {
                FieldValue::Float(v) => out.push_str(&float_repr(*v)),
                FieldValue::Integer(v) => out.push_str(&v.to_string()),
                FieldValue::Text(v) => out.push_str(&quoted(v)),
            }
            out.push_str(if j == last_field { "}" } else { ",\n" });
        }
        out.push_str(if i == last_symbol { "}" } else { ",\n" });
    }
    out
}

/// Python-style float literal: shortest round-trip digits, positional for
/// decimal exponents in `-4..16`, otherwise `1.5e-05` / `1e+16`.
fn float_repr(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let sci = format!("{:e}", v);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    if (-4..16).contains(&exponent) {
        let positional = v.to_string();
        if positional.contains('.') {
            positional
        } else {
            positional + ".0"
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

/// Python-style string literal: single quotes unless the text contains a
/// single quote and no double quote.
fn quoted(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FormattedQuote;
    use crate::symbol::Symbol;

    fn quote(price: f64) -> FormattedQuote {
        FormattedQuote {
            regular_market_price: price,
            first_trade_date_milliseconds: "1980-12-12 09:30:00 EST".to_string(),
            regular_market_time: "05:13PM EST".to_string(),
            regular_market_open: "09:30AM EST".to_string(),
            regular_market_day_high: 190.0,
            regular_market_day_low: 186.3,
            regular_market_volume: 60108359,
            bid: 187.4,
            ask: 187.5,
        }
    }

    fn report() -> QuoteReport {
        [
            (Symbol::new("MSFT").unwrap(), quote(369.67)),
            (Symbol::new("AAPL").unwrap(), quote(187.44)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn pretty_output_is_sorted_and_aligned() {
        insta::assert_snapshot!(render_pretty(&report()), @r"
        {'AAPL': {'ask': 187.5,
                  'bid': 187.4,
                  'firstTradeDateMilliseconds': '1980-12-12 09:30:00 EST',
                  'regularMarketDayHigh': 190.0,
                  'regularMarketDayLow': 186.3,
                  'regularMarketOpen': '09:30AM EST',
                  'regularMarketPrice': 187.44,
                  'regularMarketTime': '05:13PM EST',
                  'regularMarketVolume': 60108359},
         'MSFT': {'ask': 187.5,
                  'bid': 187.4,
                  'firstTradeDateMilliseconds': '1980-12-12 09:30:00 EST',
                  'regularMarketDayHigh': 190.0,
                  'regularMarketDayLow': 186.3,
                  'regularMarketOpen': '09:30AM EST',
                  'regularMarketPrice': 369.67,
                  'regularMarketTime': '05:13PM EST',
                  'regularMarketVolume': 60108359}}
        ");
    }

    #[test]
    fn empty_report_renders_empty_mapping() {
        assert_eq!(render_pretty(&QuoteReport::new()), "{}");
    }

    #[test]
    fn strings_follow_python_quoting() {
        assert_eq!(quoted("AAPL"), "'AAPL'");
        assert_eq!(quoted("it's"), "\"it's\"");
        assert_eq!(quoted("it's \"x\""), "'it\\'s \"x\"'");
        assert_eq!(quoted("a\tb\r"), "'a\\tb\\r'");
        assert_eq!(quoted("C:\\x"), "'C:\\\\x'");
    }

    #[test]
    fn floats_follow_python_repr() {
        assert_eq!(float_repr(187.44), "187.44");
        assert_eq!(float_repr(190.0), "190.0");
        assert_eq!(float_repr(-0.0), "-0.0");
        assert_eq!(float_repr(0.0001), "0.0001");
        assert_eq!(float_repr(1.5e-5), "1.5e-05");
        assert_eq!(float_repr(1e15), "1000000000000000.0");
        assert_eq!(float_repr(123456789012345.6), "123456789012345.6");
        assert_eq!(float_repr(1e16), "1e+16");
        assert_eq!(float_repr(2.5e20), "2.5e+20");
        assert_eq!(float_repr(f64::NAN), "nan");
    }

    #[test]
    fn large_prices_render_like_python() {
        let mut report = report();
        report.retain(|symbol, _| symbol.as_str() == "AAPL");
        if let Some(quote) = report.values_mut().next() {
            quote.regular_market_price = 1e16;
        }
        let rendered = render_pretty(&report);
        assert!(rendered.contains("'regularMarketPrice': 1e+16,"));
    }

    #[test]
    fn json_output_keeps_provider_keys() {
        let rendered = render(&report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["AAPL"]["regularMarketTime"], "05:13PM EST");
        assert_eq!(value["MSFT"]["regularMarketPrice"], 369.67);
        assert_eq!(value["AAPL"]["regularMarketVolume"], 60108359);
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[test]
    fn format_names_parse() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("PRETTY".parse::<OutputFormat>().unwrap(), OutputFormat::Pretty);
        assert_eq!(OutputFormat::default().to_string(), "pretty");
    }
}
