//! Quote Client — fetches near-real-time quotes for a list of ticker symbols from
//! Yahoo Finance and prints price, volume, bid/ask and the market timestamps in the
//! exchange's own timezone.
//!
//! Usage example (CLI):
//! ```bash
//! quote_client get_quotes AAPL MSFT 7203.T
//! quote_client --format json get_quotes AAPL --symbols-file ./tickers.txt
//! ```
//!
//! Exit status is `0` on success and `1` on any failure. Log verbosity follows
//! `RUST_LOG` (warnings only by default).
#![warn(missing_docs)]
mod args;
mod config;
mod yahoo;

use crate::args::{Args, Command};
use crate::config::ProviderConfig;
use crate::yahoo::YahooProvider;
use clap::Parser;
use log::debug;
use quote_core::render::render;
use quote_core::symbol::SymbolParser;
use quote_core::{OutputFormat, QuoteError, Result, Symbol, get_quotes};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    init_logger();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // --help and --version land here too
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(args: Args) -> Result<String> {
    match args.command {
        Command::GetQuotes {
            symbols,
            symbols_file,
        } => {
            let symbols = collect_symbols(symbols, symbols_file.as_deref())?;
            let config = ProviderConfig::load(args.config.as_deref())?;
            let provider = YahooProvider::new(config)?;
            quotes_command(&provider, &symbols, args.format)
        }
    }
}

/// Runs `get_quotes` against `provider` and renders the report.
fn quotes_command<P: quote_core::QuoteProvider>(
    provider: &P,
    symbols: &[Symbol],
    format: OutputFormat,
) -> Result<String> {
    let report = get_quotes(provider, symbols)?;
    render(&report, format)
}

/// Positional symbols first, then those read from `file`.
fn collect_symbols(mut symbols: Vec<Symbol>, file: Option<&Path>) -> Result<Vec<Symbol>> {
    if let Some(path) = file {
        let path = normalize_path(path);
        let reader = BufReader::new(File::open(&path)?);
        let from_file = Symbol::parse_from_reader(reader)?;
        debug!("Read {} symbol(s) from {}", from_file.len(), path.display());
        symbols.extend(from_file);
    }
    if symbols.is_empty() {
        return Err(QuoteError::NoSymbols);
    }
    Ok(symbols)
}

/// Writes the user-facing message for `err` to stderr.
fn report_error(err: &QuoteError) {
    match err {
        QuoteError::Provider(detail) => debug!("Provider failure: {}", detail),
        QuoteError::ProviderShape(detail) => debug!("Rejected provider response: {}", detail),
        _ => {}
    }
    eprintln!("{}", error_message(err));
}

/// User-facing text for `err`.
fn error_message(err: &QuoteError) -> String {
    match err {
        QuoteError::Provider(_) | QuoteError::ProviderShape(_) => {
            "Error while retrieving quotes.".to_string()
        }
        QuoteError::FieldExtraction { .. } | QuoteError::MalformedQuote { .. } => format!(
            "Error while extracting quotes data: {}\nReview symbols string and try again.",
            err
        ),
        QuoteError::TimestampConversion { .. } => {
            format!("Error converting to market time: {}", err)
        }
        other => format!("Error: {}", other),
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &Path) -> PathBuf {
    let raw = raw.to_string_lossy();
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}
