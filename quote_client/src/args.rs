//! Command-line arguments for the Quote Client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quote_core::{OutputFormat, Symbol};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to a JSON configuration file for the quote provider.
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format of the quote report.
    #[clap(long, value_enum, default_value_t = OutputFormat::Pretty, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Supported subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch quotes for one or more symbols and print them in exchange-local time.
    #[command(name = "get_quotes")]
    GetQuotes {
        /// Ticker symbols, e.g. `AAPL MSFT 7203.T`.
        symbols: Vec<Symbol>,

        /// Text file with more symbols, separated by commas, spaces, or new lines.
        #[clap(long)]
        symbols_file: Option<PathBuf>,
    },
}
