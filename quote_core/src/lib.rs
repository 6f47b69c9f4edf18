//!
//! Quote retrieval and formatting shared by the command-line client.
//!
//! This crate aggregates:
//! - `error` — unified error type `QuoteError`.
//! - `result` — handy `Result<T, QuoteError>` alias.
//! - `symbol` — ticker symbols and parsing helpers.
//! - `provider` — the `QuoteProvider` seam to the remote data source.
//! - `model` — raw provider quotes and formatted quotes.
//! - `market_time` — epoch to exchange-local time conversion.
//! - `formatter` — `get_quotes` and the per-quote formatting pipeline.
//! - `render` — textual output of a finished report.
#![warn(missing_docs)]
pub mod error;
pub mod formatter;
pub mod market_time;
pub mod model;
pub mod provider;
pub mod render;
pub mod result;
pub mod symbol;

pub use error::QuoteError;
pub use formatter::get_quotes;
pub use model::{FormattedQuote, QuoteReport};
pub use provider::QuoteProvider;
pub use render::OutputFormat;
pub use result::Result;
pub use symbol::Symbol;
