//! Data model types for quote retrieval.
//!
//! - `raw_quote` — provider payloads, shape checks and required-key validation.
//! - `formatted_quote` — display-ready quotes and the per-run report.
pub mod formatted_quote;
pub mod raw_quote;

pub use formatted_quote::{FieldValue, FormattedQuote, QuoteReport};
pub use raw_quote::{MarketQuote, QuoteBatch, RawQuote};
