//! The seam between quote formatting and the remote data provider.
use serde_json::Value;

use crate::result::Result;
use crate::symbol::Symbol;

/// Source of raw quote snapshots.
///
/// Implementations make exactly one request per call, for all symbols at once.
/// On success they return the provider's answer as JSON: either a mapping from
/// symbol to attribute mapping, or whatever non-mapping value the provider uses
/// to signal failure (`QuoteBatch::from_response` sorts the two apart).
/// Transport failures are reported as `QuoteError::Provider`.
pub trait QuoteProvider {
    /// Fetches quotes for `symbols`.
    fn fetch(&self, symbols: &[Symbol]) -> Result<Value>;
}

impl<P: QuoteProvider + ?Sized> QuoteProvider for &P {
    fn fetch(&self, symbols: &[Symbol]) -> Result<Value> {
        (**self).fetch(symbols)
    }
}

impl<P: QuoteProvider + ?Sized> QuoteProvider for Box<P> {
    fn fetch(&self, symbols: &[Symbol]) -> Result<Value> {
        (**self).fetch(symbols)
    }
}
