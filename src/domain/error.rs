use thiserror::Error;

/// Errors raised by pure domain computation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A fixture with zero bookmaker entries reached the aggregator.
    ///
    /// Normalizer output never contains empty fixtures, so hitting this
    /// indicates a logic error upstream rather than bad input data.
    #[error("fixture '{key}' has no bookmaker entries")]
    EmptyFixture { key: String },
}

/// A raw quote rejected at the normalization boundary.
///
/// One malformed record never voids the batch: the normalizer drops the
/// record, logs it, and keeps processing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed quote from '{bookmaker}': {reason}")]
pub struct MalformedQuote {
    pub bookmaker: String,
    pub reason: &'static str,
}
