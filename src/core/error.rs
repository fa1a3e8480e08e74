//! Conversion error taxonomy

use thiserror::Error;

/// Errors raised while turning user input into a quote.
///
/// None of these are fatal: the controller records them in the state snapshot
/// and the user can simply try again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The field text is not a valid non-negative decimal.
    #[error("Invalid amount '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// The quote provider could not be reached or answered with an error status.
    #[error("Quote provider unavailable: {0}")]
    RemoteUnavailable(String),

    /// The provider answered, but not with two usable decimal amounts.
    #[error("Invalid quote: {0}")]
    InvalidQuote(String),
}

impl ConversionError {
    pub fn parse(input: &str, reason: impl Into<String>) -> Self {
        ConversionError::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
