//! Offer error types.

use thiserror::Error;

/// Errors raised by the offer model and the storefront decoder.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OfferError {
    /// Structural violation of the offer model. Always raised before any I/O.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The published storefront payload could not be decoded.
    #[error("Malformed offer blob: {0}")]
    MalformedBlob(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl OfferError {
    /// Shorthand for a validation failure.
    pub fn validation(msg: impl Into<String>) -> Self {
        OfferError::Validation(msg.into())
    }

    /// Whether the error is attributable to the merchant's own input.
    pub fn is_validation(&self) -> bool {
        matches!(self, OfferError::Validation(_))
    }
}

impl From<serde_json::Error> for OfferError {
    fn from(e: serde_json::Error) -> Self {
        OfferError::Serialization(e.to_string())
    }
}
