//! Admin error types.

use bundle_cache::CacheError;
use bundle_commerce::{GroupId, OfferError, ShopId};
use bundle_db::StoreError;
use thiserror::Error;

/// Errors surfaced to the merchant editing session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdminError {
    /// The working copy breaks a model rule. Raised before any I/O.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The group is gone, or belongs to another shop.
    #[error("Offer group {id} not found for shop {shop}")]
    NotFound { shop: ShopId, id: GroupId },

    /// Record store I/O failed. The working copy is kept for a retry.
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    /// Writing the storefront channel failed.
    #[error("Publish failed: {0}")]
    Publish(String),

    /// No group is open in the editor.
    #[error("No offer group is open")]
    NoActiveGroup,

    /// A save for this editor session has not completed yet.
    #[error("A save is already in progress")]
    SaveInFlight,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AdminError {
    /// Whether the failure is infrastructure rather than merchant input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AdminError::StoreUnavailable(_) | AdminError::Publish(_))
    }
}

impl From<OfferError> for AdminError {
    fn from(e: OfferError) -> Self {
        match e {
            OfferError::Validation(msg) => AdminError::Validation(msg),
            other => AdminError::Serialization(other.to_string()),
        }
    }
}

impl From<StoreError> for AdminError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { shop, id } => AdminError::NotFound { shop, id },
            StoreError::Unavailable(msg) => AdminError::StoreUnavailable(msg),
            StoreError::Serialization(msg) => AdminError::Serialization(msg),
        }
    }
}

impl From<CacheError> for AdminError {
    fn from(e: CacheError) -> Self {
        AdminError::Publish(e.to_string())
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(e: serde_json::Error) -> Self {
        AdminError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_taxonomy() {
        let shop = ShopId::new("s");
        let id = GroupId::new("g");
        assert_eq!(
            AdminError::from(StoreError::not_found(&shop, &id)),
            AdminError::NotFound { shop, id }
        );
        assert!(AdminError::from(StoreError::Unavailable("down".into())).is_retryable());
        assert!(!AdminError::from(OfferError::validation("bad")).is_retryable());
    }
}
