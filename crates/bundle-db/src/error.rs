//! Record store error types.

use bundle_commerce::{GroupId, ShopId};
use thiserror::Error;

/// Errors that can occur when using the record store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The backing store could not be reached or rejected the operation.
    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    /// No record with this id exists for this shop.
    #[error("Offer group {id} not found for shop {shop}")]
    NotFound { shop: ShopId, id: GroupId },

    /// A stored payload could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn not_found(shop: &ShopId, id: &GroupId) -> Self {
        StoreError::NotFound {
            shop: shop.clone(),
            id: id.clone(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}
