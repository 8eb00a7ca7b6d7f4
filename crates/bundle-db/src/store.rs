//! The record store contract.

use crate::StoreError;
use async_trait::async_trait;
use bundle_commerce::{GroupId, OfferGroup, ShopId};

/// Authoritative storage for offer groups.
///
/// Every operation is scoped by shop. An id belonging to another shop
/// behaves exactly like an id that does not exist.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All groups for the shop, ordered by creation time then id.
    async fn list(&self, shop: &ShopId) -> Result<Vec<OfferGroup>, StoreError>;

    /// Persist a new group. Assigns `id`, `created_at` and `updated_at`;
    /// any id already on `group` is ignored.
    async fn create(&self, shop: &ShopId, group: &OfferGroup) -> Result<OfferGroup, StoreError>;

    /// Overwrite an existing group. Keeps `created_at`, refreshes `updated_at`.
    async fn update(
        &self,
        shop: &ShopId,
        id: &GroupId,
        group: &OfferGroup,
    ) -> Result<OfferGroup, StoreError>;

    /// Remove a group.
    async fn delete(&self, shop: &ShopId, id: &GroupId) -> Result<(), StoreError>;

    /// Active groups only, in `list` order.
    async fn list_active(&self, shop: &ShopId) -> Result<Vec<OfferGroup>, StoreError> {
        Ok(self
            .list(shop)
            .await?
            .into_iter()
            .filter(|g| g.active)
            .collect())
    }
}
