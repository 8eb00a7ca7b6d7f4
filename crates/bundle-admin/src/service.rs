//! Shop-scoped admin operations.

use crate::{AdminError, Editor, PublishReport, Publisher, SaveKind};
use bundle_commerce::{GroupId, OfferGroup, ShopId};
use bundle_db::RecordStore;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A completed save.
///
/// The save has already succeeded; `publish` resolves to the outcome of the
/// storefront resync it triggered.
#[derive(Debug)]
pub struct SaveReceipt {
    pub group: OfferGroup,
    pub publish: JoinHandle<PublishReport>,
}

/// Admin operations for one shop.
#[derive(Clone)]
pub struct OfferService {
    shop: ShopId,
    store: Arc<dyn RecordStore>,
    publisher: Publisher,
}

impl OfferService {
    pub fn new(shop: ShopId, store: Arc<dyn RecordStore>, publisher: Publisher) -> Self {
        Self {
            shop,
            store,
            publisher,
        }
    }

    pub fn shop(&self) -> &ShopId {
        &self.shop
    }

    /// Save the editor's working copy.
    ///
    /// Creates or updates depending on whether the group has an id. On
    /// failure the working copy is untouched and the error is returned for
    /// a retry.
    pub async fn save(&self, editor: &mut Editor) -> Result<SaveReceipt, AdminError> {
        let ticket = editor.begin_save()?;

        let result = match ticket.kind() {
            SaveKind::Create => self.store.create(&self.shop, ticket.payload()).await,
            SaveKind::Update(id) => self.store.update(&self.shop, id, ticket.payload()).await,
        };

        match result {
            Ok(persisted) => {
                editor.complete_save(ticket, &persisted);
                let publish = self.publisher.spawn(&self.shop);
                Ok(SaveReceipt {
                    group: persisted,
                    publish,
                })
            }
            Err(e) => {
                editor.fail_save(&ticket);
                tracing::debug!(shop = %self.shop, error = %e, "offer group save failed");
                Err(e.into())
            }
        }
    }

    /// All groups, active or not.
    pub async fn list(&self) -> Result<Vec<OfferGroup>, AdminError> {
        Ok(self.store.list(&self.shop).await?)
    }

    /// Fetch a single group.
    pub async fn get(&self, id: &GroupId) -> Result<OfferGroup, AdminError> {
        self.list()
            .await?
            .into_iter()
            .find(|g| g.id.as_ref() == Some(id))
            .ok_or_else(|| AdminError::NotFound {
                shop: self.shop.clone(),
                id: id.clone(),
            })
    }

    /// Open a persisted group in the editor.
    pub async fn load_into(&self, editor: &mut Editor, id: &GroupId) -> Result<(), AdminError> {
        let group = self.get(id).await?;
        editor.select_group(group);
        Ok(())
    }

    /// Delete a group and resync the storefront.
    pub async fn delete(&self, id: &GroupId) -> Result<JoinHandle<PublishReport>, AdminError> {
        self.store.delete(&self.shop, id).await?;
        Ok(self.publisher.spawn(&self.shop))
    }

    /// Toggle a group's visibility without going through an editor.
    pub async fn set_active(&self, id: &GroupId, active: bool) -> Result<SaveReceipt, AdminError> {
        let mut group = self.get(id).await?;
        group.active = active;
        let group = self.store.update(&self.shop, id, &group.prepare()?).await?;
        Ok(SaveReceipt {
            group,
            publish: self.publisher.spawn(&self.shop),
        })
    }

    /// Resync the storefront now, reporting failures as errors.
    pub async fn republish(&self) -> Result<PublishReport, AdminError> {
        self.publisher.publish(&self.shop).await
    }
}
