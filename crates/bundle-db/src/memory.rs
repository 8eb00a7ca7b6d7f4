//! In-process record store for native builds and tests.

use crate::{RecordStore, StoreError};
use async_trait::async_trait;
use bundle_commerce::{GroupId, OfferGroup, ShopId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Seed file contents: offer groups keyed by shop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSeed {
    #[serde(default)]
    pub shops: BTreeMap<ShopId, Vec<OfferGroup>>,
}

#[derive(Debug, Clone)]
struct StoredRecord {
    shop: ShopId,
    group: OfferGroup,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<StoredRecord>,
    last_stamp: Option<DateTime<Utc>>,
}

impl Inner {
    /// Wall-clock time, bumped so no two writes share a timestamp.
    fn stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }

    fn position(&self, shop: &ShopId, id: &GroupId) -> Option<usize> {
        self.records
            .iter()
            .position(|r| &r.shop == shop && r.group.id.as_ref() == Some(id))
    }
}

/// Record store held in memory.
///
/// `set_unavailable(true)` makes every call fail with
/// [`StoreError::Unavailable`] until switched back.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    inner: Mutex<Inner>,
    unavailable: AtomicBool,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from seed data. Groups without an id get one.
    pub fn from_seed(seed: StoreSeed) -> Self {
        let store = Self::new();
        if let Ok(mut inner) = store.inner.lock() {
            for (shop, groups) in seed.shops {
                for mut group in groups {
                    let stamp = inner.stamp();
                    group.id.get_or_insert_with(GroupId::generate);
                    group.created_at.get_or_insert(stamp);
                    group.updated_at.get_or_insert(stamp);
                    inner.records.push(StoredRecord {
                        shop: shop.clone(),
                        group,
                    });
                }
            }
        }
        store
    }

    /// Simulate an outage.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Export the current contents as seed data.
    pub fn to_seed(&self) -> Result<StoreSeed, StoreError> {
        let inner = self.lock()?;
        let mut seed = StoreSeed::default();
        for record in &inner.records {
            seed.shops
                .entry(record.shop.clone())
                .or_default()
                .push(record.group.clone());
        }
        Ok(seed)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store is offline".to_string()));
        }
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list(&self, shop: &ShopId) -> Result<Vec<OfferGroup>, StoreError> {
        let inner = self.lock()?;
        let mut groups: Vec<OfferGroup> = inner
            .records
            .iter()
            .filter(|r| &r.shop == shop)
            .map(|r| r.group.clone())
            .collect();
        groups.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(groups)
    }

    async fn create(&self, shop: &ShopId, group: &OfferGroup) -> Result<OfferGroup, StoreError> {
        let mut inner = self.lock()?;
        let stamp = inner.stamp();

        let mut persisted = group.clone();
        persisted.id = Some(GroupId::generate());
        persisted.created_at = Some(stamp);
        persisted.updated_at = Some(stamp);

        inner.records.push(StoredRecord {
            shop: shop.clone(),
            group: persisted.clone(),
        });
        tracing::debug!(shop = %shop, id = ?persisted.id, "offer group created");
        Ok(persisted)
    }

    async fn update(
        &self,
        shop: &ShopId,
        id: &GroupId,
        group: &OfferGroup,
    ) -> Result<OfferGroup, StoreError> {
        let mut inner = self.lock()?;
        let index = inner
            .position(shop, id)
            .ok_or_else(|| StoreError::not_found(shop, id))?;
        let stamp = inner.stamp();

        let record = &mut inner.records[index];
        let mut persisted = group.clone();
        persisted.id = Some(id.clone());
        persisted.created_at = record.group.created_at;
        persisted.updated_at = Some(stamp);
        record.group = persisted.clone();

        tracing::debug!(shop = %shop, id = %id, "offer group updated");
        Ok(persisted)
    }

    async fn delete(&self, shop: &ShopId, id: &GroupId) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let index = inner
            .position(shop, id)
            .ok_or_else(|| StoreError::not_found(shop, id))?;
        inner.records.remove(index);
        tracing::debug!(shop = %shop, id = %id, "offer group deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop(s: &str) -> ShopId {
        ShopId::new(s)
    }

    fn named(name: &str, active: bool) -> OfferGroup {
        let mut g = OfferGroup::create_draft();
        g.name = name.to_string();
        g.active = active;
        g
    }

    #[tokio::test]
    async fn test_create_assigns_identity() {
        let store = MemoryRecordStore::new();
        let created = store.create(&shop("a"), &named("one", true)).await.unwrap();
        assert!(created.id.is_some());
        assert!(created.created_at.is_some());
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn test_create_ignores_incoming_id() {
        let store = MemoryRecordStore::new();
        let mut g = named("one", true);
        g.id = Some(GroupId::new("chosen-by-client"));
        let created = store.create(&shop("a"), &g).await.unwrap();
        assert_ne!(created.id, Some(GroupId::new("chosen-by-client")));
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at_only() {
        let store = MemoryRecordStore::new();
        let created = store.create(&shop("a"), &named("one", true)).await.unwrap();
        let id = created.id.clone().unwrap();

        let mut edited = created.clone();
        edited.name = "renamed".to_string();
        let updated = store.update(&shop("a"), &id, &edited).await.unwrap();

        assert_eq!(updated.name, "renamed");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_cross_shop_access_is_not_found() {
        let store = MemoryRecordStore::new();
        let created = store.create(&shop("a"), &named("one", true)).await.unwrap();
        let id = created.id.clone().unwrap();

        let err = store.update(&shop("b"), &id, &created).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        let err = store.delete(&shop("b"), &id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));

        assert!(store.list(&shop("b")).await.unwrap().is_empty());
        assert_eq!(store.list(&shop("a")).await.unwrap()[0].name, "one");
    }

    #[tokio::test]
    async fn test_list_active_filters_and_keeps_order() {
        let store = MemoryRecordStore::new();
        store.create(&shop("a"), &named("first", true)).await.unwrap();
        store.create(&shop("a"), &named("hidden", false)).await.unwrap();
        store.create(&shop("a"), &named("third", true)).await.unwrap();

        let names: Vec<String> = store
            .list_active(&shop("a"))
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["first", "third"]);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = MemoryRecordStore::new();
        let created = store.create(&shop("a"), &named("one", true)).await.unwrap();
        store
            .delete(&shop("a"), created.id.as_ref().unwrap())
            .await
            .unwrap();
        assert!(store.list(&shop("a")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_outage_fails_every_call() {
        let store = MemoryRecordStore::new();
        store.set_unavailable(true);
        let err = store.create(&shop("a"), &named("one", true)).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(store.list_active(&shop("a")).await.is_err());

        store.set_unavailable(false);
        assert!(store.list(&shop("a")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seed_round_trip() {
        let mut seed = StoreSeed::default();
        seed.shops
            .insert(shop("a"), vec![named("x", true), named("y", false)]);
        let store = MemoryRecordStore::from_seed(seed);

        let listed = store.list(&shop("a")).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|g| g.id.is_some()));

        let exported = store.to_seed().unwrap();
        assert_eq!(exported.shops[&shop("a")].len(), 2);
    }
}
