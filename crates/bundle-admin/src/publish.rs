//! Replication of a shop's active groups to the storefront channel.
//!
//! Every publish re-reads the active set from the record store and
//! overwrites the channel with the whole list. Two publishes with no
//! mutation in between write identical bytes.

use crate::AdminError;
use bundle_cache::PublishChannel;
use bundle_commerce::offer::{normalize_product_ids, OfferGroup};
use bundle_commerce::ShopId;
use bundle_db::RecordStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Outcome of one publish attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishReport {
    pub shop: ShopId,
    /// Number of groups written. Zero on failure.
    pub groups: usize,
    /// Payload size in bytes. Zero on failure.
    pub bytes: usize,
    pub error: Option<AdminError>,
}

impl PublishReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Serialize groups into the storefront payload: a JSON array.
pub fn render_payload(groups: &[OfferGroup]) -> Result<Vec<u8>, AdminError> {
    let normalized: Vec<OfferGroup> = groups
        .iter()
        .map(|g| {
            let mut g = g.clone();
            g.product_ids = normalize_product_ids(g.product_ids.iter().map(|p| p.as_str()));
            g
        })
        .collect();
    Ok(serde_json::to_vec(&normalized)?)
}

/// Writes the active set of a shop to its publish channel.
///
/// Clones share one lock held from the store read to the channel write, so
/// a publish that read older data can never overwrite a newer one.
#[derive(Clone)]
pub struct Publisher {
    store: Arc<dyn RecordStore>,
    channel: Arc<dyn PublishChannel>,
    in_flight: Arc<Mutex<()>>,
}

impl Publisher {
    pub fn new(store: Arc<dyn RecordStore>, channel: Arc<dyn PublishChannel>) -> Self {
        Self {
            store,
            channel,
            in_flight: Arc::new(Mutex::new(())),
        }
    }

    /// Re-read, serialize and overwrite. Fails on any I/O error.
    pub async fn publish(&self, shop: &ShopId) -> Result<PublishReport, AdminError> {
        let _guard = self.in_flight.lock().await;
        let active = self
            .store
            .list_active(shop)
            .await
            .map_err(|e| AdminError::Publish(e.to_string()))?;
        let payload = render_payload(&active)?;
        self.channel.write(shop.as_str(), &payload).await?;

        tracing::info!(
            shop = %shop,
            groups = active.len(),
            bytes = payload.len(),
            "bundle offers published"
        );
        Ok(PublishReport {
            shop: shop.clone(),
            groups: active.len(),
            bytes: payload.len(),
            error: None,
        })
    }

    /// Like [`publish`](Self::publish), but a failure becomes a warning and
    /// a report instead of an error.
    pub async fn publish_best_effort(&self, shop: &ShopId) -> PublishReport {
        match self.publish(shop).await {
            Ok(report) => report,
            Err(error) => {
                tracing::warn!(shop = %shop, error = %error, "bundle offer publish failed");
                PublishReport {
                    shop: shop.clone(),
                    groups: 0,
                    bytes: 0,
                    error: Some(error),
                }
            }
        }
    }

    /// Run a best-effort publish on a background task.
    pub fn spawn(&self, shop: &ShopId) -> JoinHandle<PublishReport> {
        let publisher = self.clone();
        let shop = shop.clone();
        tokio::spawn(async move { publisher.publish_best_effort(&shop).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bundle_cache::{Cache, KvPublishChannel};
    use bundle_commerce::GroupId;
    use bundle_db::{MemoryRecordStore, StoreError};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Store whose first `list` stalls after reading, like a slow replica.
    struct StallingStore {
        inner: MemoryRecordStore,
        stalled: AtomicBool,
        first_read: Notify,
    }

    #[async_trait]
    impl RecordStore for StallingStore {
        async fn list(&self, shop: &ShopId) -> Result<Vec<OfferGroup>, StoreError> {
            let groups = self.inner.list(shop).await?;
            if !self.stalled.swap(true, Ordering::SeqCst) {
                self.first_read.notify_one();
                tokio::time::sleep(Duration::from_millis(200)).await;
            }
            Ok(groups)
        }

        async fn create(
            &self,
            shop: &ShopId,
            group: &OfferGroup,
        ) -> Result<OfferGroup, StoreError> {
            self.inner.create(shop, group).await
        }

        async fn update(
            &self,
            shop: &ShopId,
            id: &GroupId,
            group: &OfferGroup,
        ) -> Result<OfferGroup, StoreError> {
            self.inner.update(shop, id, group).await
        }

        async fn delete(&self, shop: &ShopId, id: &GroupId) -> Result<(), StoreError> {
            self.inner.delete(shop, id).await
        }
    }

    fn setup() -> (Arc<MemoryRecordStore>, Cache, Publisher) {
        let store = Arc::new(MemoryRecordStore::new());
        let cache = Cache::open_default().unwrap();
        let channel = Arc::new(KvPublishChannel::new(cache.clone()));
        let publisher = Publisher::new(store.clone(), channel);
        (store, cache, publisher)
    }

    fn active_group(name: &str) -> OfferGroup {
        let mut g = OfferGroup::create_draft();
        g.name = name.to_string();
        g.active = true;
        g.set_product_ids(["gid://shopify/Product/1"]);
        g
    }

    #[test]
    fn test_empty_payload_is_empty_array() {
        assert_eq!(render_payload(&[]).unwrap(), b"[]".to_vec());
    }

    #[test]
    fn test_payload_renormalizes_product_ids() {
        let mut g = active_group("a");
        g.product_ids = vec![bundle_commerce::ProductId::new("gid://shopify/Product/9")];
        let payload = render_payload(&[g]).unwrap();
        let parsed: Vec<OfferGroup> = serde_json::from_slice(&payload).unwrap();
        assert_eq!(parsed[0].product_ids[0].as_str(), "9");
    }

    #[tokio::test]
    async fn test_publish_writes_only_active_groups() {
        let (store, cache, publisher) = setup();
        let shop = ShopId::new("demo.shop");
        store.create(&shop, &active_group("on")).await.unwrap();
        let mut off = active_group("off");
        off.active = false;
        store.create(&shop, &off).await.unwrap();

        let report = publisher.publish(&shop).await.unwrap();
        assert_eq!(report.groups, 1);

        let raw = cache.get_raw("demo.shop:bundle_offers").unwrap().unwrap();
        let parsed: Vec<OfferGroup> = serde_json::from_slice(&raw).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "on");
        assert_eq!(report.bytes, raw.len());
    }

    #[tokio::test]
    async fn test_best_effort_reports_store_outage() {
        let (store, _cache, publisher) = setup();
        store.set_unavailable(true);

        let report = publisher.publish_best_effort(&ShopId::new("s")).await;
        assert!(!report.is_success());
        assert!(matches!(report.error, Some(AdminError::Publish(_))));
    }

    #[tokio::test]
    async fn test_best_effort_reports_channel_outage() {
        let (_store, cache, publisher) = setup();
        cache.set_unavailable(true);

        let report = publisher.spawn(&ShopId::new("s")).await.unwrap();
        assert!(!report.is_success());
    }

    #[tokio::test]
    async fn test_slow_early_publish_cannot_overwrite_later_one() {
        let store = Arc::new(StallingStore {
            inner: MemoryRecordStore::new(),
            stalled: AtomicBool::new(false),
            first_read: Notify::new(),
        });
        let cache = Cache::open_default().unwrap();
        let channel = Arc::new(KvPublishChannel::new(cache));
        let publisher = Publisher::new(store.clone(), channel.clone());
        let shop = ShopId::new("demo.shop");

        let created = store.create(&shop, &active_group("on")).await.unwrap();
        let early = publisher.spawn(&shop);
        store.first_read.notified().await;

        let mut off = created.clone();
        off.active = false;
        store
            .update(&shop, created.id.as_ref().unwrap(), &off)
            .await
            .unwrap();
        let late = publisher.spawn(&shop);

        assert!(early.await.unwrap().is_success());
        assert!(late.await.unwrap().is_success());

        let raw = channel.read("demo.shop").await.unwrap().unwrap();
        let parsed: Vec<OfferGroup> = serde_json::from_slice(&raw).unwrap();
        assert!(parsed.is_empty());
    }
}
