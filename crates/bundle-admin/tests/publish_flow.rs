use bundle_admin::{AdminError, Editor, EditorState, OfferService, Publisher};
use bundle_cache::{Cache, KvPublishChannel, PublishChannel};
use bundle_commerce::prelude::*;
use bundle_db::{MemoryRecordStore, RecordStore};
use std::sync::Arc;

const SHOP: &str = "demo.myshop.dev";

struct Harness {
    store: Arc<MemoryRecordStore>,
    cache: Cache,
    channel: Arc<KvPublishChannel>,
    service: OfferService,
}

fn harness() -> Harness {
    let store = Arc::new(MemoryRecordStore::new());
    let cache = Cache::open_default().unwrap();
    let channel = Arc::new(KvPublishChannel::new(cache.clone()));
    let publisher = Publisher::new(store.clone(), channel.clone());
    let service = OfferService::new(ShopId::new(SHOP), store.clone(), publisher);
    Harness {
        store,
        cache,
        channel,
        service,
    }
}

async fn published(h: &Harness) -> Vec<OfferGroup> {
    match h.channel.read(SHOP).await.unwrap() {
        Some(bytes) => serde_json::from_slice(&bytes).unwrap(),
        None => Vec::new(),
    }
}

fn new_active_offer(editor: &mut Editor, product: &str) {
    editor.create_new();
    editor.set_name("Buy more, save more").unwrap();
    editor.set_product_ids([product]).unwrap();
    editor.set_active(true).unwrap();
}

#[tokio::test]
async fn save_publishes_and_storefront_matches() {
    let h = harness();
    let mut editor = Editor::new(Currency::USD);
    new_active_offer(&mut editor, "gid://shopify/Product/42");

    let receipt = h.service.save(&mut editor).await.unwrap();
    let report = receipt.publish.await.unwrap();
    assert!(report.is_success());
    assert_eq!(report.groups, 1);

    let raw = h.channel.read(SHOP).await.unwrap().unwrap();
    let blob = String::from_utf8(raw).unwrap();
    let offer = offer_for_product(&blob, "42", 2495.0, Currency::USD, None).unwrap();
    assert_eq!(offer.group.id, receipt.group.id);
    assert_eq!(offer.pricing.selected().unwrap().quantity, 2);
}

#[tokio::test]
async fn create_retrofits_id_and_next_save_updates() {
    let h = harness();
    let mut editor = Editor::default();
    new_active_offer(&mut editor, "1");

    let first = h.service.save(&mut editor).await.unwrap();
    first.publish.await.unwrap();
    assert_eq!(editor.state(), EditorState::Clean);
    assert_eq!(editor.working().unwrap().id, first.group.id);

    editor.set_name("Renamed").unwrap();
    let second = h.service.save(&mut editor).await.unwrap();
    second.publish.await.unwrap();

    let all = h.service.list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Renamed");
    assert_eq!(second.group.id, first.group.id);
}

#[tokio::test]
async fn deactivating_removes_group_from_payload() {
    let h = harness();
    let mut editor = Editor::default();
    new_active_offer(&mut editor, "1");
    h.service.save(&mut editor).await.unwrap().publish.await.unwrap();
    assert_eq!(published(&h).await.len(), 1);

    editor.set_active(false).unwrap();
    h.service.save(&mut editor).await.unwrap().publish.await.unwrap();

    assert!(published(&h).await.is_empty());
    assert_eq!(h.service.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn republish_without_mutation_is_byte_identical() {
    let h = harness();
    let mut editor = Editor::default();
    new_active_offer(&mut editor, "1");
    h.service.save(&mut editor).await.unwrap().publish.await.unwrap();
    new_active_offer(&mut editor, "2");
    h.service.save(&mut editor).await.unwrap().publish.await.unwrap();

    h.service.republish().await.unwrap();
    let first = h.channel.read(SHOP).await.unwrap();
    h.service.republish().await.unwrap();
    let second = h.channel.read(SHOP).await.unwrap();

    assert!(first.is_some());
    assert_eq!(first, second);
}

#[tokio::test]
async fn store_failure_preserves_working_copy() {
    let h = harness();
    let mut editor = Editor::default();
    new_active_offer(&mut editor, "1");
    editor.add_tier().unwrap();
    let before = editor.working().cloned();

    h.store.set_unavailable(true);
    let err = h.service.save(&mut editor).await.unwrap_err();

    assert!(matches!(err, AdminError::StoreUnavailable(_)));
    assert!(err.is_retryable());
    assert_eq!(editor.working().cloned(), before);
    assert_eq!(editor.state(), EditorState::Dirty);

    h.store.set_unavailable(false);
    h.service.save(&mut editor).await.unwrap();
    assert_eq!(editor.state(), EditorState::Clean);
}

#[tokio::test]
async fn publish_failure_does_not_fail_save() {
    let h = harness();
    let mut editor = Editor::default();
    new_active_offer(&mut editor, "1");

    h.cache.set_unavailable(true);
    let receipt = h.service.save(&mut editor).await.unwrap();
    let report = receipt.publish.await.unwrap();

    assert!(!report.is_success());
    assert_eq!(editor.state(), EditorState::Clean);
    assert_eq!(h.store.list(&ShopId::new(SHOP)).await.unwrap().len(), 1);

    h.cache.set_unavailable(false);
    let report = h.service.republish().await.unwrap();
    assert_eq!(report.groups, 1);
    assert_eq!(published(&h).await.len(), 1);
}

#[tokio::test]
async fn delete_resyncs_storefront() {
    let h = harness();
    let mut editor = Editor::default();
    new_active_offer(&mut editor, "1");
    let receipt = h.service.save(&mut editor).await.unwrap();
    receipt.publish.await.unwrap();

    let id = receipt.group.id.unwrap();
    h.service.delete(&id).await.unwrap().await.unwrap();
    assert!(published(&h).await.is_empty());

    let err = h.service.delete(&id).await.unwrap_err();
    assert!(matches!(err, AdminError::NotFound { .. }));
}

#[tokio::test]
async fn other_shop_cannot_touch_group() {
    let h = harness();
    let mut editor = Editor::default();
    new_active_offer(&mut editor, "1");
    let receipt = h.service.save(&mut editor).await.unwrap();
    receipt.publish.await.unwrap();
    let id = receipt.group.id.unwrap();

    let intruder = OfferService::new(
        ShopId::new("other.shop"),
        h.store.clone(),
        Publisher::new(h.store.clone(), h.channel.clone()),
    );
    let err = intruder.set_active(&id, false).await.unwrap_err();
    assert!(matches!(err, AdminError::NotFound { .. }));

    let mut other_editor = Editor::default();
    assert!(intruder.load_into(&mut other_editor, &id).await.is_err());
    assert_eq!(other_editor.state(), EditorState::NoActiveGroup);
}

#[tokio::test]
async fn set_active_toggles_storefront_visibility() {
    let h = harness();
    let mut editor = Editor::default();
    new_active_offer(&mut editor, "1");
    let receipt = h.service.save(&mut editor).await.unwrap();
    receipt.publish.await.unwrap();
    let id = receipt.group.id.unwrap();

    let off = h.service.set_active(&id, false).await.unwrap();
    off.publish.await.unwrap();
    assert!(published(&h).await.is_empty());

    let on = h.service.set_active(&id, true).await.unwrap();
    on.publish.await.unwrap();
    assert_eq!(published(&h).await[0].id, Some(id));
}

#[tokio::test]
async fn loaded_group_discard_is_noop() {
    let h = harness();
    let mut editor = Editor::default();
    new_active_offer(&mut editor, "1");
    let receipt = h.service.save(&mut editor).await.unwrap();
    receipt.publish.await.unwrap();

    let mut fresh = Editor::default();
    h.service
        .load_into(&mut fresh, receipt.group.id.as_ref().unwrap())
        .await
        .unwrap();
    let before = fresh.working().cloned();

    assert!(fresh.discard());
    assert_eq!(fresh.state(), EditorState::Clean);
    assert_eq!(fresh.working().cloned(), before);
}
