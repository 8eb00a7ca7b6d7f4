//! The storefront-facing publish channel.

use crate::{cache_key, Cache, CacheError};
use async_trait::async_trait;

/// Key suffix under which a shop's published offers are stored.
pub const DEFAULT_KEY_SUFFIX: &str = "bundle_offers";

/// Media type of the published payload.
pub const CONTENT_TYPE: &str = "application/json";

/// Per-shop slot holding the latest published offers.
///
/// A write fully replaces the previous payload.
#[async_trait]
pub trait PublishChannel: Send + Sync {
    async fn write(&self, shop: &str, payload: &[u8]) -> Result<(), CacheError>;

    async fn read(&self, shop: &str) -> Result<Option<Vec<u8>>, CacheError>;
}

/// Publish channel stored in the Key-Value store under `<shop>:<suffix>`.
#[derive(Clone, Debug)]
pub struct KvPublishChannel {
    cache: Cache,
    suffix: String,
}

impl KvPublishChannel {
    pub fn new(cache: Cache) -> Self {
        Self::with_suffix(cache, DEFAULT_KEY_SUFFIX)
    }

    pub fn with_suffix(cache: Cache, suffix: impl Into<String>) -> Self {
        Self {
            cache,
            suffix: suffix.into(),
        }
    }

    /// The key a shop's payload lives under.
    pub fn key_for(&self, shop: &str) -> String {
        cache_key!(shop, self.suffix)
    }
}

#[async_trait]
impl PublishChannel for KvPublishChannel {
    async fn write(&self, shop: &str, payload: &[u8]) -> Result<(), CacheError> {
        let key = self.key_for(shop);
        self.cache.set_raw(&key, payload)?;
        tracing::debug!(key = %key, bytes = payload.len(), "publish channel written");
        Ok(())
    }

    async fn read(&self, shop: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.cache.get_raw(&self.key_for(shop))
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_replaces_per_shop() {
        let cache = Cache::open_default().unwrap();
        let channel = KvPublishChannel::new(cache.clone());

        channel.write("a.shop", b"[1]").await.unwrap();
        channel.write("a.shop", b"[2]").await.unwrap();
        channel.write("b.shop", b"[]").await.unwrap();

        assert_eq!(channel.read("a.shop").await.unwrap(), Some(b"[2]".to_vec()));
        assert_eq!(channel.read("b.shop").await.unwrap(), Some(b"[]".to_vec()));
        assert!(cache.get_raw("a.shop:bundle_offers").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_unpublished_shop_reads_none() {
        let channel = KvPublishChannel::new(Cache::open_default().unwrap());
        assert_eq!(channel.read("nobody").await.unwrap(), None);
    }

    #[test]
    fn test_custom_suffix() {
        let channel = KvPublishChannel::with_suffix(Cache::open_default().unwrap(), "offers_v2");
        assert_eq!(channel.key_for("s"), "s:offers_v2");
    }
}
