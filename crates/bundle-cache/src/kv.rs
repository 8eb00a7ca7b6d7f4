//! Key-Value store wrapper with automatic serialization.

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use std::collections::BTreeMap;
#[cfg(not(target_arch = "wasm32"))]
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(not(target_arch = "wasm32"))]
use std::sync::{Arc, Mutex};

/// Cache backed by Spin's Key-Value Store.
///
/// Native builds keep entries in process memory instead. Clones share the
/// same entries, so a writer and a reader built from one `Cache` see each
/// other's data.
#[derive(Clone, Debug)]
pub struct Cache {
    #[cfg(target_arch = "wasm32")]
    name: Option<String>,
    #[cfg(not(target_arch = "wasm32"))]
    entries: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
    #[cfg(not(target_arch = "wasm32"))]
    offline: Arc<AtomicBool>,
}

impl Cache {
    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.set_raw(key, &bytes)
    }
}

#[cfg(target_arch = "wasm32")]
impl Cache {
    /// Use the default Key-Value store.
    pub fn open_default() -> Result<Self, CacheError> {
        let cache = Self { name: None };
        cache.store()?;
        Ok(cache)
    }

    /// Use a named Key-Value store.
    pub fn open(name: &str) -> Result<Self, CacheError> {
        let cache = Self {
            name: Some(name.to_string()),
        };
        cache.store()?;
        Ok(cache)
    }

    fn store(&self) -> Result<spin_sdk::key_value::Store, CacheError> {
        let opened = match &self.name {
            Some(name) => spin_sdk::key_value::Store::open(name),
            None => spin_sdk::key_value::Store::open_default(),
        };
        opened.map_err(|e| CacheError::OpenError(e.to_string()))
    }

    /// Raw bytes stored under `key`.
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.store()?
            .get(key)
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }

    /// Store raw bytes under `key`, replacing any previous value.
    pub fn set_raw(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError> {
        self.store()?
            .set(key, bytes)
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Cache {
    /// Open an empty in-memory store.
    pub fn open_default() -> Result<Self, CacheError> {
        Ok(Self {
            entries: Arc::new(Mutex::new(BTreeMap::new())),
            offline: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Open an empty in-memory store. The name is only meaningful under Spin.
    pub fn open(_name: &str) -> Result<Self, CacheError> {
        Self::open_default()
    }

    /// Simulate an outage: every operation fails until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.offline.store(unavailable, Ordering::SeqCst);
    }

    fn with_entries<R>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, Vec<u8>>) -> R,
    ) -> Result<R, CacheError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CacheError::StoreError("store is offline".to_string()));
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CacheError::StoreError("store lock poisoned".to_string()))?;
        Ok(f(&mut entries))
    }

    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.with_entries(|e| e.get(key).cloned())
    }

    pub fn set_raw(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError> {
        self.with_entries(|e| {
            e.insert(key.to_string(), bytes.to_vec());
        })
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust,ignore
/// let key = cache_key!("demo.myshop.dev", "bundle_offers");
/// // Returns "demo.myshop.dev:bundle_offers"
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
