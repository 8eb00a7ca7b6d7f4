//! Shop-scoped record store for bundle offer groups.
//!
//! [`RecordStore`] is the authoritative store the admin side saves into.
//! Native builds use [`MemoryRecordStore`] (optionally loaded from a JSON
//! seed); Spin components use `SqliteRecordStore`.
//!
//! # Example
//!
//! ```rust,ignore
//! use bundle_db::{MemoryRecordStore, RecordStore};
//! use bundle_commerce::{OfferGroup, ShopId};
//!
//! let store = MemoryRecordStore::new();
//! let shop = ShopId::new("demo.myshop.dev");
//! let saved = store.create(&shop, &OfferGroup::create_draft()).await?;
//! assert!(saved.id.is_some());
//! ```

mod error;
mod memory;
mod store;
mod types;

#[cfg(target_arch = "wasm32")]
mod db;
#[cfg(target_arch = "wasm32")]
mod sqlite;

pub use error::StoreError;
pub use memory::{MemoryRecordStore, StoreSeed};
pub use store::RecordStore;
pub use types::{Row, Value};

#[cfg(target_arch = "wasm32")]
pub use db::Db;
#[cfg(target_arch = "wasm32")]
pub use sqlite::SqliteRecordStore;

/// Create a parameter list for SQL queries.
///
/// ```rust,ignore
/// db.execute("DELETE FROM offer_groups WHERE shop = ?", params!["demo"])?;
/// ```
#[macro_export]
macro_rules! params {
    () => {
        &[]
    };
    ($($param:expr),+ $(,)?) => {
        &[$($crate::Value::from($param)),+]
    };
}
