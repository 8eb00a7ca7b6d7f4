//! Key-value layer that carries published bundle offers to the storefront.
//!
//! The admin side writes one JSON array per shop under
//! `<shop>:bundle_offers`; the storefront reads it back verbatim.
//!
//! # Example
//!
//! ```rust,ignore
//! use bundle_cache::{Cache, KvPublishChannel, PublishChannel};
//!
//! let channel = KvPublishChannel::new(Cache::open_default()?);
//! channel.write("demo.myshop.dev", b"[]").await?;
//! ```

mod channel;
mod error;
mod kv;

pub use channel::{KvPublishChannel, PublishChannel, CONTENT_TYPE, DEFAULT_KEY_SUFFIX};
pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, KvPublishChannel, PublishChannel};
}
