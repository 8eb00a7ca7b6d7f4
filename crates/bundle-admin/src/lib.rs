//! Merchant-side editing, saving and publishing of bundle offers.
//!
//! - [`Editor`]: the single-group editing session and its dirty tracking
//! - [`Publisher`]: full resync of a shop's active groups to the storefront
//! - [`OfferService`]: ties an editor to a record store and a publisher
//!
//! # Example
//!
//! ```rust,ignore
//! use bundle_admin::{Editor, OfferService, Publisher};
//!
//! let service = OfferService::new(shop, store.clone(), Publisher::new(store, channel));
//! let mut editor = Editor::default();
//! editor.create_new();
//! editor.set_product_ids(["gid://shopify/Product/42"])?;
//! editor.set_active(true)?;
//!
//! let receipt = service.save(&mut editor).await?;
//! let report = receipt.publish.await?;
//! ```

mod editor;
mod error;
mod publish;
mod service;
mod snapshot;

pub use editor::{Editor, EditorState, SaveKind, SaveOutcome, SaveTicket};
pub use error::AdminError;
pub use publish::{render_payload, PublishReport, Publisher};
pub use service::{OfferService, SaveReceipt};
pub use snapshot::GroupSnapshot;
