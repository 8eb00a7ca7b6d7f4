//! Offer model.
//!
//! Contains offer groups, tiers, presentation options and product id
//! normalization.

mod design;
mod group;
mod product;
mod tier;

pub use design::{Design, Placement, TemplateVariant, TextSize};
pub use group::{OfferGroup, DEFAULT_GROUP_NAME};
pub use product::{normalize_product_id, normalize_product_ids};
pub use tier::{DiscountType, OfferTier};
