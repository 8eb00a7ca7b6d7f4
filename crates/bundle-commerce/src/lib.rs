//! Bundle offer domain types and logic.
//!
//! This crate is free of I/O so it can run both in the merchant admin and in
//! the storefront runtime:
//!
//! - **Offer**: offer groups, tiers, design options, product id normalization
//! - **Pricing**: per-tier totals and the selected-tier rule
//! - **Storefront**: decoding the published blob and matching a product
//!
//! # Example
//!
//! ```rust
//! use bundle_commerce::prelude::*;
//!
//! let mut group = OfferGroup::create_draft();
//! group.set_product_ids(["gid://shopify/Product/42"]);
//! group.design.auto_select_best_value = true;
//!
//! let pricing = price_group(&group, 2495.0, Currency::USD, None);
//! let best = pricing.selected().unwrap();
//! assert_eq!(best.quantity, 3);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod offer;
pub mod pricing;
pub mod storefront;

pub use error::OfferError;
pub use ids::*;
pub use money::{Currency, Money};
pub use offer::{OfferGroup, OfferTier};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::OfferError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    pub use crate::offer::{
        normalize_product_id, normalize_product_ids, Design, DiscountType, OfferGroup, OfferTier,
        Placement, TemplateVariant, TextSize,
    };

    pub use crate::pricing::{
        price_group, price_tiers, PricedTier, SelectionReason, ShopperChoice, TierPricing,
    };

    pub use crate::storefront::{find_offer, offer_for_product, parse_blob, StorefrontOffer};
}
