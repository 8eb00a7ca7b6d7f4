//! Tier pricing engine.
//!
//! Pure functions, no I/O. Shared by the admin preview and the storefront.

mod engine;

pub use engine::{
    price_group, price_tiers, PricedTier, SelectionReason, ShopperChoice, TierPricing,
};
