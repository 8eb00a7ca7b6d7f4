//! Storefront consumer.
//!
//! Reads the published blob, picks the offer for the current product and
//! prices it.

mod blob;
mod matcher;

pub use blob::{html_unescape, parse_blob};
pub use matcher::{find_offer, offer_for_product, StorefrontOffer};
