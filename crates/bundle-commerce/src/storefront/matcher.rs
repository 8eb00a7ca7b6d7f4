//! Product matching and the storefront render entry point.

use crate::money::Currency;
use crate::offer::{normalize_product_id, OfferGroup};
use crate::pricing::{price_group, ShopperChoice, TierPricing};
use crate::storefront::blob::parse_blob;
use serde::Serialize;

/// The single offer shown on a product page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontOffer {
    pub group: OfferGroup,
    pub pricing: TierPricing,
}

/// First group, by array position, that targets `product_id`.
///
/// Campaigns never stack: at most one group applies per product.
pub fn find_offer<'a>(groups: &'a [OfferGroup], product_id: &str) -> Option<&'a OfferGroup> {
    let bare = normalize_product_id(product_id);
    if bare.is_empty() {
        return None;
    }
    groups.iter().find(|g| g.applies_to(&bare))
}

/// Decode the published blob, match the product and price its tiers.
///
/// Any decoding problem is logged and treated as "no offers"; the product
/// page renders without the widget.
pub fn offer_for_product(
    raw_blob: &str,
    product_id: &str,
    unit_price: f64,
    currency: Currency,
    choice: Option<&ShopperChoice>,
) -> Option<StorefrontOffer> {
    let groups = match parse_blob(raw_blob) {
        Ok(groups) => groups,
        Err(e) => {
            tracing::debug!(error = %e, product_id, "ignoring unreadable offer blob");
            return None;
        }
    };

    let group = find_offer(&groups, product_id)?.clone();
    let pricing = price_group(&group, unit_price, currency, choice);
    Some(StorefrontOffer { group, pricing })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;

    fn group(name: &str, products: &[&str]) -> OfferGroup {
        let mut g = OfferGroup::create_draft();
        g.name = name.to_string();
        g.active = true;
        g.product_ids = products.iter().map(|p| ProductId::new(*p)).collect();
        g
    }

    #[test]
    fn test_first_matching_group_wins() {
        let groups = vec![group("a", &["1"]), group("b", &["2", "3"]), group("c", &["3"])];
        assert_eq!(find_offer(&groups, "3").unwrap().name, "b");
        assert!(find_offer(&groups, "4").is_none());
    }

    #[test]
    fn test_product_id_is_normalized_before_matching() {
        let groups = vec![group("a", &["8123"])];
        assert!(find_offer(&groups, "gid://shopify/Product/8123").is_some());
        assert!(find_offer(&groups, "").is_none());
    }

    #[test]
    fn test_offer_for_product_prices_selected_tier() {
        let blob = serde_json::to_string(&vec![group("a", &["9"])]).unwrap();
        let offer = offer_for_product(&blob, "9", 1000.0, Currency::USD, None).unwrap();
        assert_eq!(offer.group.name, "a");
        // The draft ladder preselects its 2-unit tier.
        assert_eq!(offer.pricing.selected().unwrap().quantity, 2);
        assert_eq!(
            offer.pricing.selected().unwrap().discounted_total.amount_minor,
            1800
        );
    }

    #[test]
    fn test_malformed_blob_yields_no_offer() {
        assert!(offer_for_product("{not json", "9", 1000.0, Currency::USD, None).is_none());
        assert!(offer_for_product("&quot;[", "9", 1000.0, Currency::USD, None).is_none());
    }
}
