//! Tier pricing and selection.
//!
//! The editor preview and the storefront both call [`price_group`]; there is
//! no other code path that decides which tier is highlighted.

use crate::ids::TierId;
use crate::money::{Currency, Money};
use crate::offer::{DiscountType, OfferGroup, OfferTier};
use serde::{Deserialize, Serialize};

/// An explicit choice made by the shopper on the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum ShopperChoice {
    /// A specific tier card was clicked.
    Tier(TierId),
    /// The quantity selector was set; matches the first tier with that quantity.
    Quantity(u32),
}

/// Why the selected tier won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionReason {
    ShopperChoice,
    BestValue,
    Preselect,
    FirstTier,
}

/// Pricing for a single tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedTier {
    pub tier_id: TierId,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    /// unit price * quantity.
    pub original_total: Money,
    /// Total after the tier discount, never negative.
    pub discounted_total: Money,
    pub savings: Money,
    pub unit_price_after_discount: Money,
    pub is_selected: bool,
}

/// Complete pricing for one group at one unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierPricing {
    /// Sanitized unit price the totals were computed from.
    pub unit_price: Money,
    /// Tiers in stored `order`.
    pub tiers: Vec<PricedTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection_reason: Option<SelectionReason>,
}

impl TierPricing {
    /// The highlighted tier, if the group has any tiers.
    pub fn selected(&self) -> Option<&PricedTier> {
        self.tiers.iter().find(|t| t.is_selected)
    }

    /// Index of the highlighted tier in `tiers`.
    pub fn selected_index(&self) -> Option<usize> {
        self.tiers.iter().position(|t| t.is_selected)
    }
}

/// Price every tier of `group` and resolve the selected one.
///
/// `unit_price` is in minor units; negative or non-finite values are priced
/// as zero.
pub fn price_group(
    group: &OfferGroup,
    unit_price: f64,
    currency: Currency,
    choice: Option<&ShopperChoice>,
) -> TierPricing {
    price_tiers(
        &group.tiers,
        group.design.auto_select_best_value,
        unit_price,
        currency,
        choice,
    )
}

/// Same as [`price_group`] for a bare tier list.
pub fn price_tiers(
    tiers: &[OfferTier],
    auto_select_best_value: bool,
    unit_price: f64,
    currency: Currency,
    choice: Option<&ShopperChoice>,
) -> TierPricing {
    let unit = Money::from_catalog_price(unit_price, currency);

    let mut ordered: Vec<&OfferTier> = tiers.iter().collect();
    ordered.sort_by_key(|t| t.order);

    let selection = select_tier(&ordered, auto_select_best_value, choice);

    let priced = ordered
        .iter()
        .enumerate()
        .map(|(index, tier)| {
            let original_total = unit.times(tier.quantity);
            let discounted_total = tier.apply_discount(&original_total);
            PricedTier {
                tier_id: tier.id.clone(),
                quantity: tier.quantity,
                label: tier.label.clone(),
                discount_type: tier.discount_type,
                discount_value: tier.discount_value,
                original_total,
                discounted_total,
                savings: original_total.savings_to(&discounted_total),
                unit_price_after_discount: discounted_total.per_unit(tier.quantity),
                is_selected: selection.map(|(i, _)| i) == Some(index),
            }
        })
        .collect();

    TierPricing {
        unit_price: unit,
        tiers: priced,
        selection_reason: selection.map(|(_, reason)| reason),
    }
}

/// Resolve the selected tier among tiers already sorted by `order`.
///
/// Precedence: explicit shopper choice, then best value (largest
/// `discount_value`, first declared on ties) when enabled, then the first
/// preselected tier, then the first tier.
fn select_tier(
    ordered: &[&OfferTier],
    auto_select_best_value: bool,
    choice: Option<&ShopperChoice>,
) -> Option<(usize, SelectionReason)> {
    if ordered.is_empty() {
        return None;
    }

    if let Some(choice) = choice {
        let chosen = match choice {
            ShopperChoice::Tier(id) => ordered.iter().position(|t| &t.id == id),
            ShopperChoice::Quantity(qty) => ordered.iter().position(|t| t.quantity == *qty),
        };
        if let Some(index) = chosen {
            return Some((index, SelectionReason::ShopperChoice));
        }
    }

    if auto_select_best_value {
        let mut best = 0;
        for (index, tier) in ordered.iter().enumerate().skip(1) {
            // Strictly greater keeps the first-declared tier on ties.
            if comparable(tier.discount_value) > comparable(ordered[best].discount_value) {
                best = index;
            }
        }
        return Some((best, SelectionReason::BestValue));
    }

    if let Some(index) = ordered.iter().position(|t| t.preselect) {
        return Some((index, SelectionReason::Preselect));
    }

    Some((0, SelectionReason::FirstTier))
}

fn comparable(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
