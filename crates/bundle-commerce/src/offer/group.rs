//! Offer groups: a shop's bundle campaign and its tier ladder.

use crate::error::OfferError;
use crate::ids::{GroupId, ProductId, TierId};
use crate::offer::design::{Design, Placement};
use crate::offer::product::normalize_product_ids;
use crate::offer::tier::OfferTier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Name given to groups saved without one.
pub const DEFAULT_GROUP_NAME: &str = "Bundle offer";

/// A merchant-defined bundle campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferGroup {
    /// Absent until the record store assigns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<GroupId>,
    #[serde(default)]
    pub name: String,
    /// Only active groups are published.
    #[serde(default)]
    pub active: bool,
    /// Bare catalog ids. Empty means no product, not every product.
    #[serde(default)]
    pub product_ids: Vec<ProductId>,
    pub tiers: Vec<OfferTier>,
    #[serde(default)]
    pub design: Design,
    #[serde(default)]
    pub placement: Placement,
    /// Last sequence number used to mint a tier id.
    #[serde(default)]
    pub tier_sequence: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl OfferGroup {
    /// A fresh, unsaved, inactive draft with a representative tier ladder.
    pub fn create_draft() -> Self {
        let tiers = vec![
            OfferTier::new(TierId::from_sequence(1), 1, 0),
            OfferTier::new(TierId::from_sequence(2), 2, 1)
                .with_percentage(10.0)
                .with_label("Most Popular")
                .preselected(),
            OfferTier::new(TierId::from_sequence(3), 3, 2).with_percentage(15.0),
        ];

        Self {
            id: None,
            name: String::new(),
            active: false,
            product_ids: Vec::new(),
            tiers,
            design: Design::default(),
            placement: Placement::InsideForm,
            tier_sequence: 3,
            created_at: None,
            updated_at: None,
        }
    }

    /// Look up a tier by id.
    pub fn tier(&self, id: &TierId) -> Option<&OfferTier> {
        self.tiers.iter().find(|t| &t.id == id)
    }

    /// Mutable lookup of a tier by id.
    pub fn tier_mut(&mut self, id: &TierId) -> Option<&mut OfferTier> {
        self.tiers.iter_mut().find(|t| &t.id == id)
    }

    /// Append an undiscounted tier one unit above the current maximum.
    ///
    /// Tier ids come from a monotonic sequence and are never reused, even
    /// after the tier that held one is removed.
    pub fn add_tier(&mut self) -> TierId {
        let mut seq = self.tier_sequence;
        let id = loop {
            seq = seq.saturating_add(1);
            let candidate = TierId::from_sequence(seq);
            if self.tier(&candidate).is_none() {
                break candidate;
            }
        };
        self.tier_sequence = seq;

        let quantity = self
            .tiers
            .iter()
            .map(|t| t.quantity)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        let order = self
            .tiers
            .iter()
            .map(|t| t.order)
            .max()
            .map(|o| o.saturating_add(1))
            .unwrap_or(0);

        self.tiers.push(OfferTier::new(id.clone(), quantity, order));
        id
    }

    /// Remove a tier. The last remaining tier cannot be removed.
    ///
    /// Other tiers keep their `order` values.
    pub fn remove_tier(&mut self, tier_id: &TierId) -> Result<OfferTier, OfferError> {
        let index = self
            .tiers
            .iter()
            .position(|t| &t.id == tier_id)
            .ok_or_else(|| OfferError::validation(format!("unknown tier {}", tier_id)))?;

        if self.tiers.len() <= 1 {
            return Err(OfferError::validation(
                "an offer group must keep at least one tier",
            ));
        }

        Ok(self.tiers.remove(index))
    }

    /// Move the tier at `from` to `to` and renumber every tier's `order`
    /// to its new 0-based index.
    pub fn reorder_tiers(&mut self, from: usize, to: usize) -> Result<(), OfferError> {
        let len = self.tiers.len();
        if from >= len || to >= len {
            return Err(OfferError::validation(format!(
                "tier index out of range: {} -> {} (have {})",
                from, to, len
            )));
        }

        let tier = self.tiers.remove(from);
        self.tiers.insert(to, tier);
        for (index, tier) in self.tiers.iter_mut().enumerate() {
            tier.order = index as i64;
        }
        Ok(())
    }

    /// Replace the targeted products, normalizing to bare ids.
    pub fn set_product_ids<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.product_ids = normalize_product_ids(ids);
    }

    /// Whether this group targets the given bare product id.
    pub fn applies_to(&self, product_id: &str) -> bool {
        self.product_ids.iter().any(|p| p.as_str() == product_id)
    }

    /// Check the structural invariants.
    pub fn validate(&self) -> Result<(), OfferError> {
        if self.tiers.is_empty() {
            return Err(OfferError::validation(
                "an offer group must have at least one tier",
            ));
        }

        let mut ids = HashSet::new();
        let mut orders = HashSet::new();
        for tier in &self.tiers {
            tier.check().map_err(OfferError::Validation)?;
            if !ids.insert(&tier.id) {
                return Err(OfferError::validation(format!(
                    "duplicate tier id {}",
                    tier.id
                )));
            }
            if !orders.insert(tier.order) {
                return Err(OfferError::validation(format!(
                    "duplicate tier order {}",
                    tier.order
                )));
            }
        }
        Ok(())
    }

    /// Fill defaults, normalize product ids, then validate.
    ///
    /// This is the form every group takes before it is persisted.
    pub fn prepare(mut self) -> Result<Self, OfferError> {
        let trimmed = self.name.trim();
        self.name = if trimmed.is_empty() {
            DEFAULT_GROUP_NAME.to_string()
        } else {
            trimmed.to_string()
        };
        self.product_ids = normalize_product_ids(self.product_ids.iter().map(|p| p.as_str()));
        self.validate()?;
        Ok(self)
    }

    /// Copy with store-assigned timestamps cleared.
    ///
    /// Two groups with equal content compare equal through this view even
    /// when one of them has been round-tripped through the store.
    pub fn content(&self) -> OfferGroup {
        OfferGroup {
            created_at: None,
            updated_at: None,
            ..self.clone()
        }
    }
}
