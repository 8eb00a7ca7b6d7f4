//! Offer tiers and their discount union.

use crate::ids::TierId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// How a tier's `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Percent off the tier total (0 - 100).
    #[default]
    Percentage,
    /// Minor-unit amount off the tier total.
    Fixed,
}

impl DiscountType {
    /// Parse a UI-supplied discount type, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "percentage" | "percent" | "%" => Some(DiscountType::Percentage),
            "fixed" | "fixed_amount" | "amount" => Some(DiscountType::Fixed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Fixed => "fixed",
        }
    }
}

/// One quantity rung within an offer group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTier")]
pub struct OfferTier {
    /// Stable id, unique within its group.
    pub id: TierId,
    /// Unit count this tier represents.
    pub quantity: u32,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    /// Display tag such as "Most Popular".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Candidate flag for default selection.
    pub preselect: bool,
    /// Display and storage order, unique within the group.
    pub order: i64,
}

impl OfferTier {
    /// Create an undiscounted tier.
    pub fn new(id: TierId, quantity: u32, order: i64) -> Self {
        Self {
            id,
            quantity,
            discount_type: DiscountType::Percentage,
            discount_value: 0.0,
            label: None,
            preselect: false,
            order,
        }
    }

    /// Set a percentage discount.
    pub fn with_percentage(mut self, percent: f64) -> Self {
        self.discount_type = DiscountType::Percentage;
        self.discount_value = percent;
        self
    }

    /// Set a fixed minor-unit discount.
    pub fn with_fixed(mut self, amount_minor: f64) -> Self {
        self.discount_type = DiscountType::Fixed;
        self.discount_value = amount_minor;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn preselected(mut self) -> Self {
        self.preselect = true;
        self
    }

    /// Tier total after its discount, given the tier's full-price total.
    pub fn apply_discount(&self, original_total: &Money) -> Money {
        match self.discount_type {
            DiscountType::Percentage => original_total.percent_off(self.discount_value),
            DiscountType::Fixed => original_total.minus_floored(self.discount_value),
        }
    }

    /// Check the per-tier structural rules.
    pub(crate) fn check(&self) -> Result<(), String> {
        if self.quantity == 0 {
            return Err(format!("tier {} must have a positive quantity", self.id));
        }
        if !self.discount_value.is_finite() || self.discount_value < 0.0 {
            return Err(format!(
                "tier {} has an invalid discount value {}",
                self.id, self.discount_value
            ));
        }
        if self.discount_type == DiscountType::Percentage && self.discount_value > 100.0 {
            return Err(format!(
                "tier {} percentage discount {} exceeds 100",
                self.id, self.discount_value
            ));
        }
        Ok(())
    }
}

/// Number as it may arrive from a form field: numeric or string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

impl LooseNumber {
    fn to_f64(&self) -> Result<f64, String> {
        match self {
            LooseNumber::Int(i) => Ok(*i as f64),
            LooseNumber::Float(f) => Ok(*f),
            LooseNumber::Text(s) if s.trim().is_empty() => Ok(0.0),
            LooseNumber::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", s)),
        }
    }
}

/// Wire shape of a tier before normalization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTier {
    id: TierId,
    quantity: LooseNumber,
    #[serde(default)]
    discount_type: Option<String>,
    #[serde(default)]
    discount_value: Option<LooseNumber>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    preselect: bool,
    #[serde(default)]
    order: i64,
}

impl TryFrom<RawTier> for OfferTier {
    type Error = String;

    fn try_from(raw: RawTier) -> Result<Self, Self::Error> {
        let quantity = raw.quantity.to_f64()?;
        if quantity.fract() != 0.0 || quantity < 1.0 || quantity > f64::from(u32::MAX) {
            return Err(format!(
                "tier {} quantity must be a positive integer, got {}",
                raw.id, quantity
            ));
        }

        let discount_type = match raw.discount_type.as_deref() {
            None => DiscountType::Percentage,
            Some(s) => DiscountType::parse(s)
                .ok_or_else(|| format!("tier {} has unknown discount type '{}'", raw.id, s))?,
        };

        let discount_value = match raw.discount_value {
            Some(v) => v.to_f64()?,
            None => 0.0,
        };

        let label = raw
            .label
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        Ok(OfferTier {
            id: raw.id,
            quantity: quantity as u32,
            discount_type,
            discount_value,
            label,
            preselect: raw.preselect,
            order: raw.order,
        })
    }
}
