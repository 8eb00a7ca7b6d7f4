//! Money type for representing monetary values.
//!
//! Amounts are integer minor units (cents for USD). Every tier total the
//! pricing engine reports is a `Money`, so preview and storefront agree to
//! the last minor unit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported display currencies. No conversion happens between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
            Currency::CAD => "CA$",
            Currency::AUD => "A$",
        }
    }

    /// Number of decimal places in the major unit.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            "CAD" => Some(Currency::CAD),
            "AUD" => Some(Currency::AUD),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Build from a catalog price given in minor units.
    ///
    /// Negative and non-finite inputs become zero; catalog anomalies must
    /// never fail a render.
    pub fn from_catalog_price(amount_minor: f64, currency: Currency) -> Self {
        if !amount_minor.is_finite() || amount_minor < 0.0 {
            return Self::zero(currency);
        }
        // `as` saturates at i64::MAX for out-of-range floats.
        Self::new(amount_minor.round() as i64, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Multiply by a unit count.
    pub fn times(&self, quantity: u32) -> Money {
        Money::new(
            self.amount_minor.saturating_mul(i64::from(quantity)),
            self.currency,
        )
    }

    /// The amount left after taking `percent` off, rounded half away from zero.
    ///
    /// `percent` is clamped to `0..=100`.
    pub fn percent_off(&self, percent: f64) -> Money {
        let percent = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
        let remaining = (self.amount_minor as f64 * (100.0 - percent) / 100.0).round();
        Money::new(remaining as i64, self.currency)
    }

    /// Subtract a fixed minor-unit amount, never going below zero.
    pub fn minus_floored(&self, amount_minor: f64) -> Money {
        let off = if amount_minor.is_finite() && amount_minor > 0.0 {
            amount_minor.round() as i64
        } else {
            0
        };
        Money::new(self.amount_minor.saturating_sub(off).max(0), self.currency)
    }

    /// Difference to another amount in the same currency, floored at zero.
    pub fn savings_to(&self, discounted: &Money) -> Money {
        Money::new(
            self.amount_minor
                .saturating_sub(discounted.amount_minor)
                .max(0),
            self.currency,
        )
    }

    /// Per-unit amount, truncated toward zero.
    pub fn per_unit(&self, quantity: u32) -> Money {
        if quantity == 0 {
            return *self;
        }
        Money::new(self.amount_minor / i64::from(quantity), self.currency)
    }

    /// Convert to a decimal value in major units.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_minor as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{}{:.places$}", self.currency.symbol(), self.to_decimal())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_price_rounds_to_minor_units() {
        let m = Money::from_catalog_price(2494.6, Currency::USD);
        assert_eq!(m.amount_minor, 2495);
    }

    #[test]
    fn test_catalog_price_anomalies_become_zero() {
        assert!(Money::from_catalog_price(-10.0, Currency::USD).is_zero());
        assert!(Money::from_catalog_price(f64::NAN, Currency::USD).is_zero());
        assert!(Money::from_catalog_price(f64::INFINITY, Currency::USD).is_zero());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(100, Currency::JPY).display(), "\u{00a5}100");
    }

    #[test]
    fn test_percent_off() {
        let m = Money::new(7485, Currency::USD);
        assert_eq!(m.percent_off(20.0).amount_minor, 5988);
        assert_eq!(m.percent_off(0.0).amount_minor, 7485);
        assert_eq!(m.percent_off(150.0).amount_minor, 0);
    }

    #[test]
    fn test_minus_floored() {
        let m = Money::new(1000, Currency::USD);
        assert_eq!(m.minus_floored(250.0).amount_minor, 750);
        assert_eq!(m.minus_floored(5000.0).amount_minor, 0);
        assert_eq!(m.minus_floored(-5.0).amount_minor, 1000);
    }

    #[test]
    fn test_per_unit() {
        let m = Money::new(5988, Currency::USD);
        assert_eq!(m.per_unit(3).amount_minor, 1996);
        assert_eq!(m.per_unit(0).amount_minor, 5988);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("usd"), Some(Currency::USD));
        assert_eq!(Currency::from_code(" EUR "), Some(Currency::EUR));
        assert_eq!(Currency::from_code("XXX"), None);
    }
}
