//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues. On the wire an amount is a plain decimal number
//! (`99`, `149.5`); the currency is a property of the storefront, not of
//! each JSON value.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Currency the storefront prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Saudi riyal.
    #[default]
    SAR,
}

impl Currency {
    /// Get the currency code (e.g., "SAR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::SAR => "SAR",
        }
    }

    /// Get the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::SAR => "SR ",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value in the default currency from cents.
    pub fn from_cents(amount_cents: i64) -> Self {
        Self::new(amount_cents, Currency::default())
    }

    /// Create a Money value from a decimal amount, rounding to the nearest cent.
    ///
    /// ```
    /// use shelf_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::SAR);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "SR 49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", self.to_decimal())
    }

    /// Add another amount, clamping at the representable range.
    pub fn saturating_add(&self, other: &Money) -> Money {
        Money::new(
            self.amount_cents.saturating_add(other.amount_cents),
            self.currency,
        )
    }

    /// Multiply by a quantity, clamping at the representable range.
    pub fn saturating_multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor), self.currency)
    }

    /// Apply a rate expressed in basis points (1/100 of a percent),
    /// rounding half away from zero to the nearest cent.
    pub fn apply_basis_points(&self, basis_points: u32) -> Money {
        let scaled = i128::from(self.amount_cents) * i128::from(basis_points);
        let rounded = if scaled >= 0 {
            (scaled + 5_000) / 10_000
        } else {
            (scaled - 5_000) / 10_000
        };
        let cents = i64::try_from(rounded).unwrap_or(if rounded > 0 { i64::MAX } else { i64::MIN });
        Money::new(cents, self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.amount_cents % 100 == 0 {
            serializer.serialize_i64(self.amount_cents / 100)
        } else {
            serializer.serialize_f64(self.to_decimal())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() {
            return Err(serde::de::Error::custom("amount must be a finite number"));
        }
        Ok(Money::from_decimal(amount, Currency::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::SAR);
        assert_eq!(m.amount_cents, 4999);

        let m = Money::from_decimal(0.1 + 0.2, Currency::SAR);
        assert_eq!(m.amount_cents, 30);
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(4999, Currency::SAR);
        assert_eq!(m.display(), "SR 49.99");
        assert_eq!(m.display_amount(), "49.99");

        let m = Money::new(8900, Currency::SAR);
        assert_eq!(m.display(), "SR 89.00");
    }

    #[test]
    fn test_money_saturating_add() {
        let a = Money::from_cents(1000);
        assert_eq!(a.saturating_add(&Money::from_cents(500)).amount_cents, 1500);
        assert_eq!(Money::from_cents(i64::MAX).saturating_add(&a).amount_cents, i64::MAX);
    }

    #[test]
    fn test_money_basis_points_round_half_up() {
        // 15% of 0.10 is 0.015, rounds to 0.02
        let m = Money::from_cents(10);
        assert_eq!(m.apply_basis_points(1500).amount_cents, 2);

        // 15% of 99.00 is exactly 14.85
        let m = Money::from_cents(9900);
        assert_eq!(m.apply_basis_points(1500).amount_cents, 1485);
    }

    #[test]
    fn test_money_serializes_as_decimal_number() {
        assert_eq!(serde_json::to_string(&Money::from_cents(9900)).unwrap(), "99");
        assert_eq!(serde_json::to_string(&Money::from_cents(14950)).unwrap(), "149.5");
    }

    #[test]
    fn test_money_deserializes_from_number() {
        let m: Money = serde_json::from_str("149.99").unwrap();
        assert_eq!(m.amount_cents, 14999);
        let m: Money = serde_json::from_str("99").unwrap();
        assert_eq!(m.amount_cents, 9900);
    }
}
