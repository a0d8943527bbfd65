//! Cart pricing calculations.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A tax rate in basis points (1/100 of a percent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxRate {
    basis_points: u32,
}

impl TaxRate {
    pub const fn from_basis_points(basis_points: u32) -> Self {
        Self { basis_points }
    }

    pub fn basis_points(&self) -> u32 {
        self.basis_points
    }

    /// The rate as a fraction, e.g. `0.15`.
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.basis_points) / 10_000.0
    }

    /// Tax owed on an amount, rounded half-up to the cent.
    pub fn tax_on(&self, amount: Money) -> Money {
        amount.apply_basis_points(self.basis_points)
    }
}

/// Flat 15% sales tax applied to every order.
pub const TAX_RATE: TaxRate = TaxRate::from_basis_points(1500);

/// Pricing breakdown for a cart or order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OrderTotals {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// Subtotal plus tax.
    pub total: Money,
}

/// Derive tax and total from a subtotal using the storefront tax rate.
///
/// This is the single place totals are computed, so the cart display and
/// the total submitted at checkout always agree.
pub fn compute_totals(subtotal: Money) -> OrderTotals {
    compute_totals_with(subtotal, TAX_RATE)
}

/// Derive tax and total with an explicit rate.
pub fn compute_totals_with(subtotal: Money, rate: TaxRate) -> OrderTotals {
    let tax = rate.tax_on(subtotal);
    OrderTotals {
        subtotal,
        tax,
        total: subtotal.saturating_add(&tax),
    }
}
