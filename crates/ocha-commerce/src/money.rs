//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation so amounts read from the backend
//! and totals sent to it are rounded exactly once.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies the storefront prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    CHF,
}

impl Currency {
    /// Get the currency code (e.g., "CHF").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::CHF => "CHF",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    fn multiplier(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (Rappen for CHF).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
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

    /// Create a Money value from a decimal amount, rounding to the nearest cent.
    ///
    /// Non-finite input is treated as zero.
    ///
    /// ```
    /// use ocha_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(6.5, Currency::CHF);
    /// assert_eq!(price.amount_cents, 650);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        if !amount.is_finite() {
            return Self::zero(currency);
        }
        let amount_cents = (amount * currency.multiplier() as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Round the sum of `amounts` to cents.
    ///
    /// The addends are summed unrounded, so sub-cent prices only round once.
    pub fn from_decimal_sum(amounts: impl IntoIterator<Item = f64>, currency: Currency) -> Self {
        Self::from_decimal(amounts.into_iter().sum(), currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / self.currency.multiplier() as f64
    }

    /// Format as a display string (e.g., "CHF 12.50").
    pub fn display(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{} {:.places$}", self.currency.code(), self.to_decimal())
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
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(49.99, Currency::CHF).amount_cents, 4999);
        assert_eq!(Money::from_decimal(0.1 + 0.2, Currency::CHF).amount_cents, 30);
        assert_eq!(Money::from_decimal(f64::NAN, Currency::CHF).amount_cents, 0);
    }

    #[test]
    fn test_money_to_decimal() {
        let m = Money::new(1250, Currency::CHF);
        assert!((m.to_decimal() - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(1250, Currency::CHF).display(), "CHF 12.50");
        assert_eq!(Money::new(5, Currency::CHF).to_string(), "CHF 0.05");
    }

    #[test]
    fn test_sum_rounds_once() {
        let sum = Money::from_decimal_sum([0.125 * 4.0], Currency::CHF);
        assert_eq!(sum.amount_cents, 50);

        let sum = Money::from_decimal_sum([0.005, 0.005], Currency::CHF);
        assert_eq!(sum.amount_cents, 1);

        assert!(Money::from_decimal_sum([], Currency::CHF).is_zero());
    }
}
