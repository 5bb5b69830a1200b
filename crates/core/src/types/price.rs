//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are read as decimal strings (`"2.50"`) and never pass
//! through floating point. Cart totals are computed with [`Price::times`]
//! and summed with `Iterator::sum`.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest amount [`Price::parse`] accepts.
///
/// At this bound a line of `u32::MAX` units is still about seven orders of
/// magnitude below `Decimal::MAX`.
pub const MAX_PRICE_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("invalid price {0:?}")]
    Invalid(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The amount is above [`MAX_PRICE_AMOUNT`].
    #[error("price cannot exceed {MAX_PRICE_AMOUNT}")]
    TooLarge,
}

/// A price with currency information.
///
/// Arithmetic keeps the currency of the left-hand side; a catalog is
/// expected to be priced in a single currency. Multiplication and addition
/// saturate at `Decimal::MAX` instead of panicking.
///
/// ```
/// use ubermelon_core::Price;
///
/// let each = Price::parse("2.50").unwrap();
/// assert_eq!(each.times(3).to_string(), "$7.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A zero amount in the default currency.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(Decimal::ZERO, CurrencyCode::USD)
    }

    /// Parse a non-negative decimal amount in the default currency.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Invalid` if the input is not a decimal number,
    /// `PriceError::Negative` if it is below zero and `PriceError::TooLarge`
    /// if it is above [`MAX_PRICE_AMOUNT`].
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        let amount =
            Decimal::from_str(trimmed).map_err(|_| PriceError::Invalid(trimmed.to_owned()))?;

        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        if amount > MAX_PRICE_AMOUNT {
            return Err(PriceError::TooLarge);
        }

        Ok(Self::new(amount, CurrencyCode::default()))
    }

    /// The price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(
            self.amount.saturating_mul(Decimal::from(quantity)),
            self.currency_code,
        )
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.amount.saturating_add(rhs.amount), self.currency_code)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!(Price::parse("2.5").unwrap().to_string(), "$2.50");
        assert_eq!(Price::parse(" 14 ").unwrap().to_string(), "$14.00");
        assert_eq!(Price::parse("0").unwrap().to_string(), "$0.00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Price::parse("two dollars"),
            Err(PriceError::Invalid(_))
        ));
        assert!(matches!(Price::parse(""), Err(PriceError::Invalid(_))));
    }

    #[test]
    fn test_parse_rejects_negative() {
        assert_eq!(Price::parse("-1.00"), Err(PriceError::Negative));
    }

    #[test]
    fn test_parse_caps_amount() {
        assert_eq!(MAX_PRICE_AMOUNT, Decimal::from(1_000_000_000_000_u64));
        assert!(Price::parse("1000000000000").is_ok());
        assert_eq!(Price::parse("1000000000000.01"), Err(PriceError::TooLarge));
        assert_eq!(
            Price::parse("79228162514264337593543950335"),
            Err(PriceError::TooLarge)
        );
        assert_eq!(
            Price::parse("50000000000000000000000000000"),
            Err(PriceError::TooLarge)
        );
    }

    #[test]
    fn test_largest_parsed_price_fits_a_full_line() {
        let line = Price::parse("1000000000000").unwrap().times(u32::MAX);
        assert_eq!(
            line.amount,
            Decimal::from(1_000_000_000_000_u64) * Decimal::from(u32::MAX)
        );
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_panicking() {
        let huge = Price::new(Decimal::MAX, CurrencyCode::USD);
        assert_eq!(huge.times(2).amount, Decimal::MAX);

        let total: Price = [huge, huge].into_iter().sum();
        assert_eq!(total.amount, Decimal::MAX);
    }

    #[test]
    fn test_times_is_exact() {
        // 0.1 * 3 is 0.30000000000000004 in f64
        let price = Price::parse("0.10").unwrap().times(3);
        assert_eq!(price.amount, Decimal::from_str("0.30").unwrap());
        assert_eq!(Price::parse("2.95").unwrap().times(0), Price::zero());
    }

    #[test]
    fn test_sum() {
        let total: Price = ["1.25", "2.50", "3.00"]
            .iter()
            .map(|s| Price::parse(s).unwrap())
            .sum();
        assert_eq!(total.to_string(), "$6.75");

        let empty: Price = std::iter::empty().sum();
        assert_eq!(empty, Price::zero());
    }

    #[test]
    fn test_currency_symbols() {
        let eur = Price::new(Decimal::new(350, 2), CurrencyCode::EUR);
        assert_eq!(eur.to_string(), "€3.50");
        assert_eq!(CurrencyCode::GBP.code(), "GBP");
    }
}
