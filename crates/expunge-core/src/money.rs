//! # Money
//!
//! Court balances are stored as a whole number of cents. Record sources
//! often report them as floating-point dollars; those are converted once,
//! at construction, and rejected if negative or not finite.
//!
//! The serialized form is a decimal string such as `"125.50"`. Floats are
//! never emitted, so a balance canonicalizes identically on every platform.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidAmountError;

/// Largest cent count that survives a round trip through `f64`.
const MAX_EXACT_CENTS: f64 = 9_007_199_254_740_992.0;

/// A non-negative amount of money in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Money(u64);

impl Money {
    /// No money owed.
    pub const ZERO: Money = Money(0);

    /// An amount from a cent count.
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// An amount from dollars, rounded to the nearest cent.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidAmountError`] for negative, non-finite or
    /// unrepresentably large amounts.
    pub fn from_dollars(dollars: f64) -> Result<Self, InvalidAmountError> {
        if !dollars.is_finite() {
            return Err(InvalidAmountError::NotFinite(dollars));
        }
        if dollars < 0.0 {
            return Err(InvalidAmountError::Negative(dollars.to_string()));
        }
        let cents = (dollars * 100.0).round();
        if cents > MAX_EXACT_CENTS {
            return Err(InvalidAmountError::OutOfRange(dollars.to_string()));
        }
        Ok(Self(cents as u64))
    }

    /// The amount in cents.
    pub fn cents(&self) -> u64 {
        self.0
    }

    /// Whether nothing is owed.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Sum of two amounts, or `None` on overflow.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Decimal dollars with two places, e.g. `125.50`.
    pub fn to_decimal_string(&self) -> String {
        format!("{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl std::iter::Sum for Money {
    /// Saturates at `u64::MAX` cents rather than wrapping.
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        Money(iter.fold(0u64, |acc, m| acc.saturating_add(m.0)))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.to_decimal_string())
    }
}

impl FromStr for Money {
    type Err = InvalidAmountError;

    /// Parse `dollars[.cc]`; at most two decimal places, no sign.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || InvalidAmountError::Malformed(s.to_string());
        if s.starts_with('-') {
            return Err(InvalidAmountError::Negative(s.to_string()));
        }
        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || frac.len() > 2 || !all_digits(frac) {
            return Err(malformed());
        }
        if s.ends_with('.') {
            return Err(malformed());
        }
        let whole: u64 = whole
            .parse()
            .map_err(|_| InvalidAmountError::OutOfRange(s.to_string()))?;
        let frac: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| malformed())? * 10,
            _ => frac.parse().map_err(|_| malformed())?,
        };
        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .map(Money)
            .ok_or_else(|| InvalidAmountError::OutOfRange(s.to_string()))
    }
}

impl Serialize for Money {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

/// Balances arrive as decimal strings or as JSON numbers of dollars.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Dollars(f64),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let parsed = match RawAmount::deserialize(deserializer)? {
            RawAmount::Text(s) => s.parse(),
            RawAmount::Dollars(d) => Money::from_dollars(d),
        };
        parsed.map_err(|e| {
            tracing::debug!(error = %e, "rejected monetary amount");
            serde::de::Error::custom(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dollars_rounds_to_cents() {
        assert_eq!(Money::from_dollars(125.5).unwrap().cents(), 12_550);
        assert_eq!(Money::from_dollars(0.1 + 0.2).unwrap().cents(), 30);
        assert_eq!(Money::from_dollars(0.0).unwrap(), Money::ZERO);
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            Money::from_dollars(-0.01),
            Err(InvalidAmountError::Negative(_))
        ));
        assert!(matches!("-5.00".parse::<Money>(), Err(InvalidAmountError::Negative(_))));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Money::from_dollars(f64::NAN).is_err());
        assert!(Money::from_dollars(f64::INFINITY).is_err());
    }

    #[test]
    fn test_parse_decimal_strings() {
        assert_eq!("125.50".parse::<Money>().unwrap().cents(), 12_550);
        assert_eq!("125.5".parse::<Money>().unwrap().cents(), 12_550);
        assert_eq!("125".parse::<Money>().unwrap().cents(), 12_500);
        assert_eq!("0.07".parse::<Money>().unwrap().cents(), 7);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", ".50", "12.", "12.345", "1,000.00", "$5", "1e3", "12.5x"] {
            assert!(bad.parse::<Money>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_display_and_decimal_string() {
        let m = Money::from_cents(100_007);
        assert_eq!(m.to_decimal_string(), "1000.07");
        assert_eq!(m.to_string(), "$1000.07");
    }

    #[test]
    fn test_serde_string_and_number_forms() {
        let m: Money = serde_json::from_str(r#""42.10""#).unwrap();
        assert_eq!(m.cents(), 4_210);
        let m: Money = serde_json::from_str("42.1").unwrap();
        assert_eq!(m.cents(), 4_210);
        let m: Money = serde_json::from_str("0").unwrap();
        assert!(m.is_zero());
        assert_eq!(serde_json::to_string(&Money::from_cents(4_210)).unwrap(), r#""42.10""#);
    }

    #[test]
    fn test_serde_rejects_negative() {
        assert!(serde_json::from_str::<Money>("-1.0").is_err());
    }

    #[test]
    fn test_sum_saturates() {
        let total: Money = [Money::from_cents(u64::MAX), Money::from_cents(1)].into_iter().sum();
        assert_eq!(total.cents(), u64::MAX);
        let total: Money = [Money::from_cents(150), Money::from_cents(250)].into_iter().sum();
        assert_eq!(total.cents(), 400);
    }
}
