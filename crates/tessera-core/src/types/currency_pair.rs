//! Ordered pair of currencies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Currency;
use crate::error::{CoreError, CoreResult};

/// An ordered pair of currencies, written `BASE/COUNTER`.
///
/// A rate quoted on the pair gives the number of counter currency units for
/// one unit of base currency.
///
/// ```rust
/// use tessera_core::types::{Currency, CurrencyPair};
///
/// let pair: CurrencyPair = "EUR/USD".parse().unwrap();
/// assert_eq!(pair.base(), Currency::EUR);
/// assert_eq!(pair.inverse().to_string(), "USD/EUR");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    base: Currency,
    counter: Currency,
}

impl CurrencyPair {
    /// Creates a currency pair.
    ///
    /// # Errors
    ///
    /// Returns a validation error if both currencies are equal.
    pub fn of(base: Currency, counter: Currency) -> CoreResult<Self> {
        if base == counter {
            return Err(CoreError::validation(format!(
                "Currency pair must contain two different currencies, found {base}/{counter}"
            )));
        }
        Ok(Self { base, counter })
    }

    /// Returns the base currency.
    #[must_use]
    pub fn base(&self) -> Currency {
        self.base
    }

    /// Returns the counter currency.
    #[must_use]
    pub fn counter(&self) -> Currency {
        self.counter
    }

    /// Returns the pair with base and counter swapped.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            base: self.counter,
            counter: self.base,
        }
    }

    /// Returns true if the currency is either side of the pair.
    #[must_use]
    pub fn contains(&self, currency: Currency) -> bool {
        self.base == currency || self.counter == currency
    }

    /// Returns the other side of the pair, if `currency` is one of its sides.
    #[must_use]
    pub fn other(&self, currency: Currency) -> Option<Currency> {
        if currency == self.base {
            Some(self.counter)
        } else if currency == self.counter {
            Some(self.base)
        } else {
            None
        }
    }

    /// Returns true if `other` is this pair inverted.
    #[must_use]
    pub fn is_inverse(&self, other: &CurrencyPair) -> bool {
        self.base == other.counter && self.counter == other.base
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.counter)
    }
}

impl FromStr for CurrencyPair {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, counter) = s
            .split_once('/')
            .ok_or_else(|| CoreError::validation(format!("Invalid currency pair: {s}")))?;
        CurrencyPair::of(base.parse()?, counter.parse()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_currency_rejected() {
        assert!(CurrencyPair::of(Currency::USD, Currency::USD).is_err());
    }

    #[test]
    fn test_other() {
        let pair = CurrencyPair::of(Currency::USD, Currency::INR).unwrap();
        assert_eq!(pair.other(Currency::USD), Some(Currency::INR));
        assert_eq!(pair.other(Currency::INR), Some(Currency::USD));
        assert_eq!(pair.other(Currency::EUR), None);
        assert!(pair.contains(Currency::INR));
    }

    #[test]
    fn test_inverse() {
        let pair = CurrencyPair::of(Currency::EUR, Currency::USD).unwrap();
        assert!(pair.is_inverse(&pair.inverse()));
        assert!(!pair.is_inverse(&pair));
    }

    #[test]
    fn test_parse() {
        let pair: CurrencyPair = "usd/krw".parse().unwrap();
        assert_eq!(pair.base(), Currency::USD);
        assert_eq!(pair.counter(), Currency::KRW);
        assert!("USDKRW".parse::<CurrencyPair>().is_err());
    }
}
