//! FX rate between two currencies.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Currency, CurrencyPair};
use crate::error::{CoreError, CoreResult};

/// A rate on a currency pair: one unit of base buys `rate` units of counter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FxRate {
    pair: CurrencyPair,
    rate: f64,
}

impl FxRate {
    /// Creates an FX rate.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the rate is not strictly positive and finite.
    pub fn of(pair: CurrencyPair, rate: f64) -> CoreResult<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(CoreError::validation(format!(
                "FX rate for {pair} must be positive, found {rate}"
            )));
        }
        Ok(Self { pair, rate })
    }

    /// Returns the currency pair.
    #[must_use]
    pub fn pair(&self) -> CurrencyPair {
        self.pair
    }

    /// Returns the rate in the pair's own convention.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the rate on the inverse pair.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            pair: self.pair.inverse(),
            rate: 1.0 / self.rate,
        }
    }

    /// Returns the number of `counter` units for one unit of `base`.
    ///
    /// # Errors
    ///
    /// Fails if the requested currencies are not the two sides of this rate.
    pub fn fx_rate(&self, base: Currency, counter: Currency) -> CoreResult<f64> {
        if base == counter {
            return Ok(1.0);
        }
        if base == self.pair.base() && counter == self.pair.counter() {
            return Ok(self.rate);
        }
        if base == self.pair.counter() && counter == self.pair.base() {
            return Ok(1.0 / self.rate);
        }
        Err(CoreError::validation(format!(
            "No FX rate for {base}/{counter} in {self}"
        )))
    }
}

impl fmt::Display for FxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.pair, self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn eur_usd() -> FxRate {
        FxRate::of(CurrencyPair::of(Currency::EUR, Currency::USD).unwrap(), 1.25).unwrap()
    }

    #[test]
    fn test_fx_rate_both_directions() {
        let fx = eur_usd();
        assert_relative_eq!(fx.fx_rate(Currency::EUR, Currency::USD).unwrap(), 1.25);
        assert_relative_eq!(fx.fx_rate(Currency::USD, Currency::EUR).unwrap(), 0.8);
        assert_relative_eq!(fx.fx_rate(Currency::USD, Currency::USD).unwrap(), 1.0);
        assert!(fx.fx_rate(Currency::GBP, Currency::USD).is_err());
    }

    #[test]
    fn test_invalid_rate() {
        let pair = CurrencyPair::of(Currency::EUR, Currency::USD).unwrap();
        assert!(FxRate::of(pair, 0.0).is_err());
        assert!(FxRate::of(pair, f64::NAN).is_err());
    }

    #[test]
    fn test_inverse() {
        let inv = eur_usd().inverse();
        assert_eq!(inv.pair().base(), Currency::USD);
        assert_relative_eq!(inv.rate(), 0.8);
    }
}
